// MIDI device listing

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MidiDeviceInfo {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

impl MidiDeviceInfo {
    pub fn output(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: format!("midi_out_{}", index),
            name: name.into(),
            is_default: index == 0, // First port is considered the default
        }
    }

    pub fn input(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: format!("midi_in_{}", index),
            name: name.into(),
            is_default: index == 0,
        }
    }

    /// Matches either the stable id or the display name
    pub fn matches(&self, identifier: &str) -> bool {
        self.id == identifier || self.name == identifier
    }

    pub fn is_loopback(&self) -> bool {
        is_loopback_port(&self.name)
    }
}

/// Software loopback ports ("Midi Through" on ALSA) echo output back
/// into inputs, so prompt notes would come back as answers.
pub fn is_loopback_port(name: &str) -> bool {
    name.to_ascii_lowercase().contains("through")
}

/// Build output infos from port names in enumeration order
pub fn list_outputs(names: &[String]) -> Vec<MidiDeviceInfo> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| MidiDeviceInfo::output(index, name.clone()))
        .collect()
}

/// Port names of a midir client; unreadable names are skipped
pub fn port_names<T: midir::MidiIO>(client: &T) -> Vec<String> {
    client
        .ports()
        .iter()
        .filter_map(|port| client.port_name(port).ok())
        .collect()
}
