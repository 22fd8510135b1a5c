// Error types shared across the crate

/// Errors surfaced by lookups, device selection and the platform boundary
#[derive(Debug, thiserror::Error)]
pub enum PitchJumpError {
    #[error("Unknown note: {0}")]
    UnknownNote(String),

    #[error("World {0} not found")]
    WorldNotFound(u32),

    #[error("MIDI device '{0}' not found")]
    DeviceNotFound(String),

    #[error("Settings persistence failed: {0}")]
    Persistence(String),

    #[error("Platform unsupported: {0}")]
    PlatformUnsupported(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PitchJumpError>;
