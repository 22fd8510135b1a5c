// Main UI App - world menu and the play screen

use std::time::Duration;

use eframe::egui;
use rand::rngs::StdRng;

use crate::game::{GameSession, Progression};
use crate::settings::AudioOutputMode;
use crate::ui::piano::{self, PianoEvent};
use crate::ui::scene::SceneView;
use crate::world::worlds;

/// Longest frame step fed to the game; avoids teleporting after a stall
const MAX_FRAME_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Playing,
}

pub struct PitchJumpApp {
    session: GameSession<StdRng>,
    view: SceneView,
    screen: Screen,
    status: Option<String>,
}

impl PitchJumpApp {
    pub fn new(session: GameSession<StdRng>) -> Self {
        Self {
            session,
            view: SceneView::new(),
            screen: Screen::Menu,
            status: None,
        }
    }

    fn start_world(&mut self, number: u32) {
        self.view.reset();
        self.session.start_world(number, &mut self.view);
        self.screen = Screen::Playing;
    }

    fn back_to_menu(&mut self) {
        self.session.end_round();
        self.view.reset();
        self.screen = Screen::Menu;
    }

    fn draw_menu(&mut self, ctx: &egui::Context) {
        let mut chosen = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Pitch Jump");
            ui.label("Hear the note, find it on the keyboard, jump!");
            ui.separator();

            for world in worlds() {
                ui.horizontal(|ui| {
                    if ui.button(world.name).clicked() {
                        chosen = Some(world.number);
                    }
                    ui.label(world.description);
                });
            }

            ui.add_space(10.0);
            ui.separator();
            self.draw_audio_settings(ui);

            ui.add_space(10.0);
            ui.separator();
            ui.heading("MIDI Input");
            let inputs = self.session.midi_keyboard().device_names();
            if inputs.is_empty() {
                ui.label("No MIDI keyboard connected. Use the on-screen keys or A-G.");
            } else {
                for name in inputs {
                    ui.colored_label(egui::Color32::GREEN, format!("● {}", name));
                }
            }

            if let Some(status) = &self.status {
                ui.add_space(10.0);
                ui.colored_label(egui::Color32::from_rgb(255, 165, 0), status);
            }
        });

        if let Some(number) = chosen {
            self.start_world(number);
        }
    }

    fn draw_audio_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sound");

        let previous_mode = self.session.audio().output_mode();
        let mut mode = previous_mode;
        ui.horizontal(|ui| {
            ui.radio_value(&mut mode, AudioOutputMode::Synth, "Built-in synth");
            ui.radio_value(&mut mode, AudioOutputMode::Midi, "MIDI device");
        });
        if mode != previous_mode {
            self.session.audio_mut().set_output_mode(mode);
        }

        // Synth volume; the wrong cue uses the synth in both modes
        let mut volume = self.session.audio().volume();
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).text("Volume"))
            .changed()
        {
            self.session.audio_mut().set_volume(volume);
        }

        if mode != AudioOutputMode::Midi {
            return;
        }

        if !self.session.audio().is_midi_supported() {
            ui.label("MIDI output is not available on this system.");
            return;
        }

        let outputs = self.session.audio().available_outputs().to_vec();
        let selected = self
            .session
            .audio()
            .selected_output()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "None".to_string());

        let mut choice = None;
        ui.horizontal(|ui| {
            ui.label("MIDI Output:");
            egui::ComboBox::from_id_salt("midi_output_selector")
                .selected_text(&selected)
                .show_ui(ui, |ui| {
                    if outputs.is_empty() {
                        ui.label("No MIDI device available");
                    }
                    for device in &outputs {
                        if ui.selectable_label(device.name == selected, &device.name).clicked() {
                            choice = Some(device.id.clone());
                        }
                    }
                });

            if ui.button("🔄").on_hover_text("Refresh devices").clicked() {
                self.session.audio_mut().refresh_outputs();
            }
        });

        if let Some(id) = choice {
            self.status = match self.session.audio_mut().select_output(&id) {
                Ok(()) => None,
                Err(e) => Some(e.to_string()),
            };
        }
    }

    fn draw_playing(&mut self, ctx: &egui::Context, dt: Duration) {
        let keys: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        let clicked = ctx.input(|i| i.pointer.any_pressed());

        let complete = self.session.round().is_some_and(|r| r.is_complete());
        if complete {
            if !keys.is_empty() || clicked {
                self.view.reset();
                if let Some(Progression::CurriculumFinished) =
                    self.session.continue_after_complete(&mut self.view)
                {
                    self.back_to_menu();
                    return;
                }
            }
        } else {
            for key in keys {
                if key == egui::Key::Escape {
                    self.back_to_menu();
                    return;
                }
                self.session.key_down(key.name(), &mut self.view);
            }
        }

        self.session.update(dt, &mut self.view);

        let world_name = self
            .session
            .round()
            .map(|r| r.world().name)
            .unwrap_or_default();

        let mut piano_events = Vec::new();
        egui::TopBottomPanel::bottom("on_screen_keyboard").show(ctx, |ui| {
            let mut visible = self.session.on_screen_keyboard().is_visible();
            if ui.checkbox(&mut visible, "Show keyboard").changed() {
                self.session.on_screen_keyboard_mut().toggle();
            }
            if visible {
                piano_events = piano::show(ui, self.session.on_screen_keyboard());
            }
        });

        for event in piano_events {
            match event {
                PianoEvent::Pressed(note) => {
                    self.session.press_on_screen(note, &mut self.view);
                }
                PianoEvent::Released(note) => self.session.release_on_screen(note),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.paint(ui, world_name);
        });
    }
}

impl eframe::App for PitchJumpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep the game loop ticking
        ctx.request_repaint();

        let dt = Duration::from_secs_f32(ctx.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_STEP));

        match self.screen {
            Screen::Menu => {
                self.session.update(dt, &mut self.view);
                self.draw_menu(ctx);
            }
            Screen::Playing => self.draw_playing(ctx, dt),
        }
    }
}
