// Scene view - records what the round asks to show, paints it with egui

use eframe::egui;
use egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Stroke, Ui, Vec2};

use crate::game::view::SceneRenderer;
use crate::world::NoteEntry;

const GROUND_Y: f32 = 300.0;
const TARGET_RADIUS: f32 = 28.0;
const PLAYER_RADIUS: f32 = 26.0;
/// Player sits this far from the left edge once the camera follows
const CAMERA_LEAD: f32 = 200.0;
const CAMERA_SMOOTHING: f32 = 0.1;

const SKY: Color32 = Color32::from_rgb(135, 190, 235);
const GRASS: Color32 = Color32::from_rgb(0x7c, 0xba, 0x5f);
const GRASS_EDGE: Color32 = Color32::from_rgb(0x5a, 0x8f, 0x4a);
const PLAYER_FILL: Color32 = Color32::from_rgb(0x4a, 0x90, 0xd9);
const PLAYER_EDGE: Color32 = Color32::from_rgb(0x2d, 0x5a, 0x87);

pub fn note_color(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Wildcards are drawn white so their color gives nothing away
fn target_fill(entry: NoteEntry, defeated: bool) -> Color32 {
    let fill = if entry.is_wildcard {
        Color32::WHITE
    } else {
        note_color(entry.note.definition().color)
    };
    if defeated { fill.gamma_multiply(0.25) } else { fill }
}

fn draw_eyes(painter: &Painter, center: Pos2) {
    for eye in [-10.0, 10.0] {
        let at = center + Vec2::new(eye, -8.0);
        painter.circle_filled(at, 5.0, Color32::WHITE);
        painter.circle_filled(at + Vec2::new(2.0, 0.0), 2.5, Color32::BLACK);
    }
}

#[derive(Debug, Clone, Copy)]
struct TargetSprite {
    entry: NoteEntry,
    x: f32,
    defeated: bool,
}

#[derive(Debug, Default)]
pub struct SceneView {
    player_x: f32,
    camera_x: f32,
    targets: Vec<TargetSprite>,
    prompt: Option<String>,
    progress: (usize, usize),
    complete_banner: Option<String>,
}

impl SceneView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous round's sprites
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn progress(&self) -> (usize, usize) {
        self.progress
    }

    pub fn is_showing_complete(&self) -> bool {
        self.complete_banner.is_some()
    }

    pub fn paint(&mut self, ui: &mut Ui, world_name: &str) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;

        if self.complete_banner.is_none() {
            let target = (self.player_x - CAMERA_LEAD).max(0.0);
            self.camera_x += (target - self.camera_x) * CAMERA_SMOOTHING;
        }
        let to_screen = |x: f32, y: f32| Pos2::new(rect.left() + x - self.camera_x, rect.top() + y);

        painter.rect_filled(rect, 0.0, SKY);
        let ground = egui::Rect::from_min_max(
            Pos2::new(rect.left(), rect.top() + GROUND_Y),
            Pos2::new(rect.right(), rect.top() + GROUND_Y + 50.0),
        );
        painter.rect_filled(ground, 0.0, GRASS);
        painter.line_segment([ground.left_top(), ground.right_top()], Stroke::new(2.0, GRASS_EDGE));

        for target in &self.targets {
            let center = to_screen(target.x, GROUND_Y - TARGET_RADIUS);
            if center.x < rect.left() - TARGET_RADIUS || center.x > rect.right() + TARGET_RADIUS {
                continue;
            }

            painter.circle_filled(center, TARGET_RADIUS, target_fill(target.entry, target.defeated));
            painter.circle_stroke(center, TARGET_RADIUS, Stroke::new(2.0, Color32::BLACK));
            if !target.defeated {
                draw_eyes(&painter, center);
            }
        }

        let player = to_screen(self.player_x, GROUND_Y - PLAYER_RADIUS);
        painter.circle_filled(player, PLAYER_RADIUS, PLAYER_FILL);
        painter.circle_stroke(player, PLAYER_RADIUS, Stroke::new(3.0, PLAYER_EDGE));
        draw_eyes(&painter, player);

        let hud = rect.left_top() + Vec2::new(20.0, 20.0);
        painter.text(hud, Align2::LEFT_TOP, world_name, FontId::proportional(24.0), Color32::WHITE);
        painter.text(
            hud + Vec2::new(0.0, 32.0),
            Align2::LEFT_TOP,
            format!("{} / {}", self.progress.0, self.progress.1),
            FontId::proportional(18.0),
            Color32::WHITE,
        );

        if let Some(prompt) = &self.prompt {
            painter.text(
                Pos2::new(rect.center().x, rect.top() + 120.0),
                Align2::CENTER_CENTER,
                prompt,
                FontId::proportional(26.0),
                Color32::WHITE,
            );
        }

        if let Some(name) = &self.complete_banner {
            painter.text(
                rect.center() - Vec2::new(0.0, 40.0),
                Align2::CENTER_CENTER,
                format!("{}\nComplete!", name),
                FontId::proportional(44.0),
                Color32::WHITE,
            );
            painter.text(
                rect.center() + Vec2::new(0.0, 60.0),
                Align2::CENTER_CENTER,
                "Press any key to continue...",
                FontId::proportional(22.0),
                Color32::WHITE,
            );
        }
    }
}

impl SceneRenderer for SceneView {
    fn move_player_to(&mut self, x: f32) {
        self.player_x = x;
    }

    fn show_target(&mut self, index: usize, entry: NoteEntry, x: f32) {
        let sprite = TargetSprite {
            entry,
            x,
            defeated: false,
        };
        if index < self.targets.len() {
            self.targets[index] = sprite;
        } else {
            self.targets.push(sprite);
        }
    }

    fn mark_target_defeated(&mut self, index: usize) {
        if let Some(target) = self.targets.get_mut(index) {
            target.defeated = true;
        }
    }

    fn show_prompt(&mut self, text: &str) {
        self.prompt = Some(text.to_string());
    }

    fn hide_prompt(&mut self) {
        self.prompt = None;
    }

    fn show_progress(&mut self, done: usize, total: usize) {
        self.progress = (done, total);
    }

    fn show_world_complete(&mut self, world_name: &str) {
        self.prompt = None;
        self.complete_banner = Some(world_name.to_string());
    }
}
