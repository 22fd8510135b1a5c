// On-screen piano - seven white keys with color stickers

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::input::OnScreenKeyboard;
use crate::notes::NoteName;
use crate::ui::scene::note_color;

const KEY_WIDTH: f32 = 80.0;
const KEY_HEIGHT: f32 = 120.0;
const KEY_SPACING: f32 = 8.0;
const STICKER_RADIUS: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PianoEvent {
    Pressed(NoteName),
    Released(NoteName),
}

/// Draw the keyboard; returns presses and releases since last frame
pub fn show(ui: &mut Ui, keyboard: &OnScreenKeyboard) -> Vec<PianoEvent> {
    let mut events = Vec::new();
    let keys = keyboard.keys();

    let total_width = keys.len() as f32 * (KEY_WIDTH + KEY_SPACING) - KEY_SPACING;
    let (area, painter) = ui.allocate_painter(Vec2::new(ui.available_width(), KEY_HEIGHT), Sense::hover());
    let start_x = area.rect.center().x - total_width / 2.0;

    for (index, note) in keys.into_iter().enumerate() {
        let min = Pos2::new(start_x + index as f32 * (KEY_WIDTH + KEY_SPACING), area.rect.top());
        let rect = Rect::from_min_size(min, Vec2::new(KEY_WIDTH, KEY_HEIGHT));
        let response = ui.interact(rect, ui.id().with(("piano_key", index)), Sense::click_and_drag());

        let held = response.is_pointer_button_down_on();
        if held && !keyboard.is_pressed(note) {
            events.push(PianoEvent::Pressed(note));
        } else if !held && keyboard.is_pressed(note) {
            events.push(PianoEvent::Released(note));
        }

        let fill = if held {
            Color32::from_gray(0xdd)
        } else {
            Color32::WHITE
        };
        painter.rect_filled(rect, 4.0, fill);
        painter.rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::from_gray(0x33)));

        let definition = note.definition();
        let sticker = Pos2::new(rect.center().x, rect.bottom() - 30.0);
        painter.circle_filled(sticker, STICKER_RADIUS, note_color(definition.color));
        painter.text(
            sticker,
            Align2::CENTER_CENTER,
            note.label(),
            FontId::proportional(22.0),
            Color32::BLACK,
        );
    }

    events
}
