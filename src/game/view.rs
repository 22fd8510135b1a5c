// Scene renderer - what the round asks the presentation layer to draw

use crate::world::NoteEntry;

pub trait SceneRenderer {
    fn move_player_to(&mut self, x: f32);
    fn show_target(&mut self, index: usize, entry: NoteEntry, x: f32);
    fn mark_target_defeated(&mut self, index: usize);
    fn show_prompt(&mut self, text: &str);
    fn hide_prompt(&mut self);
    fn show_progress(&mut self, done: usize, total: usize);
    fn show_world_complete(&mut self, world_name: &str);
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn move_player_to(&mut self, _x: f32) {}
    fn show_target(&mut self, _index: usize, _entry: NoteEntry, _x: f32) {}
    fn mark_target_defeated(&mut self, _index: usize) {}
    fn show_prompt(&mut self, _text: &str) {}
    fn hide_prompt(&mut self) {}
    fn show_progress(&mut self, _done: usize, _total: usize) {}
    fn show_world_complete(&mut self, _world_name: &str) {}
}
