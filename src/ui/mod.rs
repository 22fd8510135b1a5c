// Module UI - egui shell around the game session

pub mod app;
pub mod piano;
pub mod scene;

pub use app::PitchJumpApp;
pub use scene::SceneView;
