use pitch_jump::ui::PitchJumpApp;
use pitch_jump::{FileStore, GameSession, GameSettings, KeyValueStore, MemoryStore, NativePlatform};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Pitch Jump ===");

    let store: Box<dyn KeyValueStore> = match FileStore::default_location() {
        Some(store) => {
            log::info!("Settings stored in {}", store.dir().display());
            Box::new(store)
        }
        None => {
            log::warn!("No config directory, settings will not be saved");
            Box::new(MemoryStore::new())
        }
    };

    let settings = GameSettings::load(store);
    let mut session = GameSession::new(settings, StdRng::from_entropy());
    session.init(&mut NativePlatform::new());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_title("Pitch Jump"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Pitch Jump",
        native_options,
        Box::new(|_cc| Ok(Box::new(PitchJumpApp::new(session)))),
    );

    if let Err(e) = result {
        log::error!("UI stopped: {}", e);
    }
}
