// Module game - round state machine, player motion and the session loop

pub mod player;
pub mod round;
pub mod session;
pub mod view;

pub use round::{GameRound, Judgement, RoundContext, RoundState, RoundTimer};
pub use session::{GameSession, Progression};
pub use view::{NullRenderer, SceneRenderer};
