// Player - walks right at a constant speed and jumps a fixed distance

use std::time::Duration;

/// Pixels per second
pub const WALK_SPEED: f32 = 150.0;
pub const PLAYER_START_X: f32 = 150.0;
/// Forward distance covered by one jump
pub const JUMP_DISTANCE: f32 = 150.0;
pub const JUMP_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerMotion {
    Walking,
    Waiting,
    Jumping { from: f32, elapsed: Duration },
}

#[derive(Debug, Clone)]
pub struct Player {
    x: f32,
    motion: PlayerMotion,
}

impl Player {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            motion: PlayerMotion::Waiting,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn motion(&self) -> PlayerMotion {
        self.motion
    }

    pub fn walk(&mut self) {
        self.motion = PlayerMotion::Walking;
    }

    pub fn stop(&mut self) {
        self.motion = PlayerMotion::Waiting;
    }

    /// Ignored while already in the air
    pub fn jump(&mut self) {
        if matches!(self.motion, PlayerMotion::Jumping { .. }) {
            return;
        }
        self.motion = PlayerMotion::Jumping {
            from: self.x,
            elapsed: Duration::ZERO,
        };
    }

    /// Advance by `dt`. Returns true on the update that lands a jump;
    /// the player is then waiting at `from + JUMP_DISTANCE`.
    pub fn update(&mut self, dt: Duration) -> bool {
        match self.motion {
            PlayerMotion::Walking => {
                self.x += WALK_SPEED * dt.as_secs_f32();
                false
            }
            PlayerMotion::Waiting => false,
            PlayerMotion::Jumping { from, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= JUMP_DURATION {
                    self.x = from + JUMP_DISTANCE;
                    self.motion = PlayerMotion::Waiting;
                    true
                } else {
                    let progress = elapsed.as_secs_f32() / JUMP_DURATION.as_secs_f32();
                    self.x = from + JUMP_DISTANCE * progress;
                    self.motion = PlayerMotion::Jumping { from, elapsed };
                    false
                }
            }
        }
    }
}
