// Messaging - lock-free channels between the game loop and realtime threads

pub mod channels;
pub mod command;
