// Device connection state shared with realtime callbacks

pub mod status;
