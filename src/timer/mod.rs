pub mod cue;
pub mod manager;
