pub mod chord;
pub mod pitch;
pub mod tempo;
