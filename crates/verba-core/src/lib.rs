pub mod counter;
pub mod input;
pub mod language;
pub mod request;
pub mod state;
pub mod status;
