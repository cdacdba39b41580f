pub mod controls;
pub mod engine;
pub mod layout;
pub mod slide;
