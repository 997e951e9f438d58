pub mod engine;
pub mod modes;
pub mod result;
