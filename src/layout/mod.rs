pub mod engine;
pub mod kind;
