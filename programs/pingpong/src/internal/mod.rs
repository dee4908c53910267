pub mod engine;
pub mod fee;

pub use engine::*;
pub use fee::*;
