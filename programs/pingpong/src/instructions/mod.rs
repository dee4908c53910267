pub mod config;
pub mod initialize;
pub mod lz_receive;
pub mod quote_reply;
pub mod quote_send;
pub mod send;

pub use config::*;
pub use initialize::*;
pub use lz_receive::*;
pub use quote_reply::*;
pub use quote_send::*;
pub use send::*;
