pub mod delivered;
pub mod endpoint;
pub mod outbound_message;
pub mod peer;
pub mod store;

pub use delivered::*;
pub use endpoint::*;
pub use outbound_message::*;
pub use peer::*;
pub use store::*;
