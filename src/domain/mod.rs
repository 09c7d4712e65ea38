pub mod connection;
pub mod error;
pub mod message;
pub mod topic;

pub use connection::*;
pub use error::DomainError;
pub use message::*;
pub use topic::*;
