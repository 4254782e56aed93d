//! Connection module - the business/investor relationship, its status
//! history and its message thread.

mod aggregate;
mod errors;
mod message;

pub use aggregate::{Connection, ConnectionStatus, StatusChange};
pub use errors::ConnectionError;
pub use message::{ConnectionMessage, DocumentRequest, MessageKind, MAX_BODY_LENGTH};

#[cfg(test)]
pub(crate) use aggregate::fixtures;
