//! Connection lifecycle and messaging handlers.

mod advance_connection;
mod get_connection;
mod get_my_connections;
mod initiate_connection;
mod list_messages;
mod request_document;
mod send_message;
mod submit_requested_document;
mod verify_requested_document;

pub use advance_connection::{AdvanceConnectionCommand, AdvanceConnectionHandler};
pub use get_connection::{GetConnectionHandler, GetConnectionQuery};
pub use get_my_connections::{GetMyConnectionsHandler, GetMyConnectionsQuery};
pub use initiate_connection::{
    InitiateConnectionCommand, InitiateConnectionHandler, InitiateConnectionResult,
};
pub use list_messages::{ListMessagesHandler, ListMessagesQuery};
pub use request_document::{RequestDocumentCommand, RequestDocumentHandler};
pub use send_message::{SendMessageCommand, SendMessageHandler};
pub use submit_requested_document::{
    SubmitRequestedDocumentCommand, SubmitRequestedDocumentHandler,
};
pub use verify_requested_document::{
    VerifyRequestedDocumentCommand, VerifyRequestedDocumentHandler,
};
