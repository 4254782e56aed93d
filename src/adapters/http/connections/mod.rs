//! HTTP adapter for connections, messages and requested documents.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AdvanceConnectionRequest, ConnectionResponse, InitiateConnectionRequest, MessageResponse,
    RequestDocumentRequest, ReviewDocumentRequest, SendMessageRequest, SubmitDocumentRequest,
};
pub use routes::connection_routes;
