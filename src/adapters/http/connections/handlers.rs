//! HTTP handlers for connection endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    AdvanceConnectionRequest, ConnectionResponse, InitiateConnectionRequest, MessageResponse,
    RequestDocumentRequest, ReviewDocumentRequest, SendMessageRequest, SubmitDocumentRequest,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AdvanceConnectionCommand, GetConnectionQuery, GetMyConnectionsQuery, InitiateConnectionCommand,
    ListMessagesQuery, RequestDocumentCommand, SendMessageCommand, SubmitRequestedDocumentCommand,
    VerifyRequestedDocumentCommand,
};
use crate::domain::foundation::{BusinessId, ConnectionId, MessageId};

// ════════════════════════════════════════════════════════════════════════════
// Connections
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/connections
pub async fn get_my_connections(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<ConnectionResponse>>, ApiError> {
    let connections = state
        .get_my_connections_handler()
        .handle(GetMyConnectionsQuery {
            user_id: caller.user.id,
        })
        .await?;
    Ok(Json(connections.iter().map(ConnectionResponse::from).collect()))
}

/// POST /api/connections
///
/// 201 for a new lead, 200 with the existing connection otherwise.
pub async fn initiate_connection(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<InitiateConnectionRequest>,
) -> Result<Response, ApiError> {
    let cmd = InitiateConnectionCommand {
        business_id: parse_id::<BusinessId>(&req.business_id, "business")?,
    };
    let result = state
        .initiate_connection_handler()
        .handle(cmd, caller.metadata())
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ConnectionResponse::from(&result.connection))).into_response())
}

/// GET /api/connections/:id
pub async fn get_connection(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let connection = state
        .get_connection_handler()
        .handle(GetConnectionQuery {
            user_id: caller.user.id,
            connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        })
        .await?;
    Ok(Json(ConnectionResponse::from(&connection)))
}

/// POST /api/connections/:id/advance
pub async fn advance_connection(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
    Json(req): Json<AdvanceConnectionRequest>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let cmd = AdvanceConnectionCommand {
        connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        target: req.status,
    };
    let connection = state
        .advance_connection_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(ConnectionResponse::from(&connection)))
}

// ════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/connections/:id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = state
        .list_messages_handler()
        .handle(ListMessagesQuery {
            user_id: caller.user.id,
            connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        })
        .await?;
    Ok(Json(messages.iter().map(MessageResponse::from).collect()))
}

/// POST /api/connections/:id/messages
pub async fn send_message(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, ApiError> {
    let cmd = SendMessageCommand {
        connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        body: req.body,
    };
    let message = state
        .send_message_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Requested documents
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/connections/:id/document-requests
pub async fn request_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
    Json(req): Json<RequestDocumentRequest>,
) -> Result<Response, ApiError> {
    let cmd = RequestDocumentCommand {
        connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        document_type: req.document_type,
        template_url: req.template_url,
        note: req.note,
    };
    let message = state
        .request_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))).into_response())
}

/// POST /api/document-requests/:id/submit
pub async fn submit_requested_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(message_id): Path<String>,
    Json(req): Json<SubmitDocumentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = SubmitRequestedDocumentCommand {
        message_id: parse_id::<MessageId>(&message_id, "document request")?,
        document_url: req.document_url,
    };
    let message = state
        .submit_requested_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(MessageResponse::from(&message)))
}

/// POST /api/document-requests/:id/verify
pub async fn verify_requested_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(message_id): Path<String>,
    Json(req): Json<ReviewDocumentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = VerifyRequestedDocumentCommand {
        message_id: parse_id::<MessageId>(&message_id, "document request")?,
        approved: req.approved,
    };
    let message = state
        .verify_requested_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(MessageResponse::from(&message)))
}
