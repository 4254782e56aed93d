//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! Every write method takes the aggregate together with the `AuditRecord`
//! describing the mutation. Implementations commit both atomically.
//!
//! - `UserRepository`, `BusinessRepository`, `VerificationDocumentRepository`
//! - `InvestorPreferencesRepository`, `DismissalRepository`
//! - `ConnectionRepository`, `MilestoneRepository`, `MessageRepository`
//! - `AuditLog` - standalone appends (denials), queries, chain export
//!
//! ## External Service Ports
//!
//! - `SessionValidator` - bearer token to authenticated subject
//! - `AIProvider` - LLM completions
//! - `MatchExplainer` - narrative rationale for a match score
//! - `ReferenceDataSource` - sector and region tables

mod ai_provider;
mod audit_log;
mod business_repository;
mod connection_repository;
mod dismissal_repository;
mod investor_preferences_repository;
mod match_explainer;
mod message_repository;
mod milestone_repository;
mod reference_data_source;
mod save_result;
mod session_validator;
mod user_repository;
mod verification_document_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use audit_log::AuditLog;
pub use business_repository::BusinessRepository;
pub use connection_repository::ConnectionRepository;
pub use dismissal_repository::DismissalRepository;
pub use investor_preferences_repository::InvestorPreferencesRepository;
pub use match_explainer::{ExplanationRequest, MatchExplainer};
pub use message_repository::MessageRepository;
pub use milestone_repository::MilestoneRepository;
pub use reference_data_source::ReferenceDataSource;
pub use save_result::SaveResult;
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
pub use verification_document_repository::VerificationDocumentRepository;
