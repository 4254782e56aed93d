//! Bridgeway server entry point.

use std::collections::HashSet;
use std::sync::Arc;

use secrecy::Secret;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bridgeway::adapters::ai::{AiMatchExplainer, AnthropicConfig, AnthropicProvider, TemplateExplainer};
use bridgeway::adapters::auth::{MockSessionValidator, OidcConfig, OidcSessionValidator};
use bridgeway::adapters::http::{api_router, with_http_layers, AppState, MatchingSettings};
use bridgeway::adapters::memory::InMemoryStore;
use bridgeway::adapters::postgres::PostgresStore;
use bridgeway::adapters::reference::{BuiltinReferenceSource, YamlFileReferenceSource};
use bridgeway::config::{AppConfig, LogFormat};
use bridgeway::domain::audit::AuditSigner;
use bridgeway::domain::foundation::UserId;
use bridgeway::ports::{MatchExplainer, ReferenceDataSource, SessionValidator};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(environment = ?config.server.environment, "Starting Bridgeway");

    let signer = audit_signer(&config);
    let validator = session_validator(&config)?;
    let explainer = match_explainer(&config)?;
    let reference = Arc::new(reference_source(&config).load()?);
    let matching = MatchingSettings {
        min_score: config.matching.min_score,
        explain_timeout: config.ai.timeout(),
    };

    let bootstrap_admins = config
        .auth
        .bootstrap_admin_subjects()
        .into_iter()
        .map(UserId::new)
        .collect::<Result<HashSet<_>, _>>()?;

    let state = match config.database.url() {
        Some(url) => {
            let pool = PostgresStore::connect(&config.database, url).await?;
            let store = PostgresStore::new(pool, signer.clone());
            if config.database.run_migrations {
                store.migrate().await?;
            }
            tracing::info!("Using PostgreSQL store");
            AppState::from_store(Arc::new(store), signer, explainer, reference, matching)
        }
        None => {
            tracing::warn!("No database configured, data is kept in memory only");
            let store = InMemoryStore::new(signer.clone());
            AppState::from_store(Arc::new(store), signer, explainer, reference, matching)
        }
    };

    let state = state.with_bootstrap_admins(bootstrap_admins);

    let app = with_http_layers(api_router(state, validator), &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Bridgeway stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Development runs without a configured key get a per-process key; the
/// chain then only verifies within that process.
fn audit_signer(config: &AppConfig) -> AuditSigner {
    match &config.audit.signing_key {
        Some(key) => AuditSigner::new(key.clone()),
        None => {
            tracing::warn!("No audit signing key configured, using an ephemeral key");
            AuditSigner::new(Secret::new(format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            )))
        }
    }
}

fn session_validator(config: &AppConfig) -> Result<Arc<dyn SessionValidator>, BoxError> {
    if let (Some(issuer), Some(audience)) = (&config.auth.issuer_url, &config.auth.audience) {
        let oidc = OidcConfig::new(issuer.clone(), audience.clone())
            .with_cache_duration(config.auth.jwks_cache_ttl());
        tracing::info!(issuer = %issuer, "Using OIDC session validator");
        return Ok(Arc::new(OidcSessionValidator::new(oidc)?));
    }

    let entries = config.auth.dev_token_entries()?;
    tracing::warn!(tokens = entries.len(), "Using development tokens for authentication");
    Ok(Arc::new(MockSessionValidator::from_entries(entries)?))
}

fn match_explainer(config: &AppConfig) -> Result<Arc<dyn MatchExplainer>, BoxError> {
    match config.ai.active_key() {
        Some(key) => {
            let provider = AnthropicProvider::new(
                AnthropicConfig::new(key.clone())
                    .with_model(config.ai.model.clone())
                    .with_timeout(config.ai.timeout()),
            )?;
            tracing::info!(model = %config.ai.model, "Using AI match explainer");
            Ok(Arc::new(AiMatchExplainer::new(
                Arc::new(provider),
                config.ai.max_tokens,
            )))
        }
        None => Ok(Arc::new(TemplateExplainer)),
    }
}

fn reference_source(config: &AppConfig) -> Box<dyn ReferenceDataSource> {
    match &config.matching.reference_data_path {
        Some(path) => Box::new(YamlFileReferenceSource::new(path.clone())),
        None => Box::new(BuiltinReferenceSource),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
