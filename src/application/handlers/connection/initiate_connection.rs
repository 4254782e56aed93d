//! InitiateConnectionHandler - investor opens a relationship with a business.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{Connection, ConnectionError};
use crate::domain::foundation::{BusinessId, CommandMetadata, ConnectionId, Role};
use crate::ports::{BusinessRepository, ConnectionRepository, SaveResult};

#[derive(Debug, Clone)]
pub struct InitiateConnectionCommand {
    pub business_id: BusinessId,
}

#[derive(Debug, Clone)]
pub struct InitiateConnectionResult {
    pub connection: Connection,
    /// False when the pair was already connected.
    pub created: bool,
}

pub struct InitiateConnectionHandler {
    businesses: Arc<dyn BusinessRepository>,
    connections: Arc<dyn ConnectionRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl InitiateConnectionHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        connections: Arc<dyn ConnectionRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            connections,
            guard,
        }
    }

    /// Creates a `lead` connection, or returns the existing one unchanged.
    pub async fn handle(
        &self,
        cmd: InitiateConnectionCommand,
        metadata: CommandMetadata,
    ) -> Result<InitiateConnectionResult, ConnectionError> {
        let investor = self
            .guard
            .require_role(&metadata.user_id, &[Role::Investor], AccessMode::Mutation)
            .await?;

        let business = self
            .businesses
            .find_by_id(&cmd.business_id)
            .await?
            .ok_or(ConnectionError::BusinessNotFound(cmd.business_id))?;

        if let Some(existing) = self
            .connections
            .find_by_pair(business.id(), &investor.user_id)
            .await?
        {
            return Ok(InitiateConnectionResult {
                connection: existing,
                created: false,
            });
        }

        let connection = Connection::initiate(
            ConnectionId::new(),
            *business.id(),
            business.owner_id().clone(),
            investor.user_id.clone(),
        )?;
        let audit = AuditRecord::by(&investor.user_id, AuditAction::ConnectionInitiated)
            .on("connection", connection.id())
            .with_new_state(connection.status())
            .with_metadata(serde_json::json!({ "businessId": business.id().to_string() }));

        // The store's unique pair key settles concurrent initiations.
        match self.connections.insert_if_absent(&connection, &audit).await? {
            SaveResult::Inserted => {
                tracing::info!(
                    connection_id = %connection.id(),
                    investor_id = %investor.user_id,
                    business_id = %business.id(),
                    "Connection initiated"
                );
                Ok(InitiateConnectionResult {
                    connection,
                    created: true,
                })
            }
            SaveResult::AlreadyExists(existing) => Ok(InitiateConnectionResult {
                connection: existing,
                created: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::connection::ConnectionStatus;

    fn handler(ctx: &TestContext) -> InitiateConnectionHandler {
        InitiateConnectionHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
    }

    #[tokio::test]
    async fn initiating_twice_yields_one_connection() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let cmd = InitiateConnectionCommand {
            business_id: *business.id(),
        };

        let first = handler(&ctx).handle(cmd.clone(), meta(&investor)).await.unwrap();
        let second = handler(&ctx).handle(cmd, meta(&investor)).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.connection.id(), second.connection.id());
        assert_eq!(first.connection.status(), ConnectionStatus::Lead);
        assert_eq!(ctx.count_action(AuditAction::ConnectionInitiated).await, 1);
        let listed = ConnectionRepository::list_for_participant(ctx.store.as_ref(), &investor)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_initiations_resolve_to_one_record() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let handler = Arc::new(handler(&ctx));
        let cmd = InitiateConnectionCommand {
            business_id: *business.id(),
        };

        let (a, b) = tokio::join!(
            handler.handle(cmd.clone(), meta(&investor)),
            handler.handle(cmd.clone(), meta(&investor))
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.connection.id(), b.connection.id());
        assert_eq!(u8::from(a.created) + u8::from(b.created), 1);
    }

    #[tokio::test]
    async fn business_owner_cannot_initiate() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;

        let err = handler(&ctx)
            .handle(
                InitiateConnectionCommand {
                    business_id: *business.id(),
                },
                meta(&owner),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_business_is_not_found() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let missing = BusinessId::new();

        let err = handler(&ctx)
            .handle(InitiateConnectionCommand { business_id: missing }, meta(&investor))
            .await
            .unwrap_err();
        assert_eq!(err, ConnectionError::BusinessNotFound(missing));
    }
}
