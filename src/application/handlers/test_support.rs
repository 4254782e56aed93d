//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::memory::{test_store, InMemoryStore};
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditLogEntry, AuditQuery, AuditRecord};
use crate::domain::business::{fixtures::draft, BusinessProfile};
use crate::domain::connection::{Connection, ConnectionMessage};
use crate::domain::foundation::{
    AuthenticatedUser, BusinessId, CommandMetadata, ConnectionId, Role, UserId,
};
use crate::domain::investor::{fixtures::input, InvestorPreferences};
use crate::domain::user::{User, UserStatus};
use crate::ports::{
    AuditLog, BusinessRepository, ConnectionRepository, InvestorPreferencesRepository,
    MessageRepository, UserRepository,
};

pub(crate) struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub guard: Arc<AuthorizationGuard>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(test_store());
        let guard = Arc::new(AuthorizationGuard::new(store.clone(), store.clone()));
        Self { store, guard }
    }

    /// Provisions an active user with `role`.
    pub async fn user(&self, id: &str, role: Role) -> UserId {
        self.provision(id, role, None).await
    }

    pub async fn regulator(&self, id: &str, jurisdiction: &str) -> UserId {
        self.provision(id, Role::Regulator, Some(jurisdiction)).await
    }

    async fn provision(&self, id: &str, role: Role, jurisdiction: Option<&str>) -> UserId {
        let user_id = UserId::new(id).unwrap();
        let mut user = User::provision(&AuthenticatedUser::new(user_id.clone(), None, None));
        if role != Role::User {
            user.change_role(role, jurisdiction.map(str::to_string)).unwrap();
        }
        UserRepository::insert_if_absent(
            self.store.as_ref(),
            &user,
            &AuditRecord::by(&user_id, AuditAction::UserProvisioned),
        )
        .await
        .unwrap();
        user_id
    }

    pub async fn set_status(&self, id: &UserId, status: UserStatus) {
        let mut user = UserRepository::find_by_id(self.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap();
        user.change_status(status).unwrap();
        UserRepository::update(
            self.store.as_ref(),
            &user,
            &AuditRecord::by(id, AuditAction::UserStatusUpdated),
        )
        .await
        .unwrap();
    }

    /// Stores a Nigerian early-stage business asking for 20k.
    pub async fn business(&self, owner: &UserId, sector: &str, state: &str) -> BusinessProfile {
        let business =
            BusinessProfile::new(BusinessId::new(), owner.clone(), draft(sector, state, Some(20_000)))
                .unwrap();
        BusinessRepository::insert(
            self.store.as_ref(),
            &business,
            &AuditRecord::by(owner, AuditAction::BusinessProfileCreated),
        )
        .await
        .unwrap();
        business
    }

    pub async fn preferences(&self, investor: &UserId, sectors: &[&str], regions: &[&str]) {
        let prefs =
            InvestorPreferences::new(investor.clone(), input(sectors, regions, 10_000, 50_000))
                .unwrap();
        self.store
            .save(&prefs, &AuditRecord::by(investor, AuditAction::InvestorPreferencesSaved))
            .await
            .unwrap();
    }

    /// Stores a `lead` connection between `investor` and `business`.
    pub async fn connection(&self, business: &BusinessProfile, investor: &UserId) -> Connection {
        let connection = Connection::initiate(
            ConnectionId::new(),
            *business.id(),
            business.owner_id().clone(),
            investor.clone(),
        )
        .unwrap();
        ConnectionRepository::insert_if_absent(
            self.store.as_ref(),
            &connection,
            &AuditRecord::by(investor, AuditAction::ConnectionInitiated),
        )
        .await
        .unwrap();
        connection
    }

    /// Stores a `bank_statement` request from `requester`.
    pub async fn document_request(&self, connection: &Connection, requester: &UserId) -> ConnectionMessage {
        let message = ConnectionMessage::document_request(
            *connection.id(),
            requester.clone(),
            "bank_statement",
            None,
            None,
        )
        .unwrap();
        MessageRepository::insert(
            self.store.as_ref(),
            &message,
            &AuditRecord::by(requester, AuditAction::DocumentRequested),
        )
        .await
        .unwrap();
        message
    }

    pub async fn audit_entries(&self, query: AuditQuery) -> Vec<AuditLogEntry> {
        self.store.list(&query).await.unwrap()
    }

    pub async fn count_action(&self, action: AuditAction) -> usize {
        self.audit_entries(AuditQuery {
            action: Some(action),
            ..Default::default()
        })
        .await
        .len()
    }
}

pub(crate) fn meta(user_id: &UserId) -> CommandMetadata {
    CommandMetadata::new(user_id.clone()).with_source("test")
}
