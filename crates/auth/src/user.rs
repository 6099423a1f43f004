//! User aggregate: registration and activation lifecycle.
//!
//! A user belongs to exactly one organization for its whole life and is
//! identified across organizations by its (lower-cased) email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use omnistock_core::{Aggregate, AggregateRoot, DomainError, Entity, OrgCode, UserId};
use omnistock_events::{Event, TenantScoped};

use crate::{Principal, Role};

/// User aggregate.
///
/// # Invariants
/// - `org_code` is immutable after registration.
/// - `email` is trimmed and lower-cased.
/// - A user without a password hash can never authenticate.
/// - Users cannot deactivate themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    org_code: OrgCode,
    email: String,
    name: String,
    role: Role,
    active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    version: u64,
    created: bool,
}

impl User {
    pub fn empty(id: UserId, org_code: OrgCode) -> Self {
        Self {
            id,
            org_code,
            email: String::new(),
            name: String::new(),
            role: Role::Employee,
            active: false,
            password_hash: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Case-insensitive email comparison. Stored emails are already
    /// lower-cased, so the candidate gets the same full Unicode folding.
    pub fn has_email(&self, email: &str) -> bool {
        self.email == email.trim().to_lowercase()
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            org_code: self.org_code.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }

    fn ensure_existing(&self, org_code: &OrgCode, user_id: UserId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::NotFound);
        }
        if &self.org_code != org_code {
            return Err(DomainError::invariant("tenant mismatch"));
        }
        if self.id != user_id {
            return Err(DomainError::invariant("user_id mismatch"));
        }
        Ok(())
    }
}

impl AggregateRoot for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Entity for User {
    type Id = UserId;

    fn entity_id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for User {
    fn org_code(&self) -> &OrgCode {
        &self.org_code
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Command to register a new user. `password_hash` is a PHC string produced by
/// `CredentialHasher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub org_code: OrgCode,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateUser {
    pub org_code: OrgCode,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateUser {
    pub org_code: OrgCode,
    pub user_id: UserId,
    /// The user performing the change.
    pub actor_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserCommand {
    Register(RegisterUser),
    Activate(ActivateUser),
    Deactivate(DeactivateUser),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistered {
    pub org_code: OrgCode,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivated {
    pub org_code: OrgCode,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeactivated {
    pub org_code: OrgCode,
    pub user_id: UserId,
    pub actor_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserEvent {
    Registered(UserRegistered),
    Activated(UserActivated),
    Deactivated(UserDeactivated),
}

impl Event for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Registered(_) => "auth.user.registered",
            UserEvent::Activated(_) => "auth.user.activated",
            UserEvent::Deactivated(_) => "auth.user.deactivated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Registered(e) => e.occurred_at,
            UserEvent::Activated(e) => e.occurred_at,
            UserEvent::Deactivated(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for User {
    type Command = UserCommand;
    type Event = UserEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            UserEvent::Registered(e) => {
                self.id = e.user_id;
                self.org_code = e.org_code.clone();
                self.email = e.email.clone();
                self.name = e.name.clone();
                self.role = e.role;
                self.password_hash = Some(e.password_hash.clone());
                self.active = true;
                self.created = true;
            }
            UserEvent::Activated(_) => self.active = true,
            UserEvent::Deactivated(_) => self.active = false,
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            UserCommand::Register(cmd) => self.handle_register(cmd),
            UserCommand::Activate(cmd) => self.handle_activate(cmd),
            UserCommand::Deactivate(cmd) => self.handle_deactivate(cmd),
        }
    }
}

impl User {
    fn handle_register(&self, cmd: &RegisterUser) -> Result<Vec<UserEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("user already exists"));
        }
        if self.org_code != cmd.org_code {
            return Err(DomainError::invariant("tenant mismatch"));
        }

        let email = cmd.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.password_hash.is_empty() {
            return Err(DomainError::validation("password hash cannot be empty"));
        }

        Ok(vec![UserEvent::Registered(UserRegistered {
            org_code: cmd.org_code.clone(),
            user_id: cmd.user_id,
            email: email.to_lowercase(),
            name: cmd.name.trim().to_string(),
            role: cmd.role,
            password_hash: cmd.password_hash.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_activate(&self, cmd: &ActivateUser) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_existing(&cmd.org_code, cmd.user_id)?;

        if self.active {
            return Err(DomainError::invariant("user already active"));
        }

        Ok(vec![UserEvent::Activated(UserActivated {
            org_code: cmd.org_code.clone(),
            user_id: cmd.user_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateUser) -> Result<Vec<UserEvent>, DomainError> {
        self.ensure_existing(&cmd.org_code, cmd.user_id)?;

        if cmd.actor_id == cmd.user_id {
            return Err(DomainError::invariant("users cannot deactivate themselves"));
        }
        if !self.active {
            return Err(DomainError::invariant("user already inactive"));
        }

        Ok(vec![UserEvent::Deactivated(UserDeactivated {
            org_code: cmd.org_code.clone(),
            user_id: cmd.user_id,
            actor_id: cmd.actor_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org() -> OrgCode {
        OrgCode::parse("OMNI-DEMO").unwrap()
    }

    fn registered(email: &str, role: Role) -> User {
        let id = UserId::new();
        let mut user = User::empty(id, org());
        user.execute(&UserCommand::Register(RegisterUser {
            org_code: org(),
            user_id: id,
            email: email.to_string(),
            name: "Demo User".to_string(),
            role,
            password_hash: "$argon2id$placeholder".to_string(),
            occurred_at: Utc::now(),
        }))
        .unwrap();
        user
    }

    fn deactivate(user: &User, actor_id: UserId) -> UserCommand {
        UserCommand::Deactivate(DeactivateUser {
            org_code: org(),
            user_id: user.id_typed(),
            actor_id,
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn registration_normalizes_email_and_activates() {
        let user = registered("  Admin@OmniStock.com ", Role::Admin);

        assert_eq!(user.email(), "admin@omnistock.com");
        assert!(user.has_email("ADMIN@omnistock.COM"));
        assert!(user.is_active());
        assert_eq!(user.version(), 1);
        assert_eq!(user.principal().role, Role::Admin);
    }

    #[test]
    fn registration_rejects_malformed_email_and_blank_name() {
        let user = User::empty(UserId::new(), org());
        let base = RegisterUser {
            org_code: org(),
            user_id: user.id_typed(),
            email: "not-an-email".to_string(),
            name: "Someone".to_string(),
            role: Role::Employee,
            password_hash: "$argon2id$placeholder".to_string(),
            occurred_at: Utc::now(),
        };
        assert!(matches!(
            user.handle(&UserCommand::Register(base.clone())),
            Err(DomainError::Validation(_))
        ));

        let blank_name = RegisterUser {
            email: "someone@omnistock.com".to_string(),
            name: "   ".to_string(),
            ..base
        };
        assert!(matches!(
            user.handle(&UserCommand::Register(blank_name)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn deactivate_then_activate() {
        let admin = registered("admin@omnistock.com", Role::Admin);
        let mut seller = registered("seller@omnistock.com", Role::Employee);

        seller.execute(&deactivate(&seller, admin.id_typed())).unwrap();
        assert!(!seller.is_active());

        seller
            .execute(&UserCommand::Activate(ActivateUser {
                org_code: org(),
                user_id: seller.id_typed(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        assert!(seller.is_active());
        assert_eq!(seller.version(), 3);
    }

    #[test]
    fn users_cannot_deactivate_themselves() {
        let admin = registered("admin@omnistock.com", Role::Admin);
        let err = admin.handle(&deactivate(&admin, admin.id_typed())).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn legacy_record_without_hash_deserializes() {
        let user = registered("admin@omnistock.com", Role::Admin);
        let mut json = serde_json::to_value(&user).unwrap();
        json.as_object_mut().unwrap().remove("password_hash");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.password_hash(), None);
        assert_eq!(back.email(), "admin@omnistock.com");
    }
}
