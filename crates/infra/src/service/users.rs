use chrono::Utc;
use serde::Serialize;

use omnistock_auth::{ActivateUser, DeactivateUser, Permission, Role, User, UserCommand};
use omnistock_core::{Aggregate, DomainError, UserId};
use omnistock_events::Event;

use super::{InventoryService, ServiceError};
use crate::persistence::SnapshotStore;

/// User as shown to admins (no credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_typed(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            role: user.role(),
            active: user.is_active(),
        }
    }
}

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    pub fn list_users(&self) -> Result<Vec<UserSummary>, ServiceError> {
        let principal = self.require(&Permission::USERS_READ)?;
        Ok(self
            .state
            .users
            .list(&principal.org_code)
            .iter()
            .map(UserSummary::from)
            .collect())
    }

    /// Activate or deactivate a user of the admin's organization.
    pub fn set_user_active(&mut self, user_id: UserId, active: bool) -> Result<UserSummary, ServiceError> {
        let principal = self.require(&Permission::USERS_WRITE)?;

        self.commit(|state| {
            let user = state
                .users
                .get_mut(&principal.org_code, &user_id)
                .ok_or(DomainError::NotFound)?;
            let command = if active {
                UserCommand::Activate(ActivateUser {
                    org_code: principal.org_code.clone(),
                    user_id,
                    occurred_at: Utc::now(),
                })
            } else {
                UserCommand::Deactivate(DeactivateUser {
                    org_code: principal.org_code.clone(),
                    user_id,
                    actor_id: principal.user_id,
                    occurred_at: Utc::now(),
                })
            };
            for event in user.execute(&command)? {
                tracing::info!(
                    org_code = %principal.org_code,
                    user_id = %user_id,
                    event_type = event.event_type(),
                    "user event"
                );
            }
            Ok(UserSummary::from(&*user))
        })
    }
}
