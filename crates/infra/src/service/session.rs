use chrono::Utc;

use omnistock_auth::{
    AuthError, RegisterUser, Session, SignUp, User, UserCommand, View, authenticate,
    resolve_signup_org,
};
use omnistock_core::{Aggregate, UserId};
use omnistock_events::Event;

use super::{InventoryService, ServiceError};
use crate::persistence::SnapshotStore;

impl<S> InventoryService<S>
where
    S: SnapshotStore,
{
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_view(&self) -> Option<View> {
        self.session.as_ref().map(Session::view)
    }

    /// Sign in by email (case-insensitive) and password.
    ///
    /// On failure the current session, if any, is kept.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session, ServiceError> {
        let principal = match authenticate(self.state.users.records(), email, password, &self.hasher) {
            Ok(user) => user.principal(),
            Err(err) => {
                tracing::info!(error = %err, "sign-in rejected");
                return Err(err.into());
            }
        };

        tracing::info!(
            org_code = %principal.org_code,
            user_id = %principal.user_id,
            role = %principal.role,
            "signed in"
        );
        Ok(self.session.insert(Session::start(principal)))
    }

    /// Create an account and sign it in.
    pub fn sign_up(&mut self, form: SignUp) -> Result<&Session, ServiceError> {
        if self.state.find_user_by_email(&form.email).is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let org_code = resolve_signup_org(
            form.role,
            form.org_code.as_deref(),
            &mut rand::thread_rng(),
            |code| self.state.org_exists(code),
        )?;
        let password_hash = self.hasher.hash(&form.password)?;

        let user_id = UserId::new();
        let principal = self.commit(|state| {
            let mut user = User::empty(user_id, org_code.clone());
            let events = user.execute(&UserCommand::Register(RegisterUser {
                org_code: org_code.clone(),
                user_id,
                email: form.email.clone(),
                name: form.name.clone(),
                role: form.role,
                password_hash,
                occurred_at: Utc::now(),
            }))?;
            for event in &events {
                tracing::info!(org_code = %org_code, user_id = %user_id, event_type = event.event_type(), "user event");
            }
            let principal = user.principal();
            state.users.upsert(user);
            Ok(principal)
        })?;

        Ok(self.session.insert(Session::start(principal)))
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = %session.principal().user_id, "signed out");
        }
    }

    /// Switch the active view. Views the role may not open are refused and the
    /// current view is kept.
    pub fn navigate(&mut self, view: View) -> Result<View, ServiceError> {
        let session = self.session.as_mut().ok_or(ServiceError::NotAuthenticated)?;
        session.navigate(view)?;
        Ok(session.view())
    }
}
