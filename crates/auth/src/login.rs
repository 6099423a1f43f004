use crate::{AuthError, CredentialHasher, User};

/// Case-insensitive email lookup.
pub fn find_by_email<'a, I>(users: I, email: &str) -> Option<&'a User>
where
    I: IntoIterator<Item = &'a User>,
{
    users.into_iter().find(|u| u.has_email(email))
}

/// Resolve a user from credentials.
///
/// The password is verified before the active flag is looked at, so an
/// inactive account is only reported to someone who knows its password.
pub fn authenticate<'a, I>(
    users: I,
    email: &str,
    password: &str,
    hasher: &CredentialHasher,
) -> Result<&'a User, AuthError>
where
    I: IntoIterator<Item = &'a User>,
{
    let user = find_by_email(users, email).ok_or(AuthError::UnknownUser)?;

    let verified = user
        .password_hash()
        .is_some_and(|hash| hasher.verify(password, hash));
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active() {
        return Err(AuthError::InactiveUser);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeactivateUser, HashingParams, RegisterUser, Role, UserCommand};
    use chrono::Utc;
    use omnistock_core::{Aggregate, OrgCode, UserId};

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(HashingParams::low_cost()).unwrap()
    }

    fn user(hasher: &CredentialHasher, email: &str, active: bool) -> User {
        let org = OrgCode::parse("OMNI-DEMO").unwrap();
        let id = UserId::new();
        let mut user = User::empty(id, org.clone());
        user.execute(&UserCommand::Register(RegisterUser {
            org_code: org.clone(),
            user_id: id,
            email: email.to_string(),
            name: "User".to_string(),
            role: Role::Employee,
            password_hash: hasher.hash("omnistock-demo").unwrap(),
            occurred_at: Utc::now(),
        }))
        .unwrap();
        if !active {
            user.execute(&UserCommand::Deactivate(DeactivateUser {
                org_code: org,
                user_id: id,
                actor_id: UserId::new(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        }
        user
    }

    #[test]
    fn authenticates_case_insensitively() {
        let hasher = hasher();
        let users = vec![user(&hasher, "seller@omnistock.com", true)];

        let found = authenticate(&users, "SELLER@OmniStock.com", "omnistock-demo", &hasher).unwrap();
        assert_eq!(found.email(), "seller@omnistock.com");
    }

    #[test]
    fn non_ascii_emails_match_in_any_case() {
        let hasher = hasher();
        let users = vec![user(&hasher, "Élodie@acme.com", true)];

        let found = authenticate(&users, "ÉLODIE@ACME.COM", "omnistock-demo", &hasher).unwrap();
        assert_eq!(found.email(), "élodie@acme.com");
        assert!(find_by_email(&users, " élodie@Acme.com ").is_some());
    }

    #[test]
    fn unknown_email_is_reported() {
        let hasher = hasher();
        let users = vec![user(&hasher, "seller@omnistock.com", true)];

        assert_eq!(
            authenticate(&users, "nobody@omnistock.com", "omnistock-demo", &hasher).unwrap_err(),
            AuthError::UnknownUser
        );
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hasher = hasher();
        let users = vec![user(&hasher, "seller@omnistock.com", true)];

        assert_eq!(
            authenticate(&users, "seller@omnistock.com", "not-the-password", &hasher).unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn inactive_user_is_rejected_after_password_check() {
        let hasher = hasher();
        let users = vec![user(&hasher, "inactive@omnistock.com", false)];

        assert_eq!(
            authenticate(&users, "inactive@omnistock.com", "omnistock-demo", &hasher).unwrap_err(),
            AuthError::InactiveUser
        );
        assert_eq!(
            authenticate(&users, "inactive@omnistock.com", "guess", &hasher).unwrap_err(),
            AuthError::InvalidCredentials
        );
    }
}
