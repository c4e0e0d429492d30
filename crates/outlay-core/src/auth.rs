//! Account registration and credential checks.

use std::sync::Arc;

use chrono::Utc;
use outlay_domain::User;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    storage::UserStorage,
    validation::{LoginForm, RegistrationForm},
    CoreError,
};

/// Hex SHA-256 of `salt:password`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(user: &User, password: &str) -> bool {
    hash_password(password, &user.salt) == user.password_hash
}

pub struct AuthService<S: UserStorage + ?Sized> {
    users: Arc<S>,
}

impl<S: UserStorage + ?Sized> AuthService<S> {
    pub fn new(users: Arc<S>) -> Self {
        Self { users }
    }

    pub fn register(&self, form: &RegistrationForm) -> Result<User, CoreError> {
        let registration = form.validate()?;
        if self.users.find_user_by_email(&registration.email)?.is_some() {
            return Err(CoreError::EmailTaken(registration.email));
        }
        let salt = Uuid::new_v4().simple().to_string();
        let user = User {
            id: Uuid::new_v4(),
            name: registration.name,
            email: registration.email,
            password_hash: hash_password(&registration.password, &salt),
            salt,
            created_at: Utc::now(),
        };
        self.users.insert_user(user.clone())?;
        info!(user = %user.id, "account registered");
        Ok(user)
    }

    pub fn login(&self, form: &LoginForm) -> Result<User, CoreError> {
        let (email, password) = form.validate()?;
        match self.users.find_user_by_email(&email)? {
            Some(user) if verify_password(&user, &password) => Ok(user),
            _ => {
                warn!("rejected login attempt");
                Err(CoreError::InvalidCredentials)
            }
        }
    }

    pub fn user(&self, id: Uuid) -> Result<User, CoreError> {
        self.users
            .find_user(id)?
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn registration(email: &str) -> RegistrationForm {
        RegistrationForm {
            name: Some("Sam".into()),
            email: Some(email.into()),
            password: Some("secret1".into()),
        }
    }

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn hash_is_salted_hex_sha256() {
        let hash = hash_password("secret", "salt");
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_password("secret", "pepper"));
        assert_eq!(hash, hash_password("secret", "salt"));
    }

    #[test]
    fn register_then_login() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        let user = service.register(&registration("sam@example.com")).unwrap();
        assert_ne!(user.password_hash, "secret1");

        let logged_in = service.login(&login("SAM@example.com", "secret1")).unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(service.user(user.id).unwrap().email, "sam@example.com");
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        service.register(&registration("sam@example.com")).unwrap();
        assert!(matches!(
            service.register(&registration("Sam@Example.com")),
            Err(CoreError::EmailTaken(email)) if email == "sam@example.com"
        ));
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        service.register(&registration("sam@example.com")).unwrap();
        assert!(matches!(
            service.login(&login("sam@example.com", "wrong-pass")),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login(&login("nobody@example.com", "secret1")),
            Err(CoreError::InvalidCredentials)
        ));
    }
}
