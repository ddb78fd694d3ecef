//! Account service: signup/login for password-based and Google-authenticated
//! accounts against the users collection.
//!
//! Password accounts are keyed by username and store a bcrypt hash; Google
//! accounts store no credential and are keyed by email.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, AppResult};
use crate::models::UserAccount;
use crate::store::{Collection, Store};

pub async fn signup(store: &Store, name: &str, username: &str, password: &str) -> AppResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password required".to_string(),
        ));
    }

    let mut users: Vec<UserAccount> = store.load(&Collection::Users).await;

    if users.iter().any(|u| u.username.as_deref() == Some(username)) {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let hashed = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash credential: {}", e)))?;

    users.push(UserAccount {
        name: name.to_string(),
        username: Some(username.to_string()),
        password: Some(hashed),
        ..Default::default()
    });
    store.save(&Collection::Users, &users).await;

    tracing::info!(username = %username, "Account created");
    Ok(())
}

pub async fn login(store: &Store, username: &str, password: &str) -> AppResult<UserAccount> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password required".to_string(),
        ));
    }

    let users: Vec<UserAccount> = store.load(&Collection::Users).await;

    let user = users
        .iter()
        .find(|u| u.username.as_deref() == Some(username) && !u.google_auth)
        .ok_or(AppError::InvalidCredentials)?;

    let stored = user.password.as_deref().ok_or(AppError::InvalidCredentials)?;
    let matches = verify(password, stored)
        .map_err(|e| AppError::Internal(format!("Failed to verify credential: {}", e)))?;
    if !matches {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user.sanitized())
}

pub async fn google_signup(
    store: &Store,
    name: &str,
    email: &str,
    profile_image: Option<String>,
) -> AppResult<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Google user info missing".to_string(),
        ));
    }

    let mut users: Vec<UserAccount> = store.load(&Collection::Users).await;

    if users.iter().any(|u| u.email.as_deref() == Some(email)) {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    users.push(UserAccount {
        name: name.to_string(),
        email: Some(email.to_string()),
        google_auth: true,
        profile_image,
        ..Default::default()
    });
    store.save(&Collection::Users, &users).await;

    tracing::info!(email = %email, "Google account created");
    Ok(())
}

pub async fn google_login(store: &Store, email: &str) -> AppResult<UserAccount> {
    if email.trim().is_empty() {
        return Err(AppError::InvalidInput("Email required".to_string()));
    }

    let users: Vec<UserAccount> = store.load(&Collection::Users).await;

    users
        .iter()
        .find(|u| u.email.as_deref() == Some(email) && u.google_auth)
        .map(UserAccount::sanitized)
        // Unknown email is a failed login, same 401 class as the password path
        .ok_or(AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use std::sync::Arc;

    fn memory_store() -> Store {
        Store::new(Arc::new(MemoryBackend::default()))
    }

    #[tokio::test]
    async fn signup_then_login_round_trips() {
        let store = memory_store();

        signup(&store, "Asha", "asha", "hunter2").await.unwrap();
        let user = login(&store, "asha", "hunter2").await.unwrap();

        assert_eq!(user.username.as_deref(), Some("asha"));
        // Credential never leaves the service
        assert!(user.password.is_none());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_username() {
        let store = memory_store();

        signup(&store, "Asha", "asha", "hunter2").await.unwrap();
        let err = signup(&store, "Other", "asha", "secret").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn signup_requires_username_and_password() {
        let store = memory_store();

        let err = signup(&store, "Asha", "", "hunter2").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = signup(&store, "Asha", "asha", "").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let store = memory_store();

        signup(&store, "Asha", "asha", "hunter2").await.unwrap();
        let err = login(&store, "asha", "wrong").await.unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user() {
        let store = memory_store();

        let err = login(&store, "ghost", "hunter2").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn google_accounts_key_on_email() {
        let store = memory_store();

        google_signup(&store, "Asha", "asha@example.com", None)
            .await
            .unwrap();

        let err = google_signup(&store, "Imposter", "asha@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let user = google_login(&store, "asha@example.com").await.unwrap();
        assert!(user.google_auth);
        assert!(user.password.is_none());
    }

    #[tokio::test]
    async fn google_login_unknown_email_is_unauthorized() {
        let store = memory_store();

        let err = google_login(&store, "ghost@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn password_login_ignores_google_accounts() {
        let store = memory_store();

        google_signup(&store, "Asha", "asha@example.com", None)
            .await
            .unwrap();

        let err = login(&store, "asha", "anything").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
