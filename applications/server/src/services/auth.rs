/// Authentication service - password hashing, signup and login
use crate::error::{Result, ServerError};
use crate::config::BCRYPT_COST_RANGE;
use soundcheck_core::{storage::StorageContext, types::NewUser, SoundcheckError, User};

/// Credential codec plus the signup/login flows built on it
///
/// bcrypt is CPU bound, so hashing and verification run on the blocking
/// thread pool instead of an executor thread.
#[derive(Debug, Clone)]
pub struct AuthService {
    cost: u32,
}

impl AuthService {
    pub fn new(cost: u32) -> Result<Self> {
        if !BCRYPT_COST_RANGE.contains(&cost) {
            return Err(ServerError::Config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                cost
            )));
        }

        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| SoundcheckError::Credential(e.to_string()).into())
    }

    /// Verify a password against a hash
    ///
    /// A malformed hash (including the marker stored for implicitly created
    /// users) verifies as `false`.
    pub async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();

        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::debug!("password verification rejected hash: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("verification task failed: {}", e);
                false
            }
        }
    }

    /// Register a credentialed user
    pub async fn register(
        &self,
        store: &dyn StorageContext,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SoundcheckError::invalid_input(
                "username, email and password are required",
            )
            .into());
        }

        let password_hash = self.hash_password(password).await?;

        let user = store
            .register_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(username = %user.username, "registered user");

        Ok(user)
    }

    /// Check an email/password pair and return the username it belongs to
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn authenticate(
        &self,
        store: &dyn StorageContext,
        email: &str,
        password: &str,
    ) -> Result<String> {
        let Some(credentials) = store.find_credentials_by_email(email).await? else {
            return Err(SoundcheckError::Unauthorized.into());
        };

        if !self
            .verify_password(password, &credentials.password_hash)
            .await
        {
            return Err(SoundcheckError::Unauthorized.into());
        }

        Ok(credentials.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundcheck_core::types::UNUSABLE_PASSWORD_HASH;

    #[tokio::test]
    async fn test_password_hashing() {
        let auth = AuthService::new(4).unwrap();
        let password = "my_secure_password";

        let hash = auth.hash_password(password).await.unwrap();
        assert!(auth.verify_password(password, &hash).await);
        assert!(!auth.verify_password("wrong_password", &hash).await);
    }

    #[tokio::test]
    async fn test_malformed_hash_never_verifies() {
        let auth = AuthService::new(4).unwrap();

        assert!(!auth.verify_password("anything", UNUSABLE_PASSWORD_HASH).await);
        assert!(!auth.verify_password("", "").await);
    }

    #[test]
    fn test_cost_bounds() {
        assert!(AuthService::new(3).is_err());
        assert!(AuthService::new(32).is_err());
        assert_eq!(AuthService::new(14).unwrap().cost(), 14);
    }
}
