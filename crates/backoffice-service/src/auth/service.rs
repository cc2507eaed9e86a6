//! Credential check and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use backoffice_auth::{JwtEncoder, PasswordHasher};
use backoffice_core::config::AuthConfig;
use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::UserId;
use backoffice_database::repositories::UserRepository;

/// Public part of an account returned by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    /// Account ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
}

/// Successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// Token expiry.
    #[serde(skip_serializing)]
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: LoginUser,
}

/// Verifies credentials and issues access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(user_repo: Arc<UserRepository>, config: &AuthConfig) -> Self {
        Self {
            user_repo,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
        }
    }

    /// Check email and password and issue a token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let invalid = || AppError::authentication("Invalid credentials");

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            warn!(email = %email, "Login attempt for unknown account");
            return Err(invalid());
        };
        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid());
        }

        let (token, expires_at) = self.encoder.issue(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            token,
            expires_at,
            user: LoginUser {
                id: user.id,
                email: user.email,
            },
        })
    }

    /// Create the configured bootstrap account when it does not exist yet.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_bootstrap_admin(&self, config: &AuthConfig) -> AppResult<bool> {
        let (Some(email), Some(password)) = (
            config.bootstrap_admin_email.as_deref(),
            config.bootstrap_admin_password.as_deref(),
        ) else {
            return Ok(false);
        };

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(false);
        }
        if password.len() < 8 {
            return Err(AppError::configuration(
                "Bootstrap admin password must be at least 8 characters",
            ));
        }

        let hash = self.hasher.hash_password(password)?;
        let user = self.user_repo.create(email, &hash).await?;
        info!(user_id = %user.id, email = %user.email, "Bootstrap admin account created");
        Ok(true)
    }
}
