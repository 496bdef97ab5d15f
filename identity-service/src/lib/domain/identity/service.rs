use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::TokenPair;
use auth::TokenType;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::IdentitySettings;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RefreshPolicy;
use crate::domain::identity::models::SignUpCommand;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;

/// Well-formed Argon2id hash with default cost, verified against when the
/// email is unknown so both login failures cost the same.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$3Q9ZCIj/nPy82GvGYYb5Tg$4aqVB2Sr3K9Z3RufcJTlphUhWtCdrtBS7OAgU9FWB1o";

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
/// Every operation is a single pass; failures are returned, never retried.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
    settings: IdentitySettings,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Credential and token operations
    /// * `settings` - Hashing timeout and refresh policy
    pub fn new(
        repository: Arc<IR>,
        authenticator: Arc<Authenticator>,
        settings: IdentitySettings,
    ) -> Self {
        Self {
            repository,
            authenticator,
            settings,
        }
    }

    /// Run CPU-heavy credential work on the blocking pool, bounded by the
    /// configured timeout. An abandoned task has no persisted side effect.
    async fn run_blocking<T, F>(&self, task: F) -> Result<T, IdentityError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        let handle = tokio::task::spawn_blocking(move || task(&*authenticator));

        match tokio::time::timeout(self.settings.hashing_timeout, handle).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(IdentityError::Hashing(format!(
                "Credential task failed: {}",
                e
            ))),
            Err(_) => Err(IdentityError::Hashing(format!(
                "Credential task exceeded {}ms",
                self.settings.hashing_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Identity, IdentityError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailAlreadyExists(command.email.to_string()));
        }

        let password = command.password;
        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.expose()))
            .await?
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;

        let identity = Identity {
            id: IdentityId::new(),
            email: command.email,
            password_hash,
        };

        let created = self.repository.create(identity).await?;
        tracing::info!(identity_id = %created.id, "Identity created");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, IdentityError> {
        let Some(identity) = self.repository.find_by_email(&command.email).await? else {
            let password = command.password;
            // outcome is irrelevant, only the work matters
            let _ = self
                .run_blocking(move |authenticator| {
                    authenticator.verify_password(password.expose(), DUMMY_PASSWORD_HASH)
                })
                .await;
            tracing::debug!("Login rejected: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let subject = identity.id.to_string();
        let stored_hash = identity.password_hash;
        let password = command.password;

        let tokens = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(password.expose(), &stored_hash, &subject)
            })
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(identity_id = %identity.id, "Login rejected: wrong password");
                    IdentityError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => IdentityError::Hashing(err.to_string()),
                AuthenticationError::JwtError(err) => IdentityError::Token(err),
            })?;

        tracing::info!(identity_id = %identity.id, "Token pair issued on login");
        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, IdentityError> {
        let subject = self
            .authenticator
            .validate_token(refresh_token, TokenType::Refresh)?;

        let identity_id = IdentityId::from_string(&subject)
            .map_err(|e| IdentityError::Token(JwtError::Malformed(e.to_string())))?;

        if self.settings.refresh_policy == RefreshPolicy::RequireActiveIdentity
            && self.repository.find_by_id(&identity_id).await?.is_none()
        {
            tracing::warn!(identity_id = %identity_id, "Refresh rejected: identity no longer exists");
            return Err(IdentityError::InvalidCredentials);
        }

        let tokens = self.authenticator.issue_tokens(&identity_id.to_string())?;
        tracing::info!(identity_id = %identity_id, "Token pair issued on refresh");

        Ok(tokens)
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }
}
