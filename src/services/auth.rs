//! Authentication and account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Claims, LoginRequest, RegisterRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account.
    ///
    /// The duplicate check runs before input validation: a taken username
    /// reports `Conflict` even when the password is also malformed.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<()> {
        if self
            .repository
            .users
            .username_exists(&request.username)
            .await?
        {
            return Err(AppError::Conflict(
                "Username already registered".to_string(),
            ));
        }

        validate_registration(&request)?;

        let password_hash = self.hash_password(&request.password)?;
        self.repository
            .users
            .create(&request.username, &password_hash, request.role)
            .await?;

        tracing::info!(username = %request.username, role = %request.role, "account registered");

        Ok(())
    }

    /// Authenticate by username and password, returning a signed bearer token
    pub async fn login(&self, request: &LoginRequest) -> AppResult<String> {
        let user = self
            .repository
            .users
            .get_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username".to_string()))?;

        if !self.verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        let claims = Claims::new(&user.username, user.role, self.config.token_ttl_minutes);
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Decode a bearer token and confirm its subject still exists.
    ///
    /// The claims carried by the token drive authorization; the lookup only
    /// rejects tokens whose account has since been removed.
    pub async fn authenticate_token(&self, token: &str) -> AppResult<Claims> {
        let claims = Claims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid token".to_string()))?;

        self.repository
            .users
            .get_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

        Ok(claims)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against its stored hash
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Map validator output to a single error, username problems first so the
/// reported failure is deterministic when both fields are bad.
fn validate_registration(request: &RegisterRequest) -> AppResult<()> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let field_errors = errors.field_errors();
    for field in ["username", "password"] {
        if let Some(error) = field_errors.get(field).and_then(|list| list.first()) {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            return Err(AppError::Validation(message));
        }
    }

    Err(AppError::Validation("Invalid input".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn accepts_compliant_registration() {
        assert!(validate_registration(&request("alice", "passw0rd")).is_ok());
    }

    #[test]
    fn rejects_empty_username_first() {
        let err = validate_registration(&request("", "short")).unwrap_err();
        match err {
            AppError::Validation(message) => assert_eq!(message, "Invalid username"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_policy_violating_password() {
        for bad in ["short1", "allletters", "12345678", "has space1", "pass-w0rd"] {
            let err = validate_registration(&request("alice", bad)).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref m) if m.starts_with("Password must be")),
                "password {:?} should violate the policy",
                bad
            );
        }
    }
}
