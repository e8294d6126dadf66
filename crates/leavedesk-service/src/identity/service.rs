//! Registration, login and token resolution.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use leavedesk_auth::jwt::{JwtDecoder, JwtEncoder};
use leavedesk_auth::password::{PasswordHasher, PasswordValidator};
use leavedesk_auth::rbac::{Operation, RbacEnforcer};
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;
use leavedesk_database::store::IdentityStore;
use leavedesk_entity::identity::{Identity, NewIdentity, Role, normalize_email};

use crate::context::RequestContext;

/// Input for self-registration and admin-initiated registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Honoured only when an admin is the actor.
    pub role: Option<Role>,
}

/// A freshly issued token together with the identity it names.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub identity: Identity,
}

/// Handles identity creation, credential checks and bearer token
/// resolution.
#[derive(Debug, Clone)]
pub struct IdentityService {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    rbac: Arc<RbacEnforcer>,
    clock: Arc<dyn Clock>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        rbac: Arc<RbacEnforcer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities,
            hasher,
            validator,
            encoder,
            decoder,
            rbac,
            clock,
        }
    }

    /// Register a new identity and issue its token.
    ///
    /// The role is forced to `employee` unless `actor` is an admin who
    /// supplied one.
    pub async fn register(
        &self,
        input: Registration,
        actor: Option<&RequestContext>,
    ) -> Result<AuthOutcome, AppError> {
        let role = match (actor, input.role) {
            (Some(ctx), Some(role)) if ctx.is_admin() => role,
            _ => Role::Employee,
        };

        let identity = self
            .create_identity(
                &input.name,
                &input.email,
                &input.password,
                role,
                "User already exists",
            )
            .await?;
        let token = self.encoder.issue(&identity)?;

        info!(
            identity_id = %identity.id,
            role = %identity.role,
            by_admin = actor.is_some_and(|c| c.is_admin()),
            "Identity registered"
        );

        Ok(AuthOutcome { token, identity })
    }

    /// Admin-only registration with a chosen role.
    pub async fn register_by_admin(
        &self,
        ctx: &RequestContext,
        input: Registration,
    ) -> Result<AuthOutcome, AppError> {
        self.rbac.require(ctx.role, Operation::RegisterByAdmin)?;
        self.register(input, Some(ctx)).await
    }

    /// Check credentials and issue a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AppError> {
        let Some(identity) = self.identities.find_by_email(email).await? else {
            self.hasher.verify_dummy(password);
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !self.hasher.verify_password(password, &identity.password_hash)? {
            warn!(identity_id = %identity.id, "Failed login attempt");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = self.encoder.issue(&identity)?;
        info!(identity_id = %identity.id, role = %identity.role, "Login successful");
        Ok(AuthOutcome { token, identity })
    }

    /// Resolve a bearer token to the live identity it names.
    ///
    /// The identity must still exist and still hold the role in the token.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.decoder.decode(token)?;
        let role = claims.role()?;

        let identity = self
            .identities
            .find_by_id(claims.identity_id())
            .await?
            .filter(|i| i.role == role)
            .ok_or_else(|| AppError::unauthorized("Invalid token user"))?;

        Ok(identity)
    }

    /// The acting identity, re-read from the store.
    pub async fn me(&self, ctx: &RequestContext) -> Result<Identity, AppError> {
        self.rbac.require(ctx.role, Operation::Me)?;
        self.identities
            .find_by_id(ctx.identity_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid token user"))
    }

    /// Validate, hash and insert. `duplicate_message` is the conflict text
    /// reported when the email is already taken by any role.
    pub async fn create_identity(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        duplicate_message: &str,
    ) -> Result<Identity, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::validation("Valid email is required"));
        }
        self.validator.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let data = NewIdentity {
            name: name.to_string(),
            email,
            password_hash,
            role,
        };

        self.identities
            .insert(data, self.clock.now())
            .await?
            .ok_or_else(|| AppError::conflict(duplicate_message))
    }

    /// Replace the password of an existing identity.
    pub async fn set_password(&self, identity: &Identity, password: &str) -> Result<(), AppError> {
        self.validator.validate(password)?;
        let hash = self.hasher.hash_password(password)?;
        if !self
            .identities
            .update_password(identity.id, &hash, self.clock.now())
            .await?
        {
            return Err(AppError::not_found("User not found"));
        }
        info!(identity_id = %identity.id, "Password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use chrono::Duration;
    use leavedesk_core::error::ErrorKind;

    fn registration(email: &str, role: Option<Role>) -> Registration {
        Registration {
            name: "Alice".into(),
            email: email.into(),
            password: "secret1".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_self_registration_forces_employee() {
        let h = Harness::new();
        let out = h
            .identity
            .register(registration("alice@x.io", Some(Role::Admin)), None)
            .await
            .unwrap();
        assert_eq!(out.identity.role, Role::Employee);
        assert!(!out.token.is_empty());
    }

    #[tokio::test]
    async fn test_admin_registration_honours_role() {
        let h = Harness::new();
        let admin = h.context(Role::Admin, "root@x.io").await;
        let out = h
            .identity
            .register(registration("mgr@x.io", Some(Role::Manager)), Some(&admin))
            .await
            .unwrap();
        assert_eq!(out.identity.role, Role::Manager);

        let manager = h.context(Role::Manager, "m2@x.io").await;
        let out = h
            .identity
            .register(registration("emp@x.io", Some(Role::Admin)), Some(&manager))
            .await
            .unwrap();
        assert_eq!(out.identity.role, Role::Employee);
    }

    #[tokio::test]
    async fn test_register_by_admin_requires_admin() {
        let h = Harness::new();
        let manager = h.context(Role::Manager, "m@x.io").await;
        let err = h
            .identity
            .register_by_admin(&manager, registration("e@x.io", Some(Role::Manager)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_duplicate_email_any_role() {
        let h = Harness::new();
        h.context(Role::Manager, "bob@x.io").await;
        let err = h
            .identity
            .register(registration("  BOB@x.io", None), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User already exists");
    }

    #[tokio::test]
    async fn test_short_password_and_bad_email() {
        let h = Harness::new();
        let mut short = registration("p@x.io", None);
        short.password = "12345".into();
        assert_eq!(
            h.identity.register(short, None).await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            h.identity
                .register(registration("not-an-email", None), None)
                .await
                .unwrap_err()
                .kind,
            ErrorKind::Validation
        );
    }

    #[tokio::test]
    async fn test_login_and_authenticate() {
        let h = Harness::new();
        h.identity
            .register(registration("carol@x.io", None), None)
            .await
            .unwrap();

        let bad = h.identity.login("carol@x.io", "wrong-pass").await.unwrap_err();
        assert_eq!(bad.message, "Invalid email or password");
        let unknown = h.identity.login("nobody@x.io", "secret1").await.unwrap_err();
        assert_eq!(unknown.message, "Invalid email or password");

        let out = h.identity.login("CAROL@x.io", "secret1").await.unwrap();
        let resolved = h.identity.authenticate(&out.token).await.unwrap();
        assert_eq!(resolved.id, out.identity.id);
    }

    #[tokio::test]
    async fn test_token_of_deleted_identity_rejected() {
        let h = Harness::new();
        let out = h
            .identity
            .register(registration("dave@x.io", None), None)
            .await
            .unwrap();
        h.stores.identities.delete(out.identity.id).await.unwrap();
        let err = h.identity.authenticate(&out.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid token user");
    }

    #[tokio::test]
    async fn test_token_expires_with_clock() {
        let h = Harness::new();
        let out = h
            .identity
            .register(registration("erin@x.io", None), None)
            .await
            .unwrap();
        h.clock.advance(Duration::days(8));
        let err = h.identity.authenticate(&out.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
