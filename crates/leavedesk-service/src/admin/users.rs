//! Admin user management plus the seeding and password-reset tooling.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use leavedesk_auth::rbac::{Operation, RbacEnforcer};
use leavedesk_core::error::AppError;
use leavedesk_database::store::IdentityStore;
use leavedesk_entity::identity::{Identity, Role};

use crate::context::RequestContext;
use crate::identity::IdentityService;

/// Admin-supplied data for a new identity. The role is mandatory.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Result of [`UserAdminService::seed_admin`].
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Created(Identity),
    AlreadyExists(Identity),
}

/// Handles administrative identity operations.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    identities: Arc<dyn IdentityStore>,
    identity: Arc<IdentityService>,
    rbac: Arc<RbacEnforcer>,
}

impl UserAdminService {
    /// Creates a new admin user service.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        identity: Arc<IdentityService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            identities,
            identity,
            rbac,
        }
    }

    /// Every identity across roles, newest first.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<Identity>, AppError> {
        self.rbac.require(ctx.role, Operation::ListUsers)?;
        self.identities.list_all().await
    }

    /// Create an identity with an explicit role.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        input: NewUserInput,
    ) -> Result<Identity, AppError> {
        self.rbac.require(ctx.role, Operation::CreateUser)?;

        let identity = self
            .identity
            .create_identity(
                &input.name,
                &input.email,
                &input.password,
                input.role,
                "Email already in use",
            )
            .await?;

        info!(
            identity_id = %identity.id,
            role = %identity.role,
            admin_id = %ctx.identity_id,
            "User created"
        );
        Ok(identity)
    }

    /// Delete an identity. Admins may not delete themselves.
    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac.require(ctx.role, Operation::DeleteUser)?;

        if id == ctx.identity_id {
            return Err(AppError::validation("Admin cannot delete self"));
        }
        if !self.identities.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(identity_id = %id, admin_id = %ctx.identity_id, "User deleted");
        Ok(())
    }

    /// Identities holding `role`, newest first. Used by the CLI.
    pub async fn list_by_role(&self, role: Role) -> Result<Vec<Identity>, AppError> {
        self.identities.list_by_role(role).await
    }

    /// Every identity, newest first, without an acting context. Used by
    /// the CLI.
    pub async fn list_all(&self) -> Result<Vec<Identity>, AppError> {
        self.identities.list_all().await
    }

    /// Ensure an admin with `email` exists.
    pub async fn seed_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SeedOutcome, AppError> {
        if let Some(existing) = self.identities.find_by_email(email).await? {
            if existing.role != Role::Admin {
                return Err(AppError::conflict(format!(
                    "Email already in use by a {} account",
                    existing.role
                )));
            }
            info!(identity_id = %existing.id, "Admin already exists, skipping seed");
            return Ok(SeedOutcome::AlreadyExists(existing));
        }

        let admin = self
            .identity
            .create_identity(name, email, password, Role::Admin, "Email already in use")
            .await?;
        info!(identity_id = %admin.id, "Admin seeded");
        Ok(SeedOutcome::Created(admin))
    }

    /// Reset the password of an existing admin.
    pub async fn reset_admin_password(&self, email: &str, password: &str) -> Result<(), AppError> {
        let admin = self
            .identities
            .find_by_email(email)
            .await?
            .filter(|i| i.role == Role::Admin)
            .ok_or_else(|| AppError::not_found(format!("Admin not found: {}", email.trim())))?;

        self.identity.set_password(&admin, password).await
    }
}
