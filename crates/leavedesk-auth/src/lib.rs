//! # leavedesk-auth
//!
//! Authentication and authorization primitives for LeaveDesk.
//!
//! ## Modules
//!
//! - `jwt`: signed bearer tokens carrying identity id and role
//! - `password`: Argon2id password hashing and the minimum-length policy
//! - `rbac`: the operation-to-roles policy table and its enforcer

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Operation, RbacEnforcer, RbacPolicies};
