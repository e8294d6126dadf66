//! # leavedesk-database
//!
//! Store traits for identities, leave requests and tickets, with a
//! PostgreSQL implementation (sqlx) and a process-local in-memory
//! implementation. [`Stores`] picks one according to configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{IdentityStore, LeaveStore, Stores, TicketStore};
