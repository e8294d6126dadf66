//! # leavedesk-service
//!
//! Business logic service layer for LeaveDesk. Each service orchestrates
//! the stores, the token codec and the access policy to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references, including the [`Clock`]
//! that every time-dependent rule reads.
//!
//! [`Clock`]: leavedesk_core::traits::Clock

pub mod admin;
pub mod context;
pub mod identity;
pub mod leave;
pub mod ticket;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{AnalyticsService, UserAdminService};
pub use context::RequestContext;
pub use identity::IdentityService;
pub use leave::{ExpirySweeper, LeaveService};
pub use ticket::TicketService;
