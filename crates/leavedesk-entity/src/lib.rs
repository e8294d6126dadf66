//! # leavedesk-entity
//!
//! Domain entity models for LeaveDesk. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod identity;
pub mod leave;
pub mod ticket;

pub use identity::{Identity, NewIdentity, Role};
pub use leave::{
    LeaveDecision, LeaveDigest, LeaveRequest, LeaveReview, LeaveStatus, LeaveSummary, LeaveType,
    NewLeaveRequest,
};
pub use ticket::{NewTicket, Ticket, TicketCategory, TicketPriority, TicketReply, TicketStatus};
