//! PostgreSQL repository implementations of the store traits.

pub mod identity;
pub mod leave;
pub mod ticket;

pub use identity::IdentityRepository;
pub use leave::LeaveRepository;
pub use ticket::TicketRepository;

/// Convert a row count returned by PostgreSQL into `u64`.
pub(crate) fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}
