//! In-memory store implementations.
//!
//! Each store keeps its rows behind a single `tokio::sync::Mutex`, which
//! makes every trait method atomic. Rows carry an insertion sequence so
//! that "newest first" is stable when several rows share a timestamp.

mod identity;
mod leave;
mod ticket;

pub use identity::MemoryIdentityStore;
pub use leave::MemoryLeaveStore;
pub use ticket::MemoryTicketStore;

use chrono::{DateTime, Utc};

/// A stored row with its insertion order.
#[derive(Debug, Clone)]
struct Row<T> {
    seq: u64,
    value: T,
}

/// Clone the matching rows, newest first.
fn newest_first<T: Clone>(
    rows: &[Row<T>],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    keep: impl Fn(&T) -> bool,
) -> Vec<T> {
    let mut matched: Vec<&Row<T>> = rows.iter().filter(|r| keep(&r.value)).collect();
    matched.sort_by(|a, b| {
        created_at(&b.value)
            .cmp(&created_at(&a.value))
            .then(b.seq.cmp(&a.seq))
    });
    matched.into_iter().map(|r| r.value.clone()).collect()
}
