//! Leave request lifecycle.

pub mod service;
pub mod sweeper;

pub use service::{LeaveService, LeaveSubmission, ManagerAnalytics};
pub use sweeper::ExpirySweeper;
