//! Leave request domain entities.

pub mod model;
pub mod status;

pub use model::{LeaveDigest, LeaveRequest, LeaveReview, LeaveSummary, NewLeaveRequest};
pub use status::{LeaveDecision, LeaveStatus, LeaveType};
