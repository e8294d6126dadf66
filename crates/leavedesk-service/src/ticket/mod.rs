//! Support ticket workflow.

pub mod service;

pub use service::{TicketReplyInput, TicketService, TicketSubmission};
