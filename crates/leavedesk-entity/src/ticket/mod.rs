//! Support ticket domain entities.

pub mod model;
pub mod status;

pub use model::{NewTicket, Ticket, TicketReply};
pub use status::{TicketCategory, TicketPriority, TicketStatus};
