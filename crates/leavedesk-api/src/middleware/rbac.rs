//! RBAC route guards.
//!
//! Each guard is a zero-sized marker naming one [`Operation`]; handlers
//! take [`Authorized<Guard>`](crate::extractors::Authorized) to have the
//! policy table consulted before the body is touched.

use leavedesk_auth::rbac::Operation;

/// Binds a marker type to the operation it protects.
pub trait Guard: Send + Sync + 'static {
    const OPERATION: Operation;
}

macro_rules! guards {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Guard for [`Operation::", stringify!($name), "`].")]
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Guard for $name {
                const OPERATION: Operation = Operation::$name;
            }
        )+
    };
}

guards!(
    RegisterByAdmin,
    SubmitLeave,
    ListOwnLeaves,
    OwnLeaveSummary,
    ReviewQueue,
    ManagerAnalytics,
    DecideLeave,
    CreateTicket,
    ListOwnTickets,
    ListAllTickets,
    ReplyTicket,
    ListUsers,
    CreateUser,
    DeleteUser,
    UserAnalytics,
);
