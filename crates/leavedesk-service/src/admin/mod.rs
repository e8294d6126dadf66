//! Administrative services: identity management, seeding and analytics.

pub mod analytics;
pub mod users;

pub use analytics::{AnalyticsService, LeaveTotals, MonthlyCount, UserAnalytics, UserTotals};
pub use users::{NewUserInput, SeedOutcome, UserAdminService};
