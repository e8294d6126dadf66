//! Organization-wide analytics for admins.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::Serialize;

use leavedesk_auth::rbac::{Operation, RbacEnforcer};
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;
use leavedesk_database::store::{IdentityStore, LeaveStore};
use leavedesk_entity::identity::Role;
use leavedesk_entity::leave::LeaveStatus;

use crate::context::RequestContext;

/// Calendar months reported in `monthly_users`, current month included.
const MONTHS_REPORTED: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserTotals {
    pub total_users: u64,
    pub admins: u64,
    pub managers: u64,
    pub employees: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveTotals {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Identities created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// Short month name, e.g. `"Jan"`.
    pub month: String,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAnalytics {
    pub totals: UserTotals,
    pub leaves: LeaveTotals,
    /// Oldest month first.
    pub monthly_users: Vec<MonthlyCount>,
}

/// Computes the admin dashboard figures.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    identities: Arc<dyn IdentityStore>,
    leaves: Arc<dyn LeaveStore>,
    rbac: Arc<RbacEnforcer>,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        leaves: Arc<dyn LeaveStore>,
        rbac: Arc<RbacEnforcer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities,
            leaves,
            rbac,
            clock,
        }
    }

    /// Identity totals by role, leave totals by status and monthly signups.
    pub async fn user_analytics(&self, ctx: &RequestContext) -> Result<UserAnalytics, AppError> {
        self.rbac.require(ctx.role, Operation::UserAnalytics)?;

        let admins = self.identities.count_by_role(Role::Admin).await?;
        let managers = self.identities.count_by_role(Role::Manager).await?;
        let employees = self.identities.count_by_role(Role::Employee).await?;

        let leaves = LeaveTotals {
            total: self.leaves.count_all().await?,
            pending: self.leaves.count_by_status(LeaveStatus::Pending, None).await?,
            approved: self.leaves.count_by_status(LeaveStatus::Approved, None).await?,
            rejected: self.leaves.count_by_status(LeaveStatus::Rejected, None).await?,
        };

        let mut monthly_users = Vec::with_capacity(MONTHS_REPORTED as usize);
        for (label, from, to) in month_windows(self.clock.now(), MONTHS_REPORTED)? {
            monthly_users.push(MonthlyCount {
                month: label,
                total: self.identities.count_created_between(from, to).await?,
            });
        }

        Ok(UserAnalytics {
            totals: UserTotals {
                total_users: admins + managers + employees,
                admins,
                managers,
                employees,
            },
            leaves,
            monthly_users,
        })
    }
}

/// `[start, end)` bounds of the last `count` calendar months, oldest first,
/// labelled with the short month name.
fn month_windows(
    now: DateTime<Utc>,
    count: u32,
) -> Result<Vec<(String, DateTime<Utc>, DateTime<Utc>)>, AppError> {
    let current = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .ok_or_else(|| AppError::internal("Invalid current month"))?;

    (0..count)
        .rev()
        .map(|back| {
            let start = current
                .checked_sub_months(Months::new(back))
                .ok_or_else(|| AppError::internal("Month out of range"))?;
            let end = start
                .checked_add_months(Months::new(1))
                .ok_or_else(|| AppError::internal("Month out of range"))?;
            Ok((
                start.format("%b").to_string(),
                midnight(start)?,
                midnight(end)?,
            ))
        })
        .collect()
}

fn midnight(date: NaiveDate) -> Result<DateTime<Utc>, AppError> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::internal("Invalid midnight"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use chrono::TimeZone;
    use leavedesk_core::error::ErrorKind;

    #[test]
    fn test_month_windows_cross_year() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        let windows = month_windows(now, 6).unwrap();
        let labels: Vec<&str> = windows.iter().map(|w| w.0.as_str()).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(windows[0].1, Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());
        assert_eq!(windows[5].2, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_user_analytics_counts() {
        let h = Harness::new();
        h.clock.set(Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap());
        let admin = h.context(Role::Admin, "root@x.io").await;
        h.clock.set(Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());
        h.context(Role::Manager, "mona@x.io").await;
        h.context(Role::Employee, "alice@x.io").await;

        let stats = h.analytics.user_analytics(&admin).await.unwrap();
        assert_eq!(
            stats.totals,
            UserTotals {
                total_users: 3,
                admins: 1,
                managers: 1,
                employees: 1
            }
        );
        assert_eq!(stats.leaves.total, 0);
        let months: Vec<(&str, u64)> = stats
            .monthly_users
            .iter()
            .map(|m| (m.month.as_str(), m.total))
            .collect();
        assert_eq!(
            months,
            vec![("Oct", 0), ("Nov", 0), ("Dec", 0), ("Jan", 1), ("Feb", 0), ("Mar", 2)]
        );
    }

    #[tokio::test]
    async fn test_requires_admin() {
        let h = Harness::new();
        let alice = h.context(Role::Employee, "alice@x.io").await;
        assert_eq!(
            h.analytics.user_analytics(&alice).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );
    }
}
