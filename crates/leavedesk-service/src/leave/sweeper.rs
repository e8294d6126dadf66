//! Periodic background expiry.
//!
//! Lazy expiry already keeps every read correct; the sweeper only makes
//! stored statuses converge for requests nobody is looking at.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{error, info};

use super::service::LeaveService;

/// Runs [`LeaveService::expire_stale`] for all employees on an interval.
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    leave: Arc<LeaveService>,
    interval: Duration,
}

impl ExpirySweeper {
    /// Creates a sweeper firing every `interval`.
    pub fn new(leave: Arc<LeaveService>, interval: Duration) -> Self {
        Self { leave, interval }
    }

    /// Sweep until `shutdown` turns `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "Leave expiry sweeper started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.leave.expire_stale(None).await {
                        error!(error = %e, "Leave expiry sweep failed");
                    }
                }
            }
        }

        info!("Leave expiry sweeper stopped");
    }

    /// Spawn [`run`](Self::run) onto the runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::LeaveSubmission;
    use crate::test_support::Harness;
    use chrono::NaiveDate;
    use leavedesk_entity::identity::Role;
    use leavedesk_entity::leave::{LeaveStatus, LeaveType};

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_expires_and_stops() {
        let h = Harness::new();
        let alice = h.context(Role::Employee, "alice@x.io").await;
        let req = h
            .leave
            .submit(
                &alice,
                LeaveSubmission {
                    leave_type: LeaveType::Earned,
                    from_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                    to_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                    reason: "holiday".into(),
                },
            )
            .await
            .unwrap();
        h.clock.advance(chrono::Duration::days(3));

        let (tx, rx) = watch::channel(false);
        let handle = ExpirySweeper::new(h.leave.clone(), Duration::from_secs(60)).spawn(rx);

        time::sleep(Duration::from_secs(61)).await;
        let stored = h.stores.leaves.find_by_id(req.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Expired);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
