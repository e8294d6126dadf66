//! Leave request repository implementation.
//!
//! The single-pending rule is enforced twice: the insert is conditional on
//! no pending row existing, and the partial unique index
//! `leave_requests_single_pending` rejects the loser of a race between two
//! such inserts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use leavedesk_core::error::{AppError, ErrorKind};
use leavedesk_core::result::AppResult;
use leavedesk_entity::leave::{
    LeaveDigest, LeaveRequest, LeaveReview, LeaveStatus, NewLeaveRequest,
};

use super::to_count;
use crate::store::LeaveStore;

const SINGLE_PENDING_INDEX: &str = "leave_requests_single_pending";

/// Repository for the `leave_requests` table.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    /// Create a new leave repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveStore for LeaveRepository {
    async fn expire_pending_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE leave_requests SET status = 'expired', updated_at = $2 \
             WHERE status = 'pending' AND created_at < $1 \
             AND ($3::uuid IS NULL OR employee_id = $3)",
        )
        .bind(cutoff)
        .bind(now)
        .bind(employee_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire stale leave requests", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn insert_if_no_pending(&self, data: NewLeaveRequest) -> AppResult<Option<LeaveRequest>> {
        let result = sqlx::query_as::<_, LeaveRequest>(
            "INSERT INTO leave_requests \
             (id, employee_id, employee_name, employee_email, leave_type, from_date, to_date, \
              reason, status, created_at, updated_at) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, 'pending'::leave_status, $9, $9 \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM leave_requests WHERE employee_id = $2 AND status = 'pending' \
             ) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(&data.employee_email)
        .bind(data.leave_type)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(&data.reason)
        .bind(data.created_at)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(ref db_err))
                if db_err.constraint() == Some(SINGLE_PENDING_INDEX) =>
            {
                debug!(employee_id = %data.employee_id, "Lost single-pending race");
                Ok(None)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create leave request",
                e,
            )),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>> {
        sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find leave request", e)
            })
    }

    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        sqlx::query_as::<_, LeaveRequest>(
            "SELECT * FROM leave_requests WHERE employee_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list leave requests", e))
    }

    async fn find_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>> {
        sqlx::query_as::<_, LeaveRequest>(
            "SELECT * FROM leave_requests WHERE status = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list leave requests", e))
    }

    async fn count_by_status(
        &self,
        status: LeaveStatus,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM leave_requests \
             WHERE status = $1 AND ($2::uuid IS NULL OR employee_id = $2)",
        )
        .bind(status)
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count leave requests", e)
        })?;
        Ok(to_count(count))
    }

    async fn count_all(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leave_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count leave requests", e)
            })?;
        Ok(to_count(count))
    }

    async fn decide_if_pending(
        &self,
        id: Uuid,
        review: &LeaveReview,
    ) -> AppResult<Option<LeaveRequest>> {
        sqlx::query_as::<_, LeaveRequest>(
            "UPDATE leave_requests SET status = $2, reviewed_by_id = $3, reviewed_by_name = $4, \
             manager_comment = $5, updated_at = $6 \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(review.status)
        .bind(review.reviewed_by_id)
        .bind(&review.reviewed_by_name)
        .bind(&review.manager_comment)
        .bind(review.reviewed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to review leave request", e)
        })
    }

    async fn list_digests(&self) -> AppResult<Vec<LeaveDigest>> {
        sqlx::query_as::<_, LeaveDigest>(
            "SELECT id, status, created_at FROM leave_requests ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list leave requests", e))
    }
}
