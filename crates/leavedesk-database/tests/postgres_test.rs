//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with the workspace migrations applied.
//! They need a reachable server:
//!
//! `DATABASE_URL=postgres://... cargo test -p leavedesk-database -- --ignored`

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use leavedesk_database::repositories::{IdentityRepository, LeaveRepository, TicketRepository};
use leavedesk_database::store::{IdentityStore, LeaveStore, TicketStore};
use leavedesk_entity::identity::{NewIdentity, Role};
use leavedesk_entity::leave::{LeaveReview, LeaveStatus, LeaveType, NewLeaveRequest};
use leavedesk_entity::ticket::{
    NewTicket, TicketCategory, TicketPriority, TicketReply, TicketStatus,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap()
}

fn submission(employee_id: Uuid, created_at: DateTime<Utc>) -> NewLeaveRequest {
    NewLeaveRequest {
        employee_id,
        employee_name: "Alice".into(),
        employee_email: "alice@example.com".into(),
        leave_type: LeaveType::Sick,
        from_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        to_date: NaiveDate::from_ymd_opt(2026, 5, 6).unwrap(),
        reason: "Seasonal flu".into(),
        created_at,
    }
}

fn review(status: LeaveStatus, at: DateTime<Utc>) -> LeaveReview {
    LeaveReview {
        status,
        reviewed_by_id: Uuid::new_v4(),
        reviewed_by_name: "Morgan".into(),
        manager_comment: String::new(),
        reviewed_at: at,
    }
}

fn identity(email: &str, role: Role) -> NewIdentity {
    NewIdentity {
        name: "  Casey ".into(),
        email: email.into(),
        password_hash: "$argon2id$stub".into(),
        role,
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_second_pending_insert_returns_none(pool: PgPool) {
    let repo = LeaveRepository::new(pool);
    let employee = Uuid::new_v4();

    let first = repo.insert_if_no_pending(submission(employee, t0())).await.unwrap();
    assert_eq!(first.unwrap().status, LeaveStatus::Pending);
    assert!(repo.insert_if_no_pending(submission(employee, t0())).await.unwrap().is_none());

    let other = repo
        .insert_if_no_pending(submission(Uuid::new_v4(), t0()))
        .await
        .unwrap();
    assert!(other.is_some());
    assert_eq!(repo.count_all().await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_inserts_leave_one_pending(pool: PgPool) {
    let repo = Arc::new(LeaveRepository::new(pool));
    let employee = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.insert_if_no_pending(submission(employee, t0())).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(
        repo.count_by_status(LeaveStatus::Pending, Some(employee)).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_decide_only_applies_while_pending(pool: PgPool) {
    let repo = LeaveRepository::new(pool);
    let req = repo
        .insert_if_no_pending(submission(Uuid::new_v4(), t0()))
        .await
        .unwrap()
        .unwrap();

    let at = t0() + Duration::hours(1);
    let approved = repo
        .decide_if_pending(req.id, &review(LeaveStatus::Approved, at))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.reviewed_by_name.as_deref(), Some("Morgan"));
    assert_eq!(approved.manager_comment.as_deref(), Some(""));

    let lost = repo
        .decide_if_pending(req.id, &review(LeaveStatus::Rejected, at))
        .await
        .unwrap();
    assert!(lost.is_none());

    let stored = repo.find_by_id(req.id).await.unwrap().unwrap();
    assert_eq!(stored.status, LeaveStatus::Approved);
    assert!(
        repo.decide_if_pending(Uuid::new_v4(), &review(LeaveStatus::Approved, at))
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_expiry_scoped_then_global(pool: PgPool) {
    let repo = LeaveRepository::new(pool);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let carol = Uuid::new_v4();

    repo.insert_if_no_pending(submission(alice, t0())).await.unwrap();
    repo.insert_if_no_pending(submission(bob, t0())).await.unwrap();
    let fresh = t0() + Duration::hours(47);
    repo.insert_if_no_pending(submission(carol, fresh)).await.unwrap();

    let now = t0() + Duration::hours(72);
    let cutoff = now - Duration::hours(48);

    assert_eq!(repo.expire_pending_before(cutoff, now, Some(alice)).await.unwrap(), 1);
    assert_eq!(
        repo.count_by_status(LeaveStatus::Pending, Some(bob)).await.unwrap(),
        1
    );

    assert_eq!(repo.expire_pending_before(cutoff, now, None).await.unwrap(), 1);
    assert_eq!(repo.count_by_status(LeaveStatus::Expired, None).await.unwrap(), 2);
    assert_eq!(repo.count_by_status(LeaveStatus::Pending, None).await.unwrap(), 1);

    // Expired rows no longer block a new submission.
    assert!(repo.insert_if_no_pending(submission(alice, now)).await.unwrap().is_some());
    assert_eq!(repo.find_by_employee(alice).await.unwrap()[0].status, LeaveStatus::Pending);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_returns_none(pool: PgPool) {
    let repo = IdentityRepository::new(pool);

    let created = repo
        .insert(identity(" Dana@Example.com ", Role::Manager), t0())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.email, "dana@example.com");
    assert_eq!(created.name, "Casey");

    let duplicate = repo
        .insert(identity("dana@example.com", Role::Employee), t0())
        .await
        .unwrap();
    assert!(duplicate.is_none());

    let found = repo.find_by_email("DANA@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(repo.count_by_role(Role::Manager).await.unwrap(), 1);
    assert_eq!(repo.count_by_role(Role::Employee).await.unwrap(), 0);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_ticket_reply_and_filters(pool: PgPool) {
    let repo = TicketRepository::new(pool);
    let employee = Uuid::new_v4();

    let ticket = repo
        .insert(NewTicket {
            employee_id: employee,
            employee_name: "Eve".into(),
            employee_email: "eve@example.com".into(),
            category: TicketCategory::PayrollIssue,
            priority: TicketPriority::default(),
            subject: "Missing overtime".into(),
            description: "March overtime was not paid".into(),
            created_at: t0(),
        })
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.priority, TicketPriority::Medium);

    let reply = TicketReply {
        admin_reply: "Fixed in next payroll".into(),
        status: TicketStatus::Resolved,
        replied_by_admin_id: Uuid::new_v4(),
        replied_by_admin_name: "Root".into(),
        replied_at: t0() + Duration::hours(2),
    };
    let replied = repo.apply_reply(ticket.id, &reply).await.unwrap().unwrap();
    assert_eq!(replied.status, TicketStatus::Resolved);
    assert!(repo.apply_reply(Uuid::new_v4(), &reply).await.unwrap().is_none());

    let resolved = repo
        .find_filtered(Some(TicketStatus::Resolved), Some(TicketCategory::PayrollIssue))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert!(
        repo.find_filtered(Some(TicketStatus::Open), None)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(repo.find_by_employee(employee).await.unwrap().len(), 1);
}
