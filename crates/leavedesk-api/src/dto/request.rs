//! Request DTOs with validation.
//!
//! Enumerated fields arrive as strings and absent fields default to empty,
//! so a bad or missing value is reported alongside every other failing
//! field instead of as an opaque deserialization error.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use leavedesk_core::error::AppError;
use leavedesk_entity::identity::Role;
use leavedesk_entity::leave::{LeaveDecision, LeaveType};
use leavedesk_entity::ticket::{TicketCategory, TicketPriority, TicketStatus};

/// Registration body, used by self-registration and admin registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(custom(function = "not_blank_name"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    /// Password. Minimum length is enforced from configuration.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Requested role. Ignored unless an admin registers the identity.
    #[validate(custom(function = "known_role"))]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// The requested role, if any.
    pub fn role(&self) -> Result<Option<Role>, AppError> {
        self.role.as_deref().map(Role::from_str).transpose()
    }
}

/// Login body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Leave submission body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateLeaveRequest {
    #[validate(custom(function = "known_leave_type"))]
    pub leave_type: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[validate(custom(function = "valid_from_date"))]
    pub from_date: String,
    #[validate(custom(function = "valid_to_date"))]
    pub to_date: String,
    #[validate(custom(function = "reason_length"))]
    pub reason: String,
}

impl CreateLeaveRequest {
    pub fn leave_type(&self) -> Result<LeaveType, AppError> {
        self.leave_type.parse()
    }

    pub fn from_date(&self) -> Result<NaiveDate, AppError> {
        parse_date(&self.from_date)
            .ok_or_else(|| AppError::validation("from_date must be a valid date"))
    }

    pub fn to_date(&self) -> Result<NaiveDate, AppError> {
        parse_date(&self.to_date).ok_or_else(|| AppError::validation("to_date must be a valid date"))
    }
}

/// Manager decision body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DecideLeaveRequest {
    /// `approved` or `rejected`.
    #[validate(custom(function = "known_decision"))]
    pub status: String,
    #[validate(length(max = 500, message = "manager_comment must be under 500 characters"))]
    pub manager_comment: Option<String>,
}

impl DecideLeaveRequest {
    pub fn decision(&self) -> Result<LeaveDecision, AppError> {
        self.status.parse()
    }
}

/// Ticket creation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTicketRequest {
    #[validate(custom(function = "known_category"))]
    pub category: String,
    #[validate(custom(function = "known_priority"))]
    pub priority: Option<String>,
    #[validate(custom(function = "subject_length"))]
    pub subject: String,
    #[validate(custom(function = "description_length"))]
    pub description: String,
}

impl CreateTicketRequest {
    pub fn category(&self) -> Result<TicketCategory, AppError> {
        self.category.parse()
    }

    pub fn priority(&self) -> Result<Option<TicketPriority>, AppError> {
        self.priority.as_deref().map(TicketPriority::from_str).transpose()
    }
}

/// Admin reply body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReplyTicketRequest {
    #[validate(custom(function = "known_ticket_status"))]
    pub status: String,
    #[validate(custom(function = "reply_length"))]
    pub admin_reply: String,
}

impl ReplyTicketRequest {
    pub fn status(&self) -> Result<TicketStatus, AppError> {
        self.status.parse()
    }
}

/// Query string of the admin ticket listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketFilterQuery {
    pub status: Option<String>,
    pub category: Option<String>,
}

impl TicketFilterQuery {
    /// Parse both filters. Empty values are treated as absent.
    pub fn parse(&self) -> Result<(Option<TicketStatus>, Option<TicketCategory>), AppError> {
        let status = non_empty(&self.status).map(TicketStatus::from_str).transpose()?;
        let category = non_empty(&self.category)
            .map(TicketCategory::from_str)
            .transpose()?;
        Ok((status, category))
    }
}

/// Admin user creation body. The role is required here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank_name"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(custom(function = "known_role"))]
    pub role: String,
}

impl CreateUserRequest {
    pub fn role(&self) -> Result<Role, AppError> {
        self.role.parse()
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping the calendar
/// date as written.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn trimmed_between(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(failure("length", message));
    }
    Ok(())
}

fn not_blank_name(value: &str) -> Result<(), ValidationError> {
    trimmed_between(value, 1, usize::MAX, "Name is required")
}

fn reason_length(value: &str) -> Result<(), ValidationError> {
    trimmed_between(value, 5, usize::MAX, "Reason must be at least 5 characters")
}

fn subject_length(value: &str) -> Result<(), ValidationError> {
    trimmed_between(value, 4, 120, "Subject must be between 4 and 120 characters")
}

fn description_length(value: &str) -> Result<(), ValidationError> {
    trimmed_between(
        value,
        10,
        1500,
        "Description must be between 10 and 1500 characters",
    )
}

fn reply_length(value: &str) -> Result<(), ValidationError> {
    trimmed_between(
        value,
        2,
        1500,
        "Admin reply must be between 2 and 1500 characters",
    )
}

fn valid_from_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| failure("date", "from_date must be a valid date"))
}

fn valid_to_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| failure("date", "to_date must be a valid date"))
}

fn known_role(value: &str) -> Result<(), ValidationError> {
    Role::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("role", "Role is invalid"))
}

fn known_leave_type(value: &str) -> Result<(), ValidationError> {
    LeaveType::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("leave_type", "Invalid leave type"))
}

fn known_decision(value: &str) -> Result<(), ValidationError> {
    LeaveDecision::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("status", "Status must be approved or rejected"))
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    TicketCategory::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("category", "Invalid category"))
}

fn known_priority(value: &str) -> Result<(), ValidationError> {
    TicketPriority::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("priority", "Invalid priority"))
}

fn known_ticket_status(value: &str) -> Result<(), ValidationError> {
    TicketStatus::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("status", "Invalid status"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(from: &str, to: &str, reason: &str) -> CreateLeaveRequest {
        CreateLeaveRequest {
            leave_type: "sick".into(),
            from_date: from.into(),
            to_date: to.into(),
            reason: reason.into(),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(parse_date("2024-01-03"), Some(expected));
        assert_eq!(parse_date("2024-01-03T10:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-01-03T23:30:00-05:00"), Some(expected));
        assert_eq!(parse_date("03/01/2024"), None);
    }

    #[test]
    fn test_reason_is_trimmed_before_counting() {
        assert!(leave("2024-01-01", "2024-01-03", "  flu  ").validate().is_err());
        assert!(leave("2024-01-01", "2024-01-03", "fever").validate().is_ok());
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let mut req = leave("yesterday", "2024-01-03", "no");
        req.leave_type = "vacation".into();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_missing_fields_reach_validation() {
        let req: CreateLeaveRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
        fields.sort();
        assert_eq!(fields, vec!["from_date", "leave_type", "reason", "to_date"]);

        let req: RegisterRequest = serde_json::from_str(r#"{"password":"x"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(!errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_decision_values() {
        let ok = DecideLeaveRequest {
            status: "approved".into(),
            manager_comment: None,
        };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.decision().unwrap(), LeaveDecision::Approved);

        let pending = DecideLeaveRequest {
            status: "pending".into(),
            manager_comment: Some("x".repeat(501)),
        };
        assert_eq!(pending.validate().unwrap_err().field_errors().len(), 2);
    }

    #[test]
    fn test_ticket_filter_parsing() {
        let query = TicketFilterQuery {
            status: Some("in_progress".into()),
            category: Some(String::new()),
        };
        assert_eq!(query.parse().unwrap(), (Some(TicketStatus::InProgress), None));

        let bad = TicketFilterQuery {
            status: Some("waiting".into()),
            category: None,
        };
        assert!(bad.parse().is_err());
    }

    #[test]
    fn test_register_role_optional() {
        let req = RegisterRequest {
            name: "Ann".into(),
            email: "ann@x.io".into(),
            password: "secret1".into(),
            role: None,
        };
        assert!(req.validate().is_ok());
        assert_eq!(req.role().unwrap(), None);

        let bad = RegisterRequest {
            role: Some("owner".into()),
            ..req
        };
        assert!(bad.validate().is_err());
    }
}
