use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
pub enum NotificationKind {
    CustomerConfirmation,
    CompanyNotification,
    AppointmentReminder,
    ReviewRequest,
}

/// A scheduled hand-off to the external mail delivery; rows with `sent_at`
/// unset and `send_after` in the past are due.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub kind: NotificationKind,
    pub recipient_email: String,
    pub subject: String,
    pub send_after: OffsetDateTime,
    pub sent_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub appointment_id: Uuid,
    pub kind: NotificationKind,
    pub recipient_email: String,
    pub subject: String,
    pub send_after: OffsetDateTime,
}
