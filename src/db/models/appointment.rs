use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub location_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub customer_id: Uuid,
    pub start_at: OffsetDateTime,
    pub end_at: OffsetDateTime,
    pub is_complete: bool,
    pub observations: String,
    pub reminder_sent: bool,
    pub review_email_sent: bool,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

/// Appointment row joined with the display names the dashboard lists need.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AppointmentDetails {
    pub id: Uuid,
    pub location_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub customer_id: Uuid,
    pub company_id: Uuid,
    pub start_at: OffsetDateTime,
    pub end_at: OffsetDateTime,
    pub is_complete: bool,
    pub observations: String,
    pub reminder_sent: bool,
    pub review_email_sent: bool,
    pub created_at: OffsetDateTime,
    pub customer_name: String,
    pub service_name: String,
    pub location_name: String,
    pub professional_name: String,
}

impl AppointmentDetails {
    pub fn title(&self) -> String {
        format!("{} - {}", self.service_name, self.customer_name)
    }
}

/// Row-level insert data, assembled by the booking handler once the customer
/// is resolved and the end instant computed.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub location_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub customer_id: Uuid,
    pub start_at: OffsetDateTime,
    pub end_at: OffsetDateTime,
    pub observations: String,
}

/// Public booking request. `date` and `time` arrive as strings and are parsed
/// before any slot math; unparseable values never reach the calculator.
#[derive(Debug, Deserialize, Validate)]
pub struct NewBookingPayload {
    #[validate(length(min = 1, message = "This field is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub time: String,
    pub service: Uuid,
    pub location: Uuid,
    pub professional: Uuid,
    pub citizen_id: i64,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub phone: String,
    #[serde(default)]
    pub observations: String,
    #[validate(nested)]
    #[serde(default)]
    pub responses: Vec<QuestionResponseInput>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub question_id: Uuid,
    pub response: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionResponseInput {
    pub question_id: Uuid,
    #[validate(length(min = 1, message = "This field is required"))]
    pub response: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAppointment {
    pub start_at: Option<OffsetDateTime>,
    pub end_at: Option<OffsetDateTime>,
    pub is_complete: Option<bool>,
    pub observations: Option<String>,
    pub reminder_sent: Option<bool>,
    pub review_email_sent: Option<bool>,
}
