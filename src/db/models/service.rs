use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Duration, OffsetDateTime};
use validator::Validate;

use super::timeframe::{TimeFrame, TimeFrameInput};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration_minutes: i32,
    pub buffer_minutes: i32,
    pub professional_is_selectable: bool,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Service {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AdditionalQuestion {
    pub id: Uuid,
    pub service_id: Uuid,
    pub text: String,
    pub active: bool,
}

/// Create/update payload: the service row plus its nested collections, which
/// are replaced wholesale on update.
#[derive(Debug, Deserialize, Validate)]
pub struct ServicePayload {
    pub company_id: Uuid,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 15, message = "Duration must be at least 15 minutes"))]
    pub duration_minutes: i32,
    #[validate(range(min = 0, message = "Buffer cannot be negative"))]
    #[serde(default)]
    pub buffer_minutes: i32,
    #[serde(default)]
    pub professional_is_selectable: bool,
    #[validate(nested)]
    #[serde(default)]
    pub timeframes: Vec<TimeFrameInput>,
    #[validate(nested)]
    #[serde(default)]
    pub additional_questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionInput {
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceDetails {
    #[serde(flatten)]
    pub service: Service,
    pub timeframes: Vec<TimeFrame>,
    pub additional_questions: Vec<AdditionalQuestion>,
}
