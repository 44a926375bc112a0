use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub company_id: Uuid,
    pub location_id: Uuid,
    pub name: String,
    pub description: String,
    pub picture_url: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProfessional {
    pub company_id: Uuid,
    pub location_id: Uuid,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub picture_url: Option<String>,
    /// Services this professional can be booked for.
    #[serde(default)]
    pub services: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfessional {
    pub location_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub picture_url: Option<String>,
    pub services: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct ProfessionalDetails {
    #[serde(flatten)]
    pub professional: Professional,
    pub services: Vec<Uuid>,
}
