use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub is_virtual: bool,
    pub address: String,
    pub phone: String,
    pub picture_url: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = require_address_unless_virtual))]
pub struct NewLocation {
    pub company_id: Uuid,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub picture_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub is_virtual: Option<bool>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub picture_url: Option<String>,
}

fn require_address_unless_virtual(location: &NewLocation) -> Result<(), ValidationError> {
    if !location.is_virtual && location.address.trim().is_empty() {
        return Err(ValidationError::new("address_required")
            .with_message("An address is required for a non-virtual location".into()));
    }
    Ok(())
}
