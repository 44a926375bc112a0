use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Public booking-page configuration for a company.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub slug: String,
    pub reviews_link: Option<String>,
    pub color_1: String,
    pub color_2: String,
    pub profile_picture_url: Option<String>,
    pub banner_picture_url: Option<String>,
    pub social_facebook_url: Option<String>,
    pub social_instagram_url: Option<String>,
    pub social_web_url: Option<String>,
    pub should_input_email: bool,
    pub should_input_citizen_id: bool,
    pub should_input_phone: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Flat registration payload: contact person plus the initial profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCompanyPayload {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Company name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompany {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyProfile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub reviews_link: Option<String>,
    pub color_1: Option<String>,
    pub color_2: Option<String>,
    pub profile_picture_url: Option<String>,
    pub banner_picture_url: Option<String>,
    pub social_facebook_url: Option<String>,
    pub social_instagram_url: Option<String>,
    pub social_web_url: Option<String>,
    pub should_input_email: Option<bool>,
    pub should_input_citizen_id: Option<bool>,
    pub should_input_phone: Option<bool>,
}
