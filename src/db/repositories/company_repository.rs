use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{
    Company, CompanyProfile, RegisterCompanyPayload, UpdateCompany, UpdateCompanyProfile,
};

const COMPANY_COLUMNS: &str = "id, first_name, last_name, email, phone, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, company_id, name, description, address, phone, slug, \
     reviews_link, color_1, color_2, profile_picture_url, banner_picture_url, \
     social_facebook_url, social_instagram_url, social_web_url, should_input_email, \
     should_input_citizen_id, should_input_phone, created_at, updated_at";

pub struct CompanyRepository;

impl CompanyRepository {
    pub async fn create_with_profile(
        tx: &mut Transaction<'_, Postgres>,
        data: &RegisterCompanyPayload,
        slug: &str,
    ) -> Result<(Company, CompanyProfile), Error> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies (first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.email.to_lowercase())
        .bind(&data.phone)
        .fetch_one(&mut **tx)
        .await?;

        let profile = sqlx::query_as::<_, CompanyProfile>(&format!(
            "INSERT INTO company_profiles (company_id, name, description, address, phone, slug) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(company.id)
        .bind(&data.name)
        .bind(data.description.clone().unwrap_or_default())
        .bind(data.address.clone().unwrap_or_default())
        .bind(data.phone.clone().unwrap_or_default())
        .bind(slug)
        .fetch_one(&mut **tx)
        .await?;

        Ok((company, profile))
    }

    pub async fn slug_taken(pool: &PgPool, slug: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM company_profiles WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(pool)
        .await
    }

    pub async fn get(pool: &PgPool, company_id: Uuid) -> Result<Option<Company>, Error> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(company_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Company>, Error> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY last_name, first_name"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        company_id: Uuid,
        data: &UpdateCompany,
    ) -> Result<Company, Error> {
        sqlx::query_as::<_, Company>(&format!(
            "UPDATE companies \
             SET first_name = COALESCE($1, first_name), \
                 last_name = COALESCE($2, last_name), \
                 phone = COALESCE($3, phone), \
                 updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(company_id)
        .fetch_one(pool)
        .await
    }

    pub async fn profile_by_company(
        pool: &PgPool,
        company_id: Uuid,
    ) -> Result<Option<CompanyProfile>, Error> {
        sqlx::query_as::<_, CompanyProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM company_profiles WHERE company_id = $1"
        ))
        .bind(company_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn profiles(
        pool: &PgPool,
        slug: Option<&str>,
        company: Option<Uuid>,
    ) -> Result<Vec<CompanyProfile>, Error> {
        sqlx::query_as::<_, CompanyProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM company_profiles \
             WHERE ($1::text IS NULL OR slug = $1) \
               AND ($2::uuid IS NULL OR company_id = $2) \
             ORDER BY name"
        ))
        .bind(slug)
        .bind(company)
        .fetch_all(pool)
        .await
    }

    pub async fn update_profile(
        pool: &PgPool,
        company_id: Uuid,
        data: &UpdateCompanyProfile,
    ) -> Result<CompanyProfile, Error> {
        sqlx::query_as::<_, CompanyProfile>(&format!(
            "UPDATE company_profiles \
             SET name = COALESCE($1, name), \
                 description = COALESCE($2, description), \
                 address = COALESCE($3, address), \
                 phone = COALESCE($4, phone), \
                 reviews_link = COALESCE($5, reviews_link), \
                 color_1 = COALESCE($6, color_1), \
                 color_2 = COALESCE($7, color_2), \
                 profile_picture_url = COALESCE($8, profile_picture_url), \
                 banner_picture_url = COALESCE($9, banner_picture_url), \
                 social_facebook_url = COALESCE($10, social_facebook_url), \
                 social_instagram_url = COALESCE($11, social_instagram_url), \
                 social_web_url = COALESCE($12, social_web_url), \
                 should_input_email = COALESCE($13, should_input_email), \
                 should_input_citizen_id = COALESCE($14, should_input_citizen_id), \
                 should_input_phone = COALESCE($15, should_input_phone), \
                 updated_at = NOW() \
             WHERE company_id = $16 \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.reviews_link)
        .bind(&data.color_1)
        .bind(&data.color_2)
        .bind(&data.profile_picture_url)
        .bind(&data.banner_picture_url)
        .bind(&data.social_facebook_url)
        .bind(&data.social_instagram_url)
        .bind(&data.social_web_url)
        .bind(data.should_input_email)
        .bind(data.should_input_citizen_id)
        .bind(data.should_input_phone)
        .bind(company_id)
        .fetch_one(pool)
        .await
    }
}
