use sqlx::{Error, PgPool};
use uuid::Uuid;

use crate::db::models::{Location, NewLocation, UpdateLocation};

const COLUMNS: &str = "id, company_id, name, is_virtual, address, phone, picture_url, active, \
     created_at, updated_at";

pub struct LocationRepository;

impl LocationRepository {
    pub async fn create(pool: &PgPool, data: &NewLocation) -> Result<Location, Error> {
        sqlx::query_as::<_, Location>(&format!(
            "INSERT INTO locations (company_id, name, is_virtual, address, phone, picture_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(data.company_id)
        .bind(&data.name)
        .bind(data.is_virtual)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.picture_url)
        .fetch_one(pool)
        .await
    }

    pub async fn get(pool: &PgPool, location_id: Uuid) -> Result<Option<Location>, Error> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {COLUMNS} FROM locations WHERE id = $1 AND active"
        ))
        .bind(location_id)
        .fetch_optional(pool)
        .await
    }

    /// Filtering by service narrows to locations where a professional offering
    /// that service works.
    pub async fn list(
        pool: &PgPool,
        company: Option<Uuid>,
        service: Option<Uuid>,
    ) -> Result<Vec<Location>, Error> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {COLUMNS} FROM locations l \
             WHERE l.active \
               AND ($1::uuid IS NULL OR l.company_id = $1) \
               AND ($2::uuid IS NULL OR l.id IN ( \
                     SELECT p.location_id FROM professionals p \
                     JOIN professional_services ps ON ps.professional_id = p.id \
                     WHERE ps.service_id = $2 AND p.active)) \
             ORDER BY l.name"
        ))
        .bind(company)
        .bind(service)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        location_id: Uuid,
        data: &UpdateLocation,
    ) -> Result<Location, Error> {
        sqlx::query_as::<_, Location>(&format!(
            "UPDATE locations \
             SET name = COALESCE($1, name), \
                 is_virtual = COALESCE($2, is_virtual), \
                 address = COALESCE($3, address), \
                 phone = COALESCE($4, phone), \
                 picture_url = COALESCE($5, picture_url), \
                 updated_at = NOW() \
             WHERE id = $6 AND active \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.name)
        .bind(data.is_virtual)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.picture_url)
        .bind(location_id)
        .fetch_one(pool)
        .await
    }

    pub async fn soft_delete(pool: &PgPool, location_id: Uuid) -> Result<(), Error> {
        let result = sqlx::query("UPDATE locations SET active = FALSE WHERE id = $1 AND active")
            .bind(location_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }
}
