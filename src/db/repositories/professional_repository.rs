use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{NewProfessional, Professional, UpdateProfessional};

const COLUMNS: &str = "id, company_id, location_id, name, description, picture_url, active, \
     created_at, updated_at";

pub struct ProfessionalRepository;

impl ProfessionalRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        data: &NewProfessional,
    ) -> Result<Professional, Error> {
        let professional = sqlx::query_as::<_, Professional>(&format!(
            "INSERT INTO professionals (company_id, location_id, name, description, picture_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(data.company_id)
        .bind(data.location_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.picture_url)
        .fetch_one(&mut **tx)
        .await?;

        Self::set_services(tx, professional.id, &data.services).await?;
        Ok(professional)
    }

    pub async fn set_services(
        tx: &mut Transaction<'_, Postgres>,
        professional_id: Uuid,
        services: &[Uuid],
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM professional_services WHERE professional_id = $1")
            .bind(professional_id)
            .execute(&mut **tx)
            .await?;

        for service_id in services {
            sqlx::query(
                "INSERT INTO professional_services (professional_id, service_id) VALUES ($1, $2)",
            )
            .bind(professional_id)
            .bind(service_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    pub async fn services_of(pool: &PgPool, professional_id: Uuid) -> Result<Vec<Uuid>, Error> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT service_id FROM professional_services WHERE professional_id = $1",
        )
        .bind(professional_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get(pool: &PgPool, professional_id: Uuid) -> Result<Option<Professional>, Error> {
        sqlx::query_as::<_, Professional>(&format!(
            "SELECT {COLUMNS} FROM professionals WHERE id = $1 AND active"
        ))
        .bind(professional_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(
        pool: &PgPool,
        company: Option<Uuid>,
        service: Option<Uuid>,
        location: Option<Uuid>,
    ) -> Result<Vec<Professional>, Error> {
        sqlx::query_as::<_, Professional>(&format!(
            "SELECT {COLUMNS} FROM professionals \
             WHERE active \
               AND ($1::uuid IS NULL OR company_id = $1) \
               AND ($2::uuid IS NULL OR id IN ( \
                     SELECT professional_id FROM professional_services WHERE service_id = $2)) \
               AND ($3::uuid IS NULL OR location_id = $3) \
             ORDER BY name"
        ))
        .bind(company)
        .bind(service)
        .bind(location)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        professional_id: Uuid,
        data: &UpdateProfessional,
    ) -> Result<Professional, Error> {
        let professional = sqlx::query_as::<_, Professional>(&format!(
            "UPDATE professionals \
             SET location_id = COALESCE($1, location_id), \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 picture_url = COALESCE($4, picture_url), \
                 updated_at = NOW() \
             WHERE id = $5 AND active \
             RETURNING {COLUMNS}"
        ))
        .bind(data.location_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.picture_url)
        .bind(professional_id)
        .fetch_one(&mut **tx)
        .await?;

        if let Some(services) = &data.services {
            Self::set_services(tx, professional.id, services).await?;
        }
        Ok(professional)
    }

    pub async fn soft_delete(pool: &PgPool, professional_id: Uuid) -> Result<(), Error> {
        let result =
            sqlx::query("UPDATE professionals SET active = FALSE WHERE id = $1 AND active")
                .bind(professional_id)
                .execute(pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }
}
