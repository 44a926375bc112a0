use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{AdditionalQuestion, QuestionInput, Service, ServicePayload, TimeFrame, TimeFrameInput};

const SERVICE_COLUMNS: &str = "id, company_id, name, description, price, duration_minutes, \
     buffer_minutes, professional_is_selectable, active, created_at, updated_at";

const TIMEFRAME_COLUMNS: &str = "id, service_id, weekday, start_time, end_time, is_enabled";

pub struct ServiceRepository;

impl ServiceRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        data: &ServicePayload,
    ) -> Result<Service, Error> {
        sqlx::query_as::<_, Service>(&format!(
            "INSERT INTO services \
                 (company_id, name, description, price, duration_minutes, buffer_minutes, \
                  professional_is_selectable) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(data.company_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.duration_minutes)
        .bind(data.buffer_minutes)
        .bind(data.professional_is_selectable)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        service_id: Uuid,
        data: &ServicePayload,
    ) -> Result<Service, Error> {
        sqlx::query_as::<_, Service>(&format!(
            "UPDATE services \
             SET name = $1, \
                 description = $2, \
                 price = $3, \
                 duration_minutes = $4, \
                 buffer_minutes = $5, \
                 professional_is_selectable = $6, \
                 updated_at = NOW() \
             WHERE id = $7 AND active \
             RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.duration_minutes)
        .bind(data.buffer_minutes)
        .bind(data.professional_is_selectable)
        .bind(service_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn get(pool: &PgPool, service_id: Uuid) -> Result<Option<Service>, Error> {
        sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1 AND active"
        ))
        .bind(service_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(pool: &PgPool, company: Option<Uuid>) -> Result<Vec<Service>, Error> {
        sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services \
             WHERE active AND ($1::uuid IS NULL OR company_id = $1) \
             ORDER BY name"
        ))
        .bind(company)
        .fetch_all(pool)
        .await
    }

    pub async fn soft_delete(pool: &PgPool, service_id: Uuid) -> Result<(), Error> {
        let result = sqlx::query("UPDATE services SET active = FALSE WHERE id = $1 AND active")
            .bind(service_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }

    /// Replaces the service's whole weekly schedule.
    pub async fn replace_timeframes(
        tx: &mut Transaction<'_, Postgres>,
        service_id: Uuid,
        frames: &[TimeFrameInput],
    ) -> Result<Vec<TimeFrame>, Error> {
        sqlx::query("DELETE FROM timeframes WHERE service_id = $1")
            .bind(service_id)
            .execute(&mut **tx)
            .await?;

        let mut saved = Vec::with_capacity(frames.len());
        for frame in frames {
            let row = sqlx::query_as::<_, TimeFrame>(&format!(
                "INSERT INTO timeframes (service_id, weekday, start_time, end_time, is_enabled) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {TIMEFRAME_COLUMNS}"
            ))
            .bind(service_id)
            .bind(frame.weekday)
            .bind(frame.start_time)
            .bind(frame.end_time)
            .bind(frame.is_enabled)
            .fetch_one(&mut **tx)
            .await?;
            saved.push(row);
        }
        Ok(saved)
    }

    pub async fn timeframes(pool: &PgPool, service_id: Uuid) -> Result<Vec<TimeFrame>, Error> {
        sqlx::query_as::<_, TimeFrame>(&format!(
            "SELECT {TIMEFRAME_COLUMNS} FROM timeframes \
             WHERE service_id = $1 \
             ORDER BY weekday, start_time"
        ))
        .bind(service_id)
        .fetch_all(pool)
        .await
    }

    /// The configured windows the availability computation runs over.
    pub async fn enabled_timeframes_for_weekday(
        pool: &PgPool,
        service_id: Uuid,
        weekday: i16,
    ) -> Result<Vec<TimeFrame>, Error> {
        sqlx::query_as::<_, TimeFrame>(&format!(
            "SELECT {TIMEFRAME_COLUMNS} FROM timeframes \
             WHERE service_id = $1 AND weekday = $2 AND is_enabled \
             ORDER BY start_time"
        ))
        .bind(service_id)
        .bind(weekday)
        .fetch_all(pool)
        .await
    }

    /// Questions are soft-deleted so past responses keep their reference.
    pub async fn replace_questions(
        tx: &mut Transaction<'_, Postgres>,
        service_id: Uuid,
        questions: &[QuestionInput],
    ) -> Result<Vec<AdditionalQuestion>, Error> {
        sqlx::query("UPDATE additional_questions SET active = FALSE WHERE service_id = $1")
            .bind(service_id)
            .execute(&mut **tx)
            .await?;

        let mut saved = Vec::with_capacity(questions.len());
        for question in questions {
            let row = sqlx::query_as::<_, AdditionalQuestion>(
                "INSERT INTO additional_questions (service_id, text) \
                 VALUES ($1, $2) \
                 RETURNING id, service_id, text, active",
            )
            .bind(service_id)
            .bind(&question.text)
            .fetch_one(&mut **tx)
            .await?;
            saved.push(row);
        }
        Ok(saved)
    }

    pub async fn questions(pool: &PgPool, service_id: Uuid) -> Result<Vec<AdditionalQuestion>, Error> {
        sqlx::query_as::<_, AdditionalQuestion>(
            "SELECT id, service_id, text, active FROM additional_questions \
             WHERE service_id = $1 AND active",
        )
        .bind(service_id)
        .fetch_all(pool)
        .await
    }
}
