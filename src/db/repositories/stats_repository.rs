use serde::Serialize;
use sqlx::{Error, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ServiceStat {
    pub name: String,
    pub appointments: i64,
    pub revenue: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ProfessionalStat {
    pub name: String,
    pub appointments: i64,
}

/// Dashboard aggregates over a company's live appointments; revenue is the
/// sum of the booked service's price.
pub struct StatsRepository;

impl StatsRepository {
    pub async fn totals(pool: &PgPool, company_id: Uuid) -> Result<(i64, i64, i64), Error> {
        sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT COUNT(a.id), \
                    COALESCE(SUM(s.price), 0)::BIGINT, \
                    COUNT(DISTINCT a.customer_id) \
             FROM appointments a \
             JOIN services s ON s.id = a.service_id \
             WHERE s.company_id = $1 AND a.active",
        )
        .bind(company_id)
        .fetch_one(pool)
        .await
    }

    pub async fn totals_since(
        pool: &PgPool,
        company_id: Uuid,
        since: OffsetDateTime,
    ) -> Result<(i64, i64), Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(a.id), COALESCE(SUM(s.price), 0)::BIGINT \
             FROM appointments a \
             JOIN services s ON s.id = a.service_id \
             WHERE s.company_id = $1 AND a.active AND a.start_at >= $2",
        )
        .bind(company_id)
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Customers whose first booking with the company falls after `since`.
    pub async fn new_customers_since(
        pool: &PgPool,
        company_id: Uuid,
        since: OffsetDateTime,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ( \
                 SELECT a.customer_id, MIN(a.start_at) AS first_booking \
                 FROM appointments a \
                 JOIN services s ON s.id = a.service_id \
                 WHERE s.company_id = $1 AND a.active \
                 GROUP BY a.customer_id) first_bookings \
             WHERE first_booking >= $2",
        )
        .bind(company_id)
        .bind(since)
        .fetch_one(pool)
        .await
    }

    pub async fn per_service(pool: &PgPool, company_id: Uuid) -> Result<Vec<ServiceStat>, Error> {
        sqlx::query_as::<_, ServiceStat>(
            "SELECT s.name, \
                    COUNT(a.id) AS appointments, \
                    COALESCE(SUM(s.price) FILTER (WHERE a.id IS NOT NULL), 0)::BIGINT AS revenue \
             FROM services s \
             LEFT JOIN appointments a ON a.service_id = s.id AND a.active \
             WHERE s.company_id = $1 AND s.active \
             GROUP BY s.name \
             ORDER BY s.name",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    pub async fn per_professional(
        pool: &PgPool,
        company_id: Uuid,
    ) -> Result<Vec<ProfessionalStat>, Error> {
        sqlx::query_as::<_, ProfessionalStat>(
            "SELECT p.name, COUNT(a.id) AS appointments \
             FROM professionals p \
             LEFT JOIN appointments a ON a.professional_id = p.id AND a.active \
             WHERE p.company_id = $1 AND p.active \
             GROUP BY p.name \
             ORDER BY p.name",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }
}
