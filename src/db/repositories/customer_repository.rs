use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{Customer, NewCustomer};

const COLUMNS: &str = "id, first_name, last_name, email, phone, citizen_id, created_at, updated_at";

pub struct CustomerRepository;

impl CustomerRepository {
    pub async fn find_by_citizen_id(
        pool: &PgPool,
        citizen_id: i64,
    ) -> Result<Option<Customer>, Error> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE citizen_id = $1"
        ))
        .bind(citizen_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, Error> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE email = $1"
        ))
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        data: &NewCustomer,
    ) -> Result<Customer, Error> {
        sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customers (first_name, last_name, email, phone, citizen_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.email.as_deref().map(str::to_lowercase))
        .bind(&data.phone)
        .bind(data.citizen_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Refresh a returning customer's contact details from the latest booking.
    pub async fn update_contact(
        tx: &mut Transaction<'_, Postgres>,
        customer_id: Uuid,
        data: &NewCustomer,
    ) -> Result<Customer, Error> {
        sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers \
             SET first_name = $1, \
                 last_name = $2, \
                 email = COALESCE($3, email), \
                 phone = COALESCE($4, phone), \
                 citizen_id = COALESCE($5, citizen_id), \
                 updated_at = NOW() \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.email.as_deref().map(str::to_lowercase))
        .bind(&data.phone)
        .bind(data.citizen_id)
        .bind(customer_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn get(pool: &PgPool, customer_id: Uuid) -> Result<Option<Customer>, Error> {
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customers WHERE id = $1"))
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        limit_offset: Option<(i64, i64)>,
    ) -> Result<(Vec<Customer>, i64), Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await?;

        let mut sql = format!("SELECT {COLUMNS} FROM customers ORDER BY last_name, first_name");
        if limit_offset.is_some() {
            sql.push_str(" LIMIT $1 OFFSET $2");
        }
        let mut query = sqlx::query_as::<_, Customer>(&sql);
        if let Some((limit, offset)) = limit_offset {
            query = query.bind(limit).bind(offset);
        }
        let customers = query.fetch_all(pool).await?;

        Ok((customers, count))
    }
}
