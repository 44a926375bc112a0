use sqlx::{Error, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{
    Appointment, AppointmentDetails, NewAppointment, QuestionResponse, QuestionResponseInput,
    UpdateAppointment,
};

const COLUMNS: &str = "id, location_id, service_id, professional_id, customer_id, start_at, \
     end_at, is_complete, observations, reminder_sent, review_email_sent, active, created_at";

const DETAIL_COLUMNS: &str = "a.id, a.location_id, a.service_id, a.professional_id, \
     a.customer_id, s.company_id, a.start_at, a.end_at, a.is_complete, a.observations, \
     a.reminder_sent, a.review_email_sent, a.created_at, \
     c.first_name || ' ' || c.last_name AS customer_name, \
     s.name AS service_name, l.name AS location_name, p.name AS professional_name";

const DETAIL_JOINS: &str = "FROM appointments a \
     JOIN customers c ON c.id = a.customer_id \
     JOIN services s ON s.id = a.service_id \
     JOIN locations l ON l.id = a.location_id \
     JOIN professionals p ON p.id = a.professional_id";

const LIST_FILTERS: &str = "a.active \
     AND ($1::text IS NULL \
          OR c.first_name ILIKE '%' || $1 || '%' \
          OR c.last_name ILIKE '%' || $1 || '%' \
          OR s.name ILIKE '%' || $1 || '%' \
          OR l.name ILIKE '%' || $1 || '%' \
          OR p.name ILIKE '%' || $1 || '%') \
     AND ($2::timestamptz IS NULL OR a.start_at > $2) \
     AND ($3::timestamptz IS NULL OR a.end_at < $3) \
     AND ($4::uuid IS NULL OR s.company_id = $4)";

/// List-endpoint filters; text search spans the joined display names.
#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    pub search: Option<String>,
    pub date_gt: Option<OffsetDateTime>,
    pub date_lt: Option<OffsetDateTime>,
    pub company: Option<Uuid>,
    pub ordering: Option<String>,
}

/// Maps a client ordering key onto a vetted ORDER BY clause; anything else
/// falls back to id order.
pub fn order_clause(ordering: Option<&str>) -> &'static str {
    let (key, descending) = match ordering {
        Some(raw) => match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        },
        None => ("id", false),
    };
    match (key, descending) {
        ("id", false) => "a.id",
        ("id", true) => "a.id DESC",
        ("date" | "start_at", false) => "a.start_at",
        ("date" | "start_at", true) => "a.start_at DESC",
        ("service_name", false) => "s.name",
        ("service_name", true) => "s.name DESC",
        ("location_name", false) => "l.name",
        ("location_name", true) => "l.name DESC",
        ("professional_name", false) => "p.name",
        ("professional_name", true) => "p.name DESC",
        _ => "a.id",
    }
}

pub struct AppointmentRepository;

impl AppointmentRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        data: &NewAppointment,
    ) -> Result<Appointment, Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointments \
                 (location_id, service_id, professional_id, customer_id, start_at, end_at, \
                  observations) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(data.location_id)
        .bind(data.service_id)
        .bind(data.professional_id)
        .bind(data.customer_id)
        .bind(data.start_at)
        .bind(data.end_at)
        .bind(&data.observations)
        .fetch_one(&mut **tx)
        .await
    }

    /// Live bookings whose start falls inside `[from, to)`; the source of the
    /// busy intervals fed into the slot computation.
    pub async fn busy_between(
        pool: &PgPool,
        professional_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<(OffsetDateTime, OffsetDateTime)>, Error> {
        sqlx::query_as::<_, (OffsetDateTime, OffsetDateTime)>(
            "SELECT start_at, end_at FROM appointments \
             WHERE professional_id = $1 AND active AND start_at >= $2 AND start_at < $3",
        )
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &AppointmentFilter,
        limit_offset: Option<(i64, i64)>,
    ) -> Result<(Vec<AppointmentDetails>, i64), Error> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) {DETAIL_JOINS} WHERE {LIST_FILTERS}"
        ))
        .bind(&filter.search)
        .bind(filter.date_gt)
        .bind(filter.date_lt)
        .bind(filter.company)
        .fetch_one(pool)
        .await?;

        let order = order_clause(filter.ordering.as_deref());
        let mut sql = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE {LIST_FILTERS} ORDER BY {order}"
        );
        if limit_offset.is_some() {
            sql.push_str(" LIMIT $5 OFFSET $6");
        }
        let mut query = sqlx::query_as::<_, AppointmentDetails>(&sql)
            .bind(&filter.search)
            .bind(filter.date_gt)
            .bind(filter.date_lt)
            .bind(filter.company);
        if let Some((limit, offset)) = limit_offset {
            query = query.bind(limit).bind(offset);
        }
        let appointments = query.fetch_all(pool).await?;

        Ok((appointments, count))
    }

    pub async fn get_details(
        pool: &PgPool,
        appointment_id: Uuid,
    ) -> Result<Option<AppointmentDetails>, Error> {
        sqlx::query_as::<_, AppointmentDetails>(&format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE a.id = $1 AND a.active"
        ))
        .bind(appointment_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        appointment_id: Uuid,
        data: &UpdateAppointment,
    ) -> Result<Appointment, Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments \
             SET start_at = COALESCE($1, start_at), \
                 end_at = COALESCE($2, end_at), \
                 is_complete = COALESCE($3, is_complete), \
                 observations = COALESCE($4, observations), \
                 reminder_sent = COALESCE($5, reminder_sent), \
                 review_email_sent = COALESCE($6, review_email_sent) \
             WHERE id = $7 AND active \
             RETURNING {COLUMNS}"
        ))
        .bind(data.start_at)
        .bind(data.end_at)
        .bind(data.is_complete)
        .bind(&data.observations)
        .bind(data.reminder_sent)
        .bind(data.review_email_sent)
        .bind(appointment_id)
        .fetch_one(pool)
        .await
    }

    pub async fn soft_delete(pool: &PgPool, appointment_id: Uuid) -> Result<(), Error> {
        let result =
            sqlx::query("UPDATE appointments SET active = FALSE WHERE id = $1 AND active")
                .bind(appointment_id)
                .execute(pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }

    pub async fn insert_responses(
        tx: &mut Transaction<'_, Postgres>,
        appointment_id: Uuid,
        responses: &[QuestionResponseInput],
    ) -> Result<(), Error> {
        for item in responses {
            sqlx::query(
                "INSERT INTO question_responses (appointment_id, question_id, response) \
                 VALUES ($1, $2, $3)",
            )
            .bind(appointment_id)
            .bind(item.question_id)
            .bind(&item.response)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    pub async fn responses_for(
        pool: &PgPool,
        appointment_id: Uuid,
    ) -> Result<Vec<QuestionResponse>, Error> {
        sqlx::query_as::<_, QuestionResponse>(
            "SELECT id, appointment_id, question_id, response FROM question_responses \
             WHERE appointment_id = $1",
        )
        .bind(appointment_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::order_clause;

    #[test]
    fn ordering_keys_are_vetted() {
        assert_eq!(order_clause(None), "a.id");
        assert_eq!(order_clause(Some("date")), "a.start_at");
        assert_eq!(order_clause(Some("-date")), "a.start_at DESC");
        assert_eq!(order_clause(Some("service_name")), "s.name");
        assert_eq!(order_clause(Some("-professional_name")), "p.name DESC");
        // Anything unexpected falls back to a stable default.
        assert_eq!(order_clause(Some("customer_id; DROP TABLE")), "a.id");
    }
}
