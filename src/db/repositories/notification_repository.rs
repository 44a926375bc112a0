use sqlx::{Error, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{NewNotification, Notification};

const COLUMNS: &str =
    "id, appointment_id, kind, recipient_email, subject, send_after, sent_at, created_at";

pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn enqueue(
        tx: &mut Transaction<'_, Postgres>,
        data: &NewNotification,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (appointment_id, kind, recipient_email, subject, send_after) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(data.appointment_id)
        .bind(&data.kind)
        .bind(&data.recipient_email)
        .bind(&data.subject)
        .bind(data.send_after)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn due(
        pool: &PgPool,
        now: OffsetDateTime,
        limit: i64,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE sent_at IS NULL AND send_after <= $1 \
             ORDER BY send_after \
             LIMIT $2"
        ))
        .bind(now)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn mark_sent(
        pool: &PgPool,
        notification_id: Uuid,
        now: OffsetDateTime,
    ) -> Result<(), Error> {
        sqlx::query("UPDATE notifications SET sent_at = $1 WHERE id = $2 AND sent_at IS NULL")
            .bind(now)
            .bind(notification_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
