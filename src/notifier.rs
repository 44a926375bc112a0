use sqlx::PgPool;
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::db::{
    Appointment, AppointmentRepository, Customer, NewNotification, NotificationKind,
    NotificationRepository, UpdateAppointment,
};

const DRAIN_INTERVAL_SECS: u64 = 30;
const DRAIN_BATCH: i64 = 50;

pub struct BookingNotificationContext<'a> {
    pub appointment: &'a Appointment,
    pub customer: &'a Customer,
    pub company_email: &'a str,
    pub reviews_link: Option<&'a str>,
}

/// Notification rows recorded for a fresh booking: immediate confirmations
/// for both parties, a reminder one day before the start, and a review
/// request one hour after the end when the company collects reviews.
/// Customer-facing mails are skipped for customers without an email address.
pub fn booking_notifications(ctx: &BookingNotificationContext) -> Vec<NewNotification> {
    let appointment = ctx.appointment;
    let start = appointment
        .start_at
        .format(&Rfc3339)
        .unwrap_or_default();
    let customer_name = ctx.customer.full_name();

    let mut notifications = vec![NewNotification {
        appointment_id: appointment.id,
        kind: NotificationKind::CompanyNotification,
        recipient_email: ctx.company_email.to_string(),
        subject: format!("¡Nueva reserva confirmada! - {customer_name} | {start}"),
        send_after: appointment.created_at,
    }];

    let Some(customer_email) = ctx.customer.email.as_deref() else {
        return notifications;
    };

    notifications.push(NewNotification {
        appointment_id: appointment.id,
        kind: NotificationKind::CustomerConfirmation,
        recipient_email: customer_email.to_string(),
        subject: format!("¡Nueva reserva confirmada! - {customer_name} | {start}"),
        send_after: appointment.created_at,
    });
    notifications.push(NewNotification {
        appointment_id: appointment.id,
        kind: NotificationKind::AppointmentReminder,
        recipient_email: customer_email.to_string(),
        subject: format!("¡Recuerda tu cita! - {customer_name} | {start}"),
        send_after: appointment.start_at - Duration::days(1),
    });
    if ctx.reviews_link.is_some() {
        notifications.push(NewNotification {
            appointment_id: appointment.id,
            kind: NotificationKind::ReviewRequest,
            recipient_email: customer_email.to_string(),
            subject: "¡Calificanos!".to_string(),
            send_after: appointment.end_at + Duration::hours(1),
        });
    }

    notifications
}

/// Periodically hands due notifications over to the external mail delivery.
/// Delivery itself lives outside this service; the hand-off is logged and the
/// row stamped so it is only claimed once.
pub async fn run(pool: PgPool) {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(DRAIN_INTERVAL_SECS));
    loop {
        ticker.tick().await;
        if let Err(err) = drain_due(&pool).await {
            warn!("Notification drain failed: {}", err);
        }
    }
}

async fn drain_due(pool: &PgPool) -> Result<(), sqlx::Error> {
    let now = OffsetDateTime::now_utc();
    let due = NotificationRepository::due(pool, now, DRAIN_BATCH).await?;
    for notification in due {
        info!(
            kind = ?notification.kind,
            recipient = %notification.recipient_email,
            subject = %notification.subject,
            "Dispatching notification to mail delivery"
        );
        NotificationRepository::mark_sent(pool, notification.id, now).await?;

        let flag_update = match notification.kind {
            NotificationKind::AppointmentReminder => Some(UpdateAppointment {
                reminder_sent: Some(true),
                ..Default::default()
            }),
            NotificationKind::ReviewRequest => Some(UpdateAppointment {
                review_email_sent: Some(true),
                ..Default::default()
            }),
            _ => None,
        };
        if let Some(update) = flag_update {
            if let Err(err) =
                AppointmentRepository::update(pool, notification.appointment_id, &update).await
            {
                warn!(
                    appointment_id = %notification.appointment_id,
                    "Failed to stamp notification flag: {}", err
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn appointment() -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            start_at: datetime!(2024-05-10 14:00 UTC),
            end_at: datetime!(2024-05-10 14:45 UTC),
            is_complete: false,
            observations: String::new(),
            reminder_sent: false,
            review_email_sent: false,
            active: true,
            created_at: datetime!(2024-05-01 09:30 UTC),
        }
    }

    fn customer(email: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: email.map(str::to_string),
            phone: None,
            citizen_id: Some(1_234_567),
            created_at: datetime!(2024-05-01 09:30 UTC),
            updated_at: datetime!(2024-05-01 09:30 UTC),
        }
    }

    #[test]
    fn full_booking_schedules_four_notifications() {
        let appointment = appointment();
        let customer = customer(Some("ana@example.com"));
        let notifications = booking_notifications(&BookingNotificationContext {
            appointment: &appointment,
            customer: &customer,
            company_email: "owner@example.com",
            reviews_link: Some("https://g.page/example/review"),
        });

        assert_eq!(notifications.len(), 4);

        let reminder = notifications
            .iter()
            .find(|n| n.kind == NotificationKind::AppointmentReminder)
            .unwrap();
        assert_eq!(reminder.send_after, datetime!(2024-05-09 14:00 UTC));

        let review = notifications
            .iter()
            .find(|n| n.kind == NotificationKind::ReviewRequest)
            .unwrap();
        assert_eq!(review.send_after, datetime!(2024-05-10 15:45 UTC));
    }

    #[test]
    fn review_request_needs_a_reviews_link() {
        let appointment = appointment();
        let customer = customer(Some("ana@example.com"));
        let notifications = booking_notifications(&BookingNotificationContext {
            appointment: &appointment,
            customer: &customer,
            company_email: "owner@example.com",
            reviews_link: None,
        });

        assert_eq!(notifications.len(), 3);
        assert!(notifications
            .iter()
            .all(|n| n.kind != NotificationKind::ReviewRequest));
    }

    #[test]
    fn customers_without_email_only_notify_the_company() {
        let appointment = appointment();
        let customer = customer(None);
        let notifications = booking_notifications(&BookingNotificationContext {
            appointment: &appointment,
            customer: &customer,
            company_email: "owner@example.com",
            reviews_link: Some("https://g.page/example/review"),
        });

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::CompanyNotification);
        assert_eq!(notifications[0].recipient_email, "owner@example.com");
    }

    #[test]
    fn confirmations_are_due_immediately() {
        let appointment = appointment();
        let customer = customer(Some("ana@example.com"));
        let notifications = booking_notifications(&BookingNotificationContext {
            appointment: &appointment,
            customer: &customer,
            company_email: "owner@example.com",
            reviews_link: None,
        });

        for kind in [
            NotificationKind::CompanyNotification,
            NotificationKind::CustomerConfirmation,
        ] {
            let notification = notifications.iter().find(|n| n.kind == kind).unwrap();
            assert_eq!(notification.send_after, appointment.created_at);
        }
    }
}
