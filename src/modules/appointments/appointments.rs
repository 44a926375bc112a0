use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::{Date, Time};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{
    hms, Appointment, AppointmentDetails, AppointmentFilter, AppointmentRepository,
    CompanyRepository, Customer, CustomerRepository, DatabaseError, LocationRepository,
    NewAppointment, NewBookingPayload, NewCustomer, NotificationRepository,
    ProfessionalRepository, QuestionResponse, ServiceRepository, UpdateAppointment,
};
use crate::error::{AppError, AppResult};
use crate::notifier::{booking_notifications, BookingNotificationContext};
use crate::pagination::{Page, PageParams};

use super::availability::DATE_FORMAT;

#[derive(Debug, Serialize)]
pub struct AppointmentItem {
    #[serde(flatten)]
    pub details: AppointmentDetails,
    pub title: String,
}

impl From<AppointmentDetails> for AppointmentItem {
    fn from(details: AppointmentDetails) -> Self {
        let title = details.title();
        AppointmentItem { details, title }
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentWithResponses {
    #[serde(flatten)]
    pub item: AppointmentItem,
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub customer: Customer,
    pub appointment: Appointment,
}

/// Public booking endpoint: upserts the customer, books the slot, and queues
/// the notification hand-offs, all in one transaction.
pub async fn new_appointment(
    State(state): State<AppState>,
    Json(payload): Json<NewBookingPayload>,
) -> AppResult<(StatusCode, Json<BookingConfirmation>)> {
    payload.validate()?;

    let date = Date::parse(&payload.date, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest("The selected date is invalid".to_string()))?;
    let time = Time::parse(&payload.time, hms::FORMAT)
        .map_err(|_| AppError::BadRequest("The selected time is invalid".to_string()))?;

    let service = ServiceRepository::get(&state.db, payload.service)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", payload.service)))?;
    LocationRepository::get(&state.db, payload.location)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location {} not found", payload.location)))?;
    ProfessionalRepository::get(&state.db, payload.professional)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Professional {} not found", payload.professional))
        })?;
    let company = CompanyRepository::get(&state.db, service.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    let profile = CompanyRepository::profile_by_company(&state.db, service.company_id).await?;

    let offset = state.env.app.utc_offset();
    let start_at = date.with_time(time).assume_offset(offset);
    let end_at = start_at + service.duration();

    let contact = NewCustomer {
        first_name: payload.name.clone(),
        last_name: payload.last_name.clone(),
        email: Some(payload.email.clone()),
        phone: Some(payload.phone.clone()),
        citizen_id: Some(payload.citizen_id),
    };
    let existing = match CustomerRepository::find_by_citizen_id(&state.db, payload.citizen_id)
        .await?
    {
        Some(customer) => Some(customer),
        None => CustomerRepository::find_by_email(&state.db, &payload.email).await?,
    };

    let mut tx = state.db.begin().await?;

    let customer = match existing {
        Some(customer) => CustomerRepository::update_contact(&mut tx, customer.id, &contact).await?,
        None => CustomerRepository::create(&mut tx, &contact).await?,
    };

    let appointment = AppointmentRepository::create(
        &mut tx,
        &NewAppointment {
            location_id: payload.location,
            service_id: payload.service,
            professional_id: payload.professional,
            customer_id: customer.id,
            start_at,
            end_at,
            observations: payload.observations.clone(),
        },
    )
    .await
    .map_err(|err| match DatabaseError::from(err) {
        DatabaseError::Duplicate => {
            AppError::Conflict("The selected time is no longer available".to_string())
        }
        other => AppError::Database(other),
    })?;

    AppointmentRepository::insert_responses(&mut tx, appointment.id, &payload.responses).await?;

    let notifications = booking_notifications(&BookingNotificationContext {
        appointment: &appointment,
        customer: &customer,
        company_email: &company.email,
        reviews_link: profile.as_ref().and_then(|p| p.reviews_link.as_deref()),
    });
    for notification in &notifications {
        NotificationRepository::enqueue(&mut tx, notification).await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingConfirmation { customer, appointment }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AppointmentQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub date_gt: Option<String>,
    pub date_lt: Option<String>,
    pub company: Option<Uuid>,
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<Page<AppointmentItem>>> {
    let offset = state.env.app.utc_offset();
    let parse_boundary = |raw: &Option<String>| -> AppResult<Option<time::OffsetDateTime>> {
        match raw {
            Some(value) => {
                let date = Date::parse(value, DATE_FORMAT).map_err(|_| {
                    AppError::BadRequest("Invalid date filter, expected YYYY-MM-DD".to_string())
                })?;
                Ok(Some(date.midnight().assume_offset(offset)))
            }
            None => Ok(None),
        }
    };

    let filter = AppointmentFilter {
        search: query.search.clone(),
        date_gt: parse_boundary(&query.date_gt)?,
        date_lt: parse_boundary(&query.date_lt)?,
        company: query.company,
        ordering: query.ordering.clone(),
    };

    let (rows, count) =
        AppointmentRepository::list(&state.db, &filter, page.limit_offset()).await?;
    let results = rows.into_iter().map(AppointmentItem::from).collect();
    Ok(Json(Page { count, results }))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<Json<AppointmentWithResponses>> {
    let details = AppointmentRepository::get_details(&state.db, appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {appointment_id} not found")))?;
    let responses = AppointmentRepository::responses_for(&state.db, appointment_id).await?;
    Ok(Json(AppointmentWithResponses {
        item: AppointmentItem::from(details),
        responses,
    }))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<UpdateAppointment>,
) -> AppResult<Json<Appointment>> {
    payload.validate()?;
    let appointment = AppointmentRepository::update(&state.db, appointment_id, &payload).await?;
    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    AppointmentRepository::soft_delete(&state.db, appointment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
