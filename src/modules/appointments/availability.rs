use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::availability::{compute_available_slots, BookingWindow, BusyInterval};
use crate::db::{hms, AppointmentRepository, ProfessionalRepository, ServiceRepository, weekday_index};
use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Both fields carry the formatted slot time; the shape is what the booking
/// frontend's select widget consumes.
#[derive(Debug, Serialize)]
pub struct AvailableTime {
    pub id: String,
    pub name: String,
}

/// `GET /available_times/{professional_id}/{service_id}/{date}` — the
/// bookable start times for one professional, service, and day.
pub async fn available_times(
    State(state): State<AppState>,
    Path((professional_id, service_id, date)): Path<(Uuid, Uuid, String)>,
) -> AppResult<Json<Vec<AvailableTime>>> {
    let date = Date::parse(&date, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest("Invalid date, expected YYYY-MM-DD".to_string()))?;

    let service = ServiceRepository::get(&state.db, service_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {service_id} not found")))?;
    ProfessionalRepository::get(&state.db, professional_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {professional_id} not found")))?;

    let offset = state.env.app.utc_offset();
    let windows: Vec<BookingWindow> =
        ServiceRepository::enabled_timeframes_for_weekday(&state.db, service_id, weekday_index(date.weekday()))
            .await?
            .into_iter()
            .map(|frame| BookingWindow {
                start: frame.start_time,
                end: frame.end_time,
            })
            .collect();

    let day_start = date.midnight().assume_offset(offset);
    let busy: Vec<BusyInterval> =
        AppointmentRepository::busy_between(&state.db, professional_id, day_start, day_start + Duration::days(1))
            .await?
            .into_iter()
            .map(|(start, end)| BusyInterval {
                start: start.to_offset(offset).time(),
                end: end.to_offset(offset).time(),
            })
            .collect();

    let today = OffsetDateTime::now_utc().to_offset(offset).date();
    let slots = compute_available_slots(
        date,
        today,
        &windows,
        &busy,
        service.duration(),
        service.buffer(),
        true,
    );

    let mut times = Vec::with_capacity(slots.len());
    for slot in slots {
        let formatted = slot
            .format(hms::FORMAT)
            .map_err(|err| AppError::InternalServerError(err.to_string()))?;
        times.push(AvailableTime {
            id: formatted.clone(),
            name: formatted,
        });
    }
    Ok(Json(times))
}
