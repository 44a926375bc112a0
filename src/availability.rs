use time::{Date, Duration, Time};

/// A start/end time-of-day range during which a service may be booked on a
/// given weekday. Windows are processed independently in the order supplied;
/// overlapping windows are not merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: Time,
    pub end: Time,
}

/// A time range already consumed by an existing appointment. Intervals may
/// arrive in any order and may overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: Time,
    pub end: Time,
}

impl BusyInterval {
    /// Half-open rule: an interval ending exactly at the candidate start does
    /// not block it, one starting exactly at the candidate start does.
    fn blocks(&self, candidate: Duration) -> bool {
        since_midnight(self.start) <= candidate && candidate < since_midnight(self.end)
    }
}

/// Computes the bookable start times for `date`, walking each window from its
/// start in steps of `duration + buffer` and dropping candidates that overlap
/// a busy interval. With `floor_date_check` set, dates on or before `today`
/// yield no slots at all.
///
/// All times are assumed already normalized to the company's operating
/// timezone by the caller.
pub fn compute_available_slots(
    date: Date,
    today: Date,
    windows: &[BookingWindow],
    busy: &[BusyInterval],
    duration: Duration,
    buffer: Duration,
    floor_date_check: bool,
) -> Vec<Time> {
    if floor_date_check && date <= today {
        return Vec::new();
    }

    let step = duration + buffer;
    if duration <= Duration::ZERO || step <= Duration::ZERO {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for window in windows {
        let end = since_midnight(window.end);
        let mut cursor = since_midnight(window.start);
        while cursor + duration <= end {
            if !busy.iter().any(|interval| interval.blocks(cursor)) {
                slots.push(Time::MIDNIGHT + cursor);
            }
            cursor += step;
        }
    }
    slots
}

fn since_midnight(t: Time) -> Duration {
    Duration::seconds(i64::from(t.hour()) * 3600 + i64::from(t.minute()) * 60 + i64::from(t.second()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn window(start: Time, end: Time) -> BookingWindow {
        BookingWindow { start, end }
    }

    fn busy(start: Time, end: Time) -> BusyInterval {
        BusyInterval { start, end }
    }

    const TODAY: Date = date!(2024 - 04 - 01);
    const TOMORROW: Date = date!(2024 - 04 - 02);

    fn slots(
        windows: &[BookingWindow],
        busy: &[BusyInterval],
        duration: Duration,
        buffer: Duration,
    ) -> Vec<Time> {
        compute_available_slots(TOMORROW, TODAY, windows, busy, duration, buffer, true)
    }

    #[test]
    fn fills_a_free_window() {
        let result = slots(
            &[window(time!(07:00), time!(10:00))],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert_eq!(
            result,
            vec![
                time!(07:00),
                time!(07:30),
                time!(08:00),
                time!(08:30),
                time!(09:00),
                time!(09:30),
            ]
        );
    }

    #[test]
    fn skips_slots_covered_by_a_booking() {
        let result = slots(
            &[window(time!(07:00), time!(10:00))],
            &[busy(time!(08:00), time!(08:30))],
            Duration::minutes(30),
            Duration::ZERO,
        );
        // 08:30 stays available: the busy interval's end is exclusive.
        assert_eq!(
            result,
            vec![
                time!(07:00),
                time!(07:30),
                time!(08:30),
                time!(09:00),
                time!(09:30),
            ]
        );
    }

    #[test]
    fn buffer_widens_the_step() {
        let result = slots(
            &[window(time!(13:00), time!(17:00))],
            &[],
            Duration::minutes(45),
            Duration::minutes(15),
        );
        assert_eq!(
            result,
            vec![time!(13:00), time!(14:00), time!(15:00), time!(16:00)]
        );
    }

    #[test]
    fn busy_start_is_inclusive() {
        let result = slots(
            &[window(time!(09:00), time!(11:00))],
            &[busy(time!(09:00), time!(09:15))],
            Duration::minutes(60),
            Duration::ZERO,
        );
        assert_eq!(result, vec![time!(10:00)]);
    }

    #[test]
    fn no_slot_may_overrun_the_window() {
        // 09:30 + 30min lands exactly on the window end and is offered;
        // the next candidate would overrun and is not.
        let result = slots(
            &[window(time!(09:00), time!(10:00))],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert_eq!(result, vec![time!(09:00), time!(09:30)]);

        let clipped = slots(
            &[window(time!(09:00), time!(09:50))],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert_eq!(clipped, vec![time!(09:00)]);
    }

    #[test]
    fn windows_concatenate_in_supplied_order() {
        let result = slots(
            &[
                window(time!(14:00), time!(15:00)),
                window(time!(08:00), time!(09:00)),
            ],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert_eq!(
            result,
            vec![time!(14:00), time!(14:30), time!(08:00), time!(08:30)]
        );
    }

    #[test]
    fn unsorted_overlapping_busy_intervals_are_tolerated() {
        let result = slots(
            &[window(time!(07:00), time!(10:00))],
            &[
                busy(time!(08:45), time!(09:30)),
                busy(time!(08:00), time!(09:00)),
            ],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert_eq!(result, vec![time!(07:00), time!(07:30), time!(09:30)]);
    }

    #[test]
    fn empty_windows_mean_no_availability() {
        let result = slots(&[], &[], Duration::minutes(30), Duration::ZERO);
        assert!(result.is_empty());
    }

    #[test]
    fn today_and_past_dates_yield_nothing() {
        let windows = [window(time!(07:00), time!(10:00))];
        for date in [TODAY, date!(2024 - 03 - 15)] {
            let result = compute_available_slots(
                date,
                TODAY,
                &windows,
                &[],
                Duration::minutes(30),
                Duration::ZERO,
                true,
            );
            assert!(result.is_empty());
        }
    }

    #[test]
    fn date_floor_can_be_disabled() {
        let result = compute_available_slots(
            TODAY,
            TODAY,
            &[window(time!(07:00), time!(08:00))],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
            false,
        );
        assert_eq!(result, vec![time!(07:00), time!(07:30)]);
    }

    #[test]
    fn inverted_window_contributes_nothing() {
        let result = slots(
            &[window(time!(10:00), time!(07:00))],
            &[],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn zero_duration_never_loops() {
        let result = slots(
            &[window(time!(07:00), time!(10:00))],
            &[],
            Duration::ZERO,
            Duration::ZERO,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn fully_booked_window_yields_nothing() {
        let result = slots(
            &[window(time!(07:00), time!(09:00))],
            &[busy(time!(07:00), time!(09:00))],
            Duration::minutes(30),
            Duration::ZERO,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn slots_stay_on_the_step_grid_across_skips() {
        let duration = Duration::minutes(30);
        let buffer = Duration::minutes(10);
        let step = duration + buffer;
        let result = slots(
            &[window(time!(07:00), time!(12:00))],
            &[busy(time!(07:40), time!(08:00))],
            duration,
            buffer,
        );
        // The cursor always advances by the step, so the blocked 07:40
        // candidate leaves a double-step gap and everything stays on grid.
        assert_eq!(result[0], time!(07:00));
        assert_eq!(result[1], time!(08:20));
        for pair in result.windows(2) {
            let gap = pair[1] - pair[0];
            assert_eq!(gap.whole_seconds() % step.whole_seconds(), 0);
            assert!(gap >= step);
        }
    }
}
