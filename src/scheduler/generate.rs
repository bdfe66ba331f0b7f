use super::{types::SchedError, ScheduleOptions, WeekendBoundary};
use crate::calendar;
use crate::model::{SkipSet, Slot};
use chrono::{Datelike, NaiveDate, Weekday};

/// Découpe `[start, end]` en créneaux, dans l'ordre chronologique.
pub fn generate_slots(
    start: NaiveDate,
    end: NaiveDate,
    skip: &SkipSet,
    opts: ScheduleOptions,
) -> Result<Vec<Slot>, SchedError> {
    let days = calendar::expand(start, end)?;
    let mut slots = Vec::new();

    for day in days {
        if skip.contains(&day) {
            trace_event!(debug, %day, "skipping holiday");
            continue;
        }

        match day.weekday() {
            // absorbé par le week-end du vendredi
            Weekday::Sat => {}
            Weekday::Fri => {
                let slot = Slot::weekend(day)?;
                if skip.intersects(slot.start, slot.end) {
                    trace_event!(debug, %day, "weekend dropped: holiday inside");
                    continue;
                }
                if opts.weekend_boundary == WeekendBoundary::Contain && slot.end > end {
                    trace_event!(debug, %day, "weekend dropped: past end of window");
                    continue;
                }
                slots.push(slot);
            }
            _ => slots.push(Slot::weekday(day)?),
        }
    }

    trace_event!(
        info,
        total = slots.len(),
        skipped = skip.len(),
        "slots generated"
    );
    Ok(slots)
}
