use crate::scheduler::SchedError;
use chrono::NaiveDate;

/// Liste des jours de `start` à `end`, bornes incluses.
pub fn expand(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, SchedError> {
    ensure_range(start, end)?;
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Valide qu'une plage n'est pas inversée.
pub fn ensure_range(start: NaiveDate, end: NaiveDate) -> Result<(), SchedError> {
    if end < start {
        return Err(SchedError::InvalidRange { start, end });
    }
    Ok(())
}

/// Nombre de jours couverts par `[start, end]`.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}
