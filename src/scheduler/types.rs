use crate::model::Category;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Traitement d'un week-end qui déborde après la fin de la période demandée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeekendBoundary {
    /// Le créneau vendredi → dimanche est émis en entier, même après `end`.
    #[default]
    Spill,
    /// Le créneau n'est émis que s'il tient dans `[start, end]`.
    Contain,
}

/// Options de génération
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptions {
    pub weekend_boundary: WeekendBoundary,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("no eligible person for {category} slot {start} - {end}")]
    NoEligiblePerson {
        category: Category,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("invalid data: {0}")]
    DataIntegrity(String),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
