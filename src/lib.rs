#![forbid(unsafe_code)]
//! Gardes — génération de créneaux d'astreinte (semaine / week-end) et
//! répartition gloutonne équitable sur une équipe.
//!
//! - Créneaux : un par jour du lundi au jeudi et le dimanche, un bloc
//!   vendredi → dimanche pour le week-end.
//! - Contraintes : dates bloquées (congés), plafond par catégorie.
//! - Équité : le moins chargé d'abord, puis celui assigné il y a le plus longtemps.
//! - Tout en dates calendaires (`NaiveDate`), pas de fuseau.

/// Événement `tracing` compilé seulement avec la feature `logging`.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "logging")]
        {
            tracing::$level!($($arg)+);
        }
    }};
}

pub mod calendar;
#[cfg(feature = "serde")]
pub mod config;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod stats;

pub use calendar::expand;
#[cfg(feature = "serde")]
pub use config::{load_config_from_file, HolidayRange, ScheduleConfig};
pub use model::{Capacity, Category, DayKind, PerCategory, Person, PersonId, Roster, SkipSet, Slot};
pub use report::{ScheduleRenderer, TextRenderer};
pub use scheduler::{
    assign, generate_slots, rank, SchedError, ScheduleOptions, Scheduler, WeekendBoundary,
};
pub use stats::{summarize, PersonStats, Summary};
