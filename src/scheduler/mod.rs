mod assignment;
mod eligibility;
mod generate;
mod types;

pub use assignment::assign;
pub use eligibility::rank;
pub use generate::generate_slots;
pub use types::{SchedError, ScheduleOptions, WeekendBoundary};

use crate::model::{Person, Roster, SkipSet, Slot};
use chrono::NaiveDate;

/// Scheduler : une équipe, ses jours fériés et les options de génération.
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    skip: SkipSet,
    opts: ScheduleOptions,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(roster: Roster, skip: SkipSet) -> Self {
        Self {
            roster,
            skip,
            opts: ScheduleOptions::default(),
        }
    }

    pub fn options(mut self, opts: ScheduleOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn skip_dates(&self) -> &SkipSet {
        &self.skip
    }
    pub fn skip_dates_mut(&mut self) -> &mut SkipSet {
        &mut self.skip
    }

    pub fn add_people(&mut self, people: Vec<Person>) {
        self.roster.add_people(people);
    }

    /// Créneaux de `[start, end]`, non assignés.
    pub fn generate(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Slot>, SchedError> {
        generate_slots(start, end, &self.skip, self.opts)
    }

    /// Génère puis assigne tous les créneaux de `[start, end]`.
    ///
    /// En cas d'échec, l'équipe garde son état d'avant l'appel.
    pub fn run(&mut self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Slot>, SchedError> {
        let slots = self.generate(start, end)?;
        assign(&mut self.roster, slots)
    }
}
