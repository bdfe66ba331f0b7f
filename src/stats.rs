use crate::model::{Category, DayKind, PersonId, Slot};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::HashMap;

/// Compteurs d'une personne sur un planning terminé.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PersonStats {
    pub person: PersonId,
    pub weekdays: u32,
    pub weekends: u32,
    /// Indexé par [`DayKind::index`].
    pub by_day: [u32; 5],
}

impl PersonStats {
    fn new(person: PersonId) -> Self {
        Self {
            person,
            weekdays: 0,
            weekends: 0,
            by_day: [0; 5],
        }
    }

    pub fn total(&self, category: Category) -> u32 {
        match category {
            Category::Weekday => self.weekdays,
            Category::Weekend => self.weekends,
        }
    }

    pub fn day(&self, day: DayKind) -> u32 {
        self.by_day[day.index()]
    }
}

/// Résumé par personne, dans l'ordre de première apparition dans le planning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    pub entries: Vec<PersonStats>,
    /// Créneaux sans personne (planning incomplet).
    pub unassigned: usize,
}

impl Summary {
    pub fn get(&self, person: &PersonId) -> Option<&PersonStats> {
        self.entries.iter().find(|e| &e.person == person)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&PersonStats> {
        self.entries.iter().find(|e| e.person.as_str() == name)
    }
}

/// Agrège les créneaux assignés. Lecture seule.
pub fn summarize(slots: &[Slot]) -> Summary {
    let mut summary = Summary::default();
    let mut index: HashMap<&PersonId, usize> = HashMap::new();

    for slot in slots {
        let Some(person) = slot.assigned.as_ref() else {
            summary.unassigned += 1;
            continue;
        };
        let pos = *index.entry(person).or_insert_with(|| {
            summary.entries.push(PersonStats::new(person.clone()));
            summary.entries.len() - 1
        });
        let entry = &mut summary.entries[pos];
        match slot.category {
            Category::Weekday => entry.weekdays += 1,
            Category::Weekend => entry.weekends += 1,
        }
        if let Some(day) = slot.day {
            entry.by_day[day.index()] += 1;
        }
    }

    summary
}
