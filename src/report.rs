use crate::model::{Category, DayKind, Person, Roster, Slot};
use crate::stats::{PersonStats, Summary};
use chrono::NaiveDate;

/// Format d'affichage des dates (celui des fichiers d'entrée).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Permet de customiser le rendu (texte, markdown, etc.).
pub trait ScheduleRenderer {
    fn slot(&self, slot: &Slot) -> String;
    fn person(&self, person: &Person) -> String;
    fn stats(&self, stats: &PersonStats) -> String;

    fn schedule(&self, slots: &[Slot]) -> String {
        slots.iter().map(|s| self.slot(s) + "\n").collect()
    }

    fn roster(&self, roster: &Roster) -> String {
        roster.people().iter().map(|p| self.person(p) + "\n").collect()
    }

    fn summary(&self, summary: &Summary) -> String {
        summary.entries.iter().map(|e| self.stats(e)).collect()
    }
}

/// Rendu texte brut.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ScheduleRenderer for TextRenderer {
    fn slot(&self, slot: &Slot) -> String {
        let who = slot.assigned.as_ref().map_or("-", |p| p.as_str());
        match slot.category {
            Category::Weekday => format!("Weekday: {} assigned to {who}", fmt_date(slot.start)),
            Category::Weekend => format!(
                "Weekend: {} - {} assigned to {who}",
                fmt_date(slot.start),
                fmt_date(slot.end)
            ),
        }
    }

    fn person(&self, person: &Person) -> String {
        let max_weekends = person
            .capacity
            .weekend
            .limit()
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        format!(
            "{:<20} | Day blocked off: {:<2}, Assigned: {} weekends, {} weekdays | Max weekends: {}",
            person.name(),
            person.blocked.len(),
            person.count(Category::Weekend),
            person.count(Category::Weekday),
            max_weekends
        )
    }

    fn stats(&self, stats: &PersonStats) -> String {
        let days: Vec<String> = DayKind::ALL
            .iter()
            .map(|d| format!("{}: {}", d.short(), stats.day(*d)))
            .collect();
        format!(
            "{person}\n\tWeekends: {weekends}, Weekdays: {weekdays}\n\t\t{days}\n",
            person = stats.person,
            weekends = stats.weekends,
            weekdays = stats.weekdays,
            days = days.join(", ")
        )
    }
}

pub fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
