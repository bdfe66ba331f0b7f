use crate::model::{Capacity, Category, Roster, SkipSet};
use crate::scheduler::{ScheduleOptions, WeekendBoundary};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Paramètres d'un run, lus depuis un fichier JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub weekend_boundary: WeekendBoundary,
    /// Plafond de week-ends appliqué à ceux qui n'en ont pas dans le CSV.
    #[serde(default)]
    pub default_max_weekends: Option<u32>,
    #[serde(default)]
    pub default_max_weekdays: Option<u32>,
    #[serde(default)]
    pub holidays: Vec<HolidayRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRange {
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl ScheduleConfig {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            weekend_boundary: WeekendBoundary::default(),
            default_max_weekends: None,
            default_max_weekdays: None,
            holidays: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            bail!("end date must not be before start date");
        }
        for h in &self.holidays {
            if let Some(end) = h.end {
                if end < h.start {
                    bail!("holiday starting {} ends before it starts", h.start);
                }
            }
        }
        Ok(())
    }

    pub fn options(&self) -> ScheduleOptions {
        ScheduleOptions {
            weekend_boundary: self.weekend_boundary,
        }
    }

    /// Ajoute les fériés du fichier et pose les plafonds par défaut sur les
    /// personnes restées illimitées.
    pub fn apply(&self, roster: &mut Roster, skip: &mut SkipSet) -> Result<()> {
        for h in &self.holidays {
            skip.add_range(h.start, h.end)
                .with_context(|| format!("holiday starting {}", h.start))?;
        }

        let defaults = [
            (Category::Weekend, self.default_max_weekends),
            (Category::Weekday, self.default_max_weekdays),
        ];
        let ids: Vec<_> = roster.people().iter().map(|p| p.id.clone()).collect();
        for id in ids {
            for (category, limit) in defaults {
                let Some(limit) = limit else { continue };
                if let Some(person) = roster.get_mut(&id) {
                    if *person.capacity.get(category) == Capacity::Unlimited {
                        person.set_capacity(category, Capacity::Limited(limit));
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<ScheduleConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: ScheduleConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &ScheduleConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
