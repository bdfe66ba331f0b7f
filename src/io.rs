use crate::model::{Capacity, Category, PersonId, Roster, SkipSet, Slot};
use crate::scheduler::SchedError;
use crate::stats::Summary;
use anyhow::Context;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Ligne d'entrée déjà typée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRecord {
    /// Inscrit une personne sans contrainte.
    Person { person: String },
    Vacation {
        person: String,
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    Holiday {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    MaxWeekends { person: String, limit: u32 },
    MaxWeekdays { person: String, limit: u32 },
}

/// Import depuis CSV: header `name,type,start,end,value`
pub fn import_records_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<InputRecord>> {
    let path = path.as_ref();
    let file = fs::File::open(path).with_context(|| format!("reading {}", path.display()))?;
    let records =
        parse_records(file).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

/// Lit les lignes ; celles sans nom ni type sont ignorées. Une ligne `holiday`
/// n'a pas besoin de nom.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<InputRecord>, SchedError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();

    for (idx, rec) in rdr.records().enumerate() {
        // ligne 1 = header
        let line = idx + 2;
        let rec = rec.map_err(|e| SchedError::DataIntegrity(format!("line {line}: {e}")))?;
        let field = |i: usize| rec.get(i).unwrap_or("");

        let name = field(0);
        let kind = field(1).to_ascii_lowercase();
        if name.is_empty() && kind.is_empty() {
            continue;
        }
        let bad = |msg: String| SchedError::DataIntegrity(format!("line {line}: {msg}"));
        if name.is_empty() && kind != "holiday" {
            return Err(bad(format!("missing name for {kind:?} row")));
        }

        let record = match kind.as_str() {
            "person" => InputRecord::Person {
                person: name.to_string(),
            },
            "vacation" | "holiday" => {
                let start = parse_date(field(2)).map_err(&bad)?;
                let end = match field(3) {
                    "" => None,
                    raw => Some(parse_date(raw).map_err(&bad)?),
                };
                if let Some(end) = end {
                    if end < start {
                        return Err(bad(format!("end {end} is before start {start}")));
                    }
                }
                if kind == "vacation" {
                    InputRecord::Vacation {
                        person: name.to_string(),
                        start,
                        end,
                    }
                } else {
                    InputRecord::Holiday { start, end }
                }
            }
            "max_weekends" | "max_weekdays" => {
                let raw = field(4);
                let limit: u32 = raw
                    .parse()
                    .map_err(|_| bad(format!("invalid limit {raw:?}")))?;
                if kind == "max_weekends" {
                    InputRecord::MaxWeekends {
                        person: name.to_string(),
                        limit,
                    }
                } else {
                    InputRecord::MaxWeekdays {
                        person: name.to_string(),
                        limit,
                    }
                }
            }
            other => return Err(bad(format!("unknown row type {other:?}"))),
        };
        out.push(record);
    }
    Ok(out)
}

/// Accepte `MM/DD/YYYY` et `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| format!("invalid date {raw:?}"))
}

/// Construit l'équipe et les jours fériés. Les personnes gardent l'ordre de
/// leur première ligne ; une ligne `holiday` n'inscrit personne.
pub fn ingest(records: &[InputRecord]) -> Result<(Roster, SkipSet), SchedError> {
    let mut roster = Roster::new();
    let mut skip = SkipSet::new();

    for record in records {
        match record {
            InputRecord::Person { person } => {
                roster.ensure_person(person);
            }
            InputRecord::Vacation { person, start, end } => {
                roster
                    .ensure_person(person)
                    .add_blocked_dates(*start, *end)
                    .map_err(|e| integrity(person, e))?;
            }
            InputRecord::Holiday { start, end } => {
                skip.add_range(*start, *end)
                    .map_err(|e| SchedError::DataIntegrity(format!("holiday: {e}")))?;
            }
            InputRecord::MaxWeekends { person, limit } => {
                roster
                    .ensure_person(person)
                    .set_capacity(Category::Weekend, Capacity::Limited(*limit));
            }
            InputRecord::MaxWeekdays { person, limit } => {
                roster
                    .ensure_person(person)
                    .set_capacity(Category::Weekday, Capacity::Limited(*limit));
            }
        }
    }

    trace_event!(
        info,
        people = roster.len(),
        skipped_days = skip.len(),
        "input ingested"
    );
    Ok((roster, skip))
}

fn integrity(person: &str, err: SchedError) -> SchedError {
    SchedError::DataIntegrity(format!("{person}: {err}"))
}

/// Export CSV des créneaux: header `category,day,start,end,assigned`
pub fn export_slots_csv<P: AsRef<Path>>(path: P, slots: &[Slot]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["category", "day", "start", "end", "assigned"])?;
    for s in slots {
        let day = s.day.map(|d| d.short()).unwrap_or("");
        let start = s.start.to_string();
        let end = s.end.to_string();
        let assigned = s.assigned.as_ref().map_or("", PersonId::as_str);
        w.write_record([s.category.as_str(), day, start.as_str(), end.as_str(), assigned])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du résumé: header `name,weekends,weekdays,mon,tue,wed,thu,sun`
pub fn export_stats_csv<P: AsRef<Path>>(path: P, summary: &Summary) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "weekends", "weekdays", "mon", "tue", "wed", "thu", "sun"])?;
    let mut buf = itoa::Buffer::new();
    for e in &summary.entries {
        w.write_field(e.person.as_str())?;
        w.write_field(buf.format(e.weekends))?;
        w.write_field(buf.format(e.weekdays))?;
        for n in e.by_day {
            w.write_field(buf.format(n))?;
        }
        w.write_record(None::<&[u8]>)?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ScheduleDocument<'a> {
    slots: &'a [Slot],
    summary: &'a Summary,
}

/// Export JSON du planning et de son résumé, écrit de manière atomique.
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    slots: &[Slot],
    summary: &Summary,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(&ScheduleDocument { slots, summary })?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
