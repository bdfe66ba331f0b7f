use crate::calendar;
use crate::scheduler::SchedError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Catégorie de créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    Weekday,
    Weekend,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Weekday, Category::Weekend];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Weekday => "weekday",
            Category::Weekend => "weekend",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jour d'un créneau de semaine. Le samedi et le vendredi n'en font pas partie :
/// ils sont couverts par le créneau de week-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayKind {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Sunday,
}

impl DayKind {
    pub const ALL: [DayKind; 5] = [
        DayKind::Monday,
        DayKind::Tuesday,
        DayKind::Wednesday,
        DayKind::Thursday,
        DayKind::Sunday,
    ];

    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(DayKind::Monday),
            Weekday::Tue => Some(DayKind::Tuesday),
            Weekday::Wed => Some(DayKind::Wednesday),
            Weekday::Thu => Some(DayKind::Thursday),
            Weekday::Sun => Some(DayKind::Sunday),
            Weekday::Fri | Weekday::Sat => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DayKind::Monday => 0,
            DayKind::Tuesday => 1,
            DayKind::Wednesday => 2,
            DayKind::Thursday => 3,
            DayKind::Sunday => 4,
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            DayKind::Monday => "Mon",
            DayKind::Tuesday => "Tue",
            DayKind::Wednesday => "Wed",
            DayKind::Thursday => "Thu",
            DayKind::Sunday => "Sun",
        }
    }
}

/// Une valeur par catégorie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerCategory<T> {
    pub weekday: T,
    pub weekend: T,
}

impl<T> PerCategory<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Weekday => &self.weekday,
            Category::Weekend => &self.weekend,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Weekday => &mut self.weekday,
            Category::Weekend => &mut self.weekend,
        }
    }
}

/// Plafond de créneaux par catégorie sur un run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited(u32),
}

impl Capacity {
    /// Vrai si une personne ayant déjà `count` créneaux peut en prendre un de plus.
    pub fn allows(&self, count: u32) -> bool {
        match self {
            Capacity::Unlimited => true,
            Capacity::Limited(max) => count < *max,
        }
    }

    pub fn limit(&self) -> Option<u32> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Limited(max) => Some(*max),
        }
    }
}

impl From<Option<u32>> for Capacity {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Capacity::Unlimited, Capacity::Limited)
    }
}

/// Identifiant d'une personne : son nom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personne de l'équipe de garde, avec ses contraintes et son état courant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    pub id: PersonId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeSet::is_empty"))]
    pub blocked: BTreeSet<NaiveDate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: PerCategory<Capacity>,
    #[cfg_attr(feature = "serde", serde(default))]
    counts: PerCategory<u32>,
    /// `None` tant que la personne n'a rien reçu : trie avant toute vraie date.
    #[cfg_attr(feature = "serde", serde(default))]
    last_assigned: Option<NaiveDate>,
}

impl Person {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            id: PersonId::new(name),
            blocked: BTreeSet::new(),
            capacity: PerCategory::default(),
            counts: PerCategory::default(),
            last_assigned: None,
        }
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Bloque `[start, end]` ; sans `end`, seul `start` est bloqué.
    pub fn add_blocked_dates(
        &mut self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<(), SchedError> {
        let days = calendar::expand(start, end.unwrap_or(start))?;
        self.blocked.extend(days);
        Ok(())
    }

    pub fn set_capacity(&mut self, category: Category, capacity: Capacity) {
        *self.capacity.get_mut(category) = capacity;
    }

    pub fn count(&self, category: Category) -> u32 {
        *self.counts.get(category)
    }

    pub fn last_assigned(&self) -> Option<NaiveDate> {
        self.last_assigned
    }

    pub fn has_capacity(&self, category: Category) -> bool {
        self.capacity.get(category).allows(self.count(category))
    }

    /// Vrai si aucune date de `[start, end]` n'est bloquée.
    pub fn is_available(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if end < start {
            return true;
        }
        self.blocked.range(start..=end).next().is_none()
    }

    pub fn record_assignment(&mut self, slot: &Slot) {
        *self.counts.get_mut(slot.category) += 1;
        self.last_assigned = Some(slot.end);
    }
}

/// Créneau de garde (dates incluses).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    pub category: Category,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub day: Option<DayKind>,
    pub assigned: Option<PersonId>,
}

impl Slot {
    /// Créneau d'un jour. Échoue pour un vendredi ou un samedi.
    pub fn weekday(date: NaiveDate) -> Result<Self, SchedError> {
        let day = DayKind::from_weekday(date.weekday()).ok_or_else(|| {
            SchedError::DataIntegrity(format!("{date} is not a weekday slot day"))
        })?;
        Ok(Self {
            category: Category::Weekday,
            start: date,
            end: date,
            day: Some(day),
            assigned: None,
        })
    }

    /// Créneau vendredi → dimanche.
    pub fn weekend(friday: NaiveDate) -> Result<Self, SchedError> {
        if friday.weekday() != Weekday::Fri {
            return Err(SchedError::DataIntegrity(format!(
                "weekend slot must start on a friday, got {friday}"
            )));
        }
        Ok(Self {
            category: Category::Weekend,
            start: friday,
            end: friday + Duration::days(2),
            day: None,
            assigned: None,
        })
    }

    pub fn span_days(&self) -> i64 {
        calendar::span_days(self.start, self.end)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Jours exclus de la génération (fériés).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkipSet(BTreeSet<NaiveDate>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute `[start, end]` ; sans `end`, seul `start`.
    pub fn add_range(&mut self, start: NaiveDate, end: Option<NaiveDate>) -> Result<(), SchedError> {
        let days = calendar::expand(start, end.unwrap_or(start))?;
        self.0.extend(days);
        Ok(())
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0.contains(date)
    }

    /// Vrai si un jour de `[start, end]` est exclu.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if end < start {
            return false;
        }
        self.0.range(start..=end).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

impl FromIterator<NaiveDate> for SkipSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Équipe complète : ordre d'insertion conservé, recherche par nom en O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Person>", into = "Vec<Person>"))]
pub struct Roster {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une personne, ou renvoie celle qui porte déjà ce nom.
    pub fn ensure_person(&mut self, name: &str) -> &mut Person {
        let id = PersonId::new(name);
        let pos = match self.index.get(&id) {
            Some(pos) => *pos,
            None => {
                self.people.push(Person::new(name));
                let pos = self.people.len() - 1;
                self.index.insert(id, pos);
                pos
            }
        };
        &mut self.people[pos]
    }

    /// Ajoute des personnes ; un nom déjà présent remplace l'entrée existante.
    pub fn add_people<I: IntoIterator<Item = Person>>(&mut self, people: I) {
        for person in people {
            match self.index.get(&person.id) {
                Some(pos) => self.people[*pos] = person,
                None => {
                    self.index.insert(person.id.clone(), self.people.len());
                    self.people.push(person);
                }
            }
        }
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.index.get(id).map(|pos| &self.people[*pos])
    }

    pub fn get_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.index.get(id).map(|pos| &mut self.people[*pos])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.get(&PersonId::new(name))
    }

    /// Position d'insertion, utilisée pour départager les égalités.
    pub fn position(&self, id: &PersonId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn add_blocked_dates(
        &mut self,
        id: &PersonId,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<(), SchedError> {
        self.person_mut(id)?.add_blocked_dates(start, end)
    }

    pub fn set_capacity(
        &mut self,
        id: &PersonId,
        category: Category,
        capacity: Capacity,
    ) -> Result<(), SchedError> {
        self.person_mut(id)?.set_capacity(category, capacity);
        Ok(())
    }

    pub fn is_available(&self, id: &PersonId, start: NaiveDate, end: NaiveDate) -> Result<bool, SchedError> {
        self.get(id)
            .map(|p| p.is_available(start, end))
            .ok_or_else(|| SchedError::UnknownPerson(id.as_str().to_string()))
    }

    pub fn record_assignment(&mut self, id: &PersonId, slot: &Slot) -> Result<(), SchedError> {
        self.person_mut(id)?.record_assignment(slot);
        Ok(())
    }

    fn person_mut(&mut self, id: &PersonId) -> Result<&mut Person, SchedError> {
        self.get_mut(id)
            .ok_or_else(|| SchedError::UnknownPerson(id.as_str().to_string()))
    }
}

impl From<Vec<Person>> for Roster {
    fn from(people: Vec<Person>) -> Self {
        let mut roster = Roster::new();
        roster.add_people(people);
        roster
    }
}

impl From<Roster> for Vec<Person> {
    fn from(roster: Roster) -> Self {
        roster.people
    }
}
