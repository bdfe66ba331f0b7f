#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use gardes::{
    assign, expand, generate_slots, rank, summarize, Capacity, Category, DayKind, Person, PersonId,
    Roster, SchedError, ScheduleOptions, Scheduler, SkipSet, Slot, WeekendBoundary,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn roster(names: &[&str]) -> Roster {
    Roster::from(names.iter().map(Person::new).collect::<Vec<_>>())
}

fn assignees(slots: &[Slot]) -> Vec<&str> {
    slots
        .iter()
        .map(|s| s.assigned.as_ref().map(PersonId::as_str).unwrap_or("-"))
        .collect()
}

#[test]
fn expand_is_inclusive_and_rejects_inverted_ranges() {
    let days = expand(d(2020, 7, 1), d(2020, 7, 3)).unwrap();
    assert_eq!(days, vec![d(2020, 7, 1), d(2020, 7, 2), d(2020, 7, 3)]);
    assert_eq!(expand(d(2020, 7, 1), d(2020, 7, 1)).unwrap().len(), 1);

    let err = expand(d(2020, 7, 3), d(2020, 7, 1)).unwrap_err();
    assert!(matches!(err, SchedError::InvalidRange { .. }));
}

#[test]
fn inverted_window_is_rejected() {
    let err = generate_slots(
        d(2020, 7, 7),
        d(2020, 7, 1),
        &SkipSet::new(),
        ScheduleOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SchedError::InvalidRange { .. }));

    let mut scheduler = Scheduler::with_inputs(roster(&["Alice"]), SkipSet::new());
    let err = scheduler.run(d(2020, 7, 7), d(2020, 7, 1)).unwrap_err();
    match err {
        SchedError::InvalidRange { start, end } => {
            assert_eq!(start, d(2020, 7, 7));
            assert_eq!(end, d(2020, 7, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
    let alice = scheduler.roster().find_by_name("Alice").unwrap();
    assert_eq!(alice.count(Category::Weekday), 0);
}

#[test]
fn scenario_a_generates_weekdays_and_one_weekend() {
    let slots = generate_slots(
        d(2020, 7, 1),
        d(2020, 7, 7),
        &SkipSet::new(),
        ScheduleOptions::default(),
    )
    .unwrap();

    let shape: Vec<(Category, NaiveDate, NaiveDate, Option<DayKind>)> = slots
        .iter()
        .map(|s| (s.category, s.start, s.end, s.day))
        .collect();
    assert_eq!(
        shape,
        vec![
            (Category::Weekday, d(2020, 7, 1), d(2020, 7, 1), Some(DayKind::Wednesday)),
            (Category::Weekday, d(2020, 7, 2), d(2020, 7, 2), Some(DayKind::Thursday)),
            (Category::Weekend, d(2020, 7, 3), d(2020, 7, 5), None),
            (Category::Weekday, d(2020, 7, 5), d(2020, 7, 5), Some(DayKind::Sunday)),
            (Category::Weekday, d(2020, 7, 6), d(2020, 7, 6), Some(DayKind::Monday)),
            (Category::Weekday, d(2020, 7, 7), d(2020, 7, 7), Some(DayKind::Tuesday)),
        ]
    );
}

#[test]
fn scenario_a_assignment_alternates_from_roster_order() {
    let mut scheduler = Scheduler::with_inputs(roster(&["Alice", "Bob"]), SkipSet::new());
    let slots = scheduler.run(d(2020, 7, 1), d(2020, 7, 7)).unwrap();

    assert_eq!(
        assignees(&slots),
        vec!["Alice", "Bob", "Alice", "Bob", "Alice", "Bob"]
    );

    let alice = scheduler.roster().find_by_name("Alice").unwrap();
    assert_eq!(alice.count(Category::Weekday), 2);
    assert_eq!(alice.count(Category::Weekend), 1);
    assert_eq!(alice.last_assigned(), Some(d(2020, 7, 6)));
}

#[test]
fn scenario_b_blocked_person_skips_weekend() {
    // Bob passe en premier à égalité : seul son blocage peut l'écarter.
    let mut team = roster(&["Bob", "Alice"]);
    team.add_blocked_dates(&PersonId::new("Bob"), d(2020, 7, 3), Some(d(2020, 7, 5)))
        .unwrap();

    let slots = generate_slots(d(2020, 7, 3), d(2020, 7, 3), &SkipSet::new(), ScheduleOptions::default())
        .unwrap();
    assert_eq!(slots.len(), 1);

    let ranked: Vec<&str> = rank(&team, &slots[0]).iter().map(|p| p.name()).collect();
    assert_eq!(ranked, vec!["Alice"]);

    let done = assign(&mut team, slots).unwrap();
    assert_eq!(assignees(&done), vec!["Alice"]);
}

#[test]
fn scenario_b_block_wins_over_lower_count() {
    let mut team = roster(&["Alice", "Bob"]);
    let bob = PersonId::new("Bob");
    team.add_blocked_dates(&bob, d(2020, 7, 3), Some(d(2020, 7, 5))).unwrap();

    let mut scheduler = Scheduler::with_inputs(team, SkipSet::new());
    // deux week-ends : Alice prend le premier à égalité, puis le second
    // malgré un compteur plus haut, car Bob est bloqué
    let slots = scheduler.run(d(2020, 6, 26), d(2020, 7, 5)).unwrap();
    let weekends: Vec<&Slot> = slots
        .iter()
        .filter(|s| s.category == Category::Weekend)
        .collect();
    assert_eq!(weekends.len(), 2);
    assert_eq!(weekends[0].assigned.as_ref().unwrap().as_str(), "Alice");
    assert_eq!(weekends[1].start, d(2020, 7, 3));
    assert_eq!(weekends[1].assigned.as_ref().unwrap().as_str(), "Alice");
    assert!(slots
        .iter()
        .filter(|s| s.assigned.as_ref() == Some(&bob))
        .all(|s| s.end < d(2020, 7, 3) || s.start > d(2020, 7, 5)));
}

#[test]
fn scenario_c_zero_weekend_capacity() {
    let mut team = roster(&["Alice", "Bob"]);
    team.set_capacity(&PersonId::new("Alice"), Category::Weekend, Capacity::Limited(0))
        .unwrap();
    let mut scheduler = Scheduler::with_inputs(team, SkipSet::new());
    let slots = scheduler.run(d(2020, 7, 1), d(2020, 7, 31)).unwrap();
    assert!(slots
        .iter()
        .filter(|s| s.category == Category::Weekend)
        .all(|s| s.assigned.as_ref().unwrap().as_str() == "Bob"));

    let mut alone = roster(&["Alice"]);
    alone
        .set_capacity(&PersonId::new("Alice"), Category::Weekend, Capacity::Limited(0))
        .unwrap();
    let mut scheduler = Scheduler::with_inputs(alone, SkipSet::new());
    let err = scheduler.run(d(2020, 7, 1), d(2020, 7, 7)).unwrap_err();
    match err {
        SchedError::NoEligiblePerson {
            category,
            start,
            end,
        } => {
            assert_eq!(category, Category::Weekend);
            assert_eq!(start, d(2020, 7, 3));
            assert_eq!(end, d(2020, 7, 5));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_run_leaves_roster_untouched() {
    let mut team = roster(&["Alice"]);
    team.set_capacity(&PersonId::new("Alice"), Category::Weekend, Capacity::Limited(0))
        .unwrap();
    let before = team.clone();

    let slots = generate_slots(d(2020, 7, 1), d(2020, 7, 7), &SkipSet::new(), ScheduleOptions::default())
        .unwrap();
    assert!(assign(&mut team, slots).is_err());
    assert_eq!(team, before);
    assert_eq!(team.find_by_name("Alice").unwrap().count(Category::Weekday), 0);
}

#[test]
fn scenario_d_holiday_removes_every_covering_slot() {
    let mut skip = SkipSet::new();
    skip.add_range(d(2020, 7, 4), None).unwrap();

    let slots = generate_slots(d(2020, 7, 1), d(2020, 7, 7), &skip, ScheduleOptions::default()).unwrap();
    assert!(slots.iter().all(|s| !s.covers(d(2020, 7, 4))));
    assert!(slots.iter().all(|s| s.category == Category::Weekday));
    assert_eq!(slots.len(), 5);
}

#[test]
fn holiday_on_a_weekday_drops_only_that_day() {
    let mut skip = SkipSet::new();
    skip.add_range(d(2020, 7, 6), Some(d(2020, 7, 7))).unwrap();

    let slots = generate_slots(d(2020, 7, 1), d(2020, 7, 8), &skip, ScheduleOptions::default()).unwrap();
    let starts: Vec<NaiveDate> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![d(2020, 7, 1), d(2020, 7, 2), d(2020, 7, 3), d(2020, 7, 5), d(2020, 7, 8)]
    );
}

#[test]
fn weekend_spills_past_window_unless_contained() {
    // vendredi seul
    let spill = generate_slots(d(2020, 7, 2), d(2020, 7, 3), &SkipSet::new(), ScheduleOptions::default())
        .unwrap();
    let last = spill.last().unwrap();
    assert_eq!(last.category, Category::Weekend);
    assert_eq!(last.end, d(2020, 7, 5));
    assert_eq!(last.span_days(), 3);

    let opts = ScheduleOptions {
        weekend_boundary: WeekendBoundary::Contain,
    };
    let contained = generate_slots(d(2020, 7, 2), d(2020, 7, 3), &SkipSet::new(), opts).unwrap();
    assert_eq!(contained.len(), 1);
    assert_eq!(contained[0].category, Category::Weekday);
}

#[test]
fn generated_slots_are_ordered_and_cover_the_window() {
    let start = d(2020, 7, 1);
    let end = d(2021, 1, 3);
    let slots = generate_slots(start, end, &SkipSet::new(), ScheduleOptions::default()).unwrap();

    for pair in slots.windows(2) {
        assert!(pair[0].start < pair[1].start);
        // seul chevauchement admis : le dimanche dans son propre week-end
        if pair[1].start <= pair[0].end {
            assert_eq!(pair[0].category, Category::Weekend);
            assert_eq!(pair[1].day, Some(DayKind::Sunday));
        }
    }

    for day in expand(start, end).unwrap() {
        let covering = slots.iter().filter(|s| s.covers(day)).count();
        match day.weekday() {
            Weekday::Sat => assert_eq!(covering, 1),
            Weekday::Sun => assert!(covering >= 1),
            _ => assert_eq!(covering, 1, "day {day}"),
        }
    }

    for slot in slots.iter().filter(|s| s.category == Category::Weekend) {
        assert_eq!(slot.start.weekday(), Weekday::Fri);
        assert_eq!(slot.span_days(), 3);
    }
    for slot in slots.iter().filter(|s| s.category == Category::Weekday) {
        assert_eq!(slot.start, slot.end);
    }
}

#[test]
fn capacities_hold_after_a_long_run() {
    let mut team = roster(&["Alice", "Bob", "Chloé"]);
    team.set_capacity(&PersonId::new("Alice"), Category::Weekend, Capacity::Limited(2))
        .unwrap();
    team.set_capacity(&PersonId::new("Chloé"), Category::Weekday, Capacity::Limited(10))
        .unwrap();
    let mut scheduler = Scheduler::with_inputs(team, SkipSet::new());
    scheduler.run(d(2020, 7, 1), d(2020, 12, 31)).unwrap();

    for person in scheduler.roster().people() {
        for category in Category::ALL {
            if let Some(max) = person.capacity.get(category).limit() {
                assert!(person.count(category) <= max);
            }
        }
    }
    let alice = scheduler.roster().find_by_name("Alice").unwrap();
    assert_eq!(alice.count(Category::Weekend), 2);
}

#[test]
fn fairness_keeps_counts_within_one() {
    let mut team = roster(&["Alice", "Bob"]);
    let slots: Vec<Slot> = (0..9)
        .map(|w| Slot::weekend(d(2020, 7, 3) + chrono::Duration::weeks(w)).unwrap())
        .collect();

    let done = assign(&mut team, slots).unwrap();
    let summary = summarize(&done);
    let a = summary.get_by_name("Alice").unwrap().weekends;
    let b = summary.get_by_name("Bob").unwrap().weekends;
    assert_eq!(a + b, 9);
    assert!(a.abs_diff(b) <= 1);
}

#[test]
fn rank_prefers_longest_idle_on_equal_counts() {
    let mut team = roster(&["Alice", "Bob", "Chloé"]);
    let first = Slot::weekday(d(2020, 7, 1)).unwrap();
    let second = Slot::weekday(d(2020, 7, 2)).unwrap();
    team.record_assignment(&PersonId::new("Alice"), &second).unwrap();
    team.record_assignment(&PersonId::new("Bob"), &first).unwrap();

    let next = Slot::weekday(d(2020, 7, 6)).unwrap();
    let ranked: Vec<&str> = rank(&team, &next).iter().map(|p| p.name()).collect();
    assert_eq!(ranked, vec!["Chloé", "Bob", "Alice"]);
}

#[test]
fn stats_are_idempotent_and_split_by_day() {
    let mut scheduler = Scheduler::with_inputs(roster(&["Alice", "Bob"]), SkipSet::new());
    let slots = scheduler.run(d(2020, 7, 1), d(2020, 7, 7)).unwrap();

    let once = summarize(&slots);
    let twice = summarize(&slots);
    assert_eq!(once, twice);
    assert_eq!(once.unassigned, 0);

    let names: Vec<&str> = once.entries.iter().map(|e| e.person.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    let alice = once.get_by_name("Alice").unwrap();
    assert_eq!((alice.weekdays, alice.weekends), (2, 1));
    assert_eq!(alice.day(DayKind::Wednesday), 1);
    assert_eq!(alice.day(DayKind::Monday), 1);
    let bob = once.get_by_name("Bob").unwrap();
    assert_eq!((bob.weekdays, bob.weekends), (3, 0));
    assert_eq!(bob.day(DayKind::Sunday), 1);
}

#[test]
fn unknown_person_is_reported() {
    let mut team = roster(&["Alice"]);
    let err = team
        .add_blocked_dates(&PersonId::new("Zoé"), d(2020, 7, 1), None)
        .unwrap_err();
    assert!(matches!(err, SchedError::UnknownPerson(name) if name == "Zoé"));
}
