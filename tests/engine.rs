#![forbid(unsafe_code)]
use roulement::{
    model::{Event, PersonId, Roster, Venue},
    rng::{OrderedTieBreak, SeededTieBreak},
    scheduler::{self, PlanError, Planner},
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

fn roster(entries: &[(&str, u32, u32)]) -> Roster {
    let mut r = Roster::new();
    for (name, trips, washes) in entries {
        r.add(*name, *trips, *washes).unwrap();
    }
    r
}

fn event(day: u32, drivers_needed: u32) -> Event {
    Event {
        date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        opponent: format!("Opponent {day}"),
        venue: if drivers_needed > 0 { Venue::Away } else { Venue::Home },
        assembly_time: Some(NaiveTime::from_hms_opt(13, 0, 0).unwrap()),
        drivers_needed,
    }
}

fn id(r: &Roster, name: &str) -> PersonId {
    r.find_by_name(name).unwrap().id
}

#[test]
fn end_to_end_three_people() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0), ("C", 0, 0)]);
    let events = vec![event(1, 2), event(8, 1), event(15, 0)];

    for seed in 0..20 {
        let plan = scheduler::run(&r, &events, &mut SeededTieBreak::new(seed)).unwrap();
        assert_eq!(plan.assignments.len(), 3);

        let e1 = &plan.assignments[0];
        assert_eq!(e1.drivers.len(), 2);
        // tous à 0 lavage : le premier chauffeur tiré lave
        assert_eq!(e1.laundry, e1.drivers[0]);

        let e2 = &plan.assignments[1];
        let all: HashSet<PersonId> = r.people.iter().map(|p| p.id).collect();
        let first: HashSet<PersonId> = e1.drivers.iter().copied().collect();
        let left: Vec<PersonId> = all.difference(&first).copied().collect();
        assert_eq!(e2.drivers, left);
        assert_eq!(e2.laundry, left[0]);

        let e3 = &plan.assignments[2];
        assert!(e3.drivers.is_empty());
        // deux personnes ont déjà lavé, la troisième est le minimum unique
        let third = all
            .iter()
            .copied()
            .find(|p| *p != e1.laundry && *p != e2.laundry)
            .unwrap();
        assert_eq!(e3.laundry, third);

        for p in &plan.roster.people {
            assert_eq!(p.trip_count, 1);
            assert_eq!(p.wash_count, 1);
        }
    }
}

#[test]
fn caller_roster_is_untouched() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0)]);
    let before = r.clone();
    let plan = scheduler::run(&r, &[event(1, 1)], &mut OrderedTieBreak).unwrap();
    assert_eq!(r, before);
    assert_ne!(plan.roster, before);
}

#[test]
fn insufficient_roster_fails_whole_run() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0), ("C", 0, 0)]);
    let err = scheduler::run(&r, &[event(1, 1), event(8, 5)], &mut SeededTieBreak::new(1))
        .unwrap_err();
    assert_eq!(
        err,
        PlanError::InsufficientRoster {
            event: 1,
            needed: 5,
            available: 3
        }
    );
}

#[test]
fn selection_guard_leaves_counters_alone() {
    let r = roster(&[("A", 2, 1), ("B", 0, 0), ("C", 1, 3)]);
    let mut planner = Planner::new(r.clone());
    let err = planner
        .select_drivers(0, 5, &mut SeededTieBreak::new(9))
        .unwrap_err();
    assert!(matches!(err, PlanError::InsufficientRoster { needed: 5, available: 3, .. }));
    assert_eq!(planner.roster(), &r);
}

#[test]
fn empty_roster_is_rejected() {
    let err = scheduler::run(&Roster::new(), &[event(1, 0)], &mut OrderedTieBreak).unwrap_err();
    assert_eq!(err, PlanError::EmptyRoster);

    let plan = scheduler::run(&Roster::new(), &[], &mut OrderedTieBreak).unwrap();
    assert!(plan.assignments.is_empty());
}

#[test]
fn duplicate_names_are_rejected() {
    let mut r = roster(&[("A", 0, 0)]);
    assert_eq!(
        r.add("A", 3, 3).unwrap_err(),
        PlanError::DuplicateIdentity("A".into())
    );

    // roster édité à la main
    let mut clone = r.people[0].clone();
    clone.id = PersonId::new(99);
    r.people.push(clone);
    let err = scheduler::run(&r, &[event(1, 1)], &mut OrderedTieBreak).unwrap_err();
    assert_eq!(err, PlanError::DuplicateIdentity("A".into()));
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut r = roster(&[("A", 0, 0), ("B", 0, 0)]);
    r.people[1].id = r.people[0].id;
    assert!(matches!(r.validate(), Err(PlanError::DuplicateIdentity(_))));
}

#[test]
fn laundry_among_drivers_is_deterministic() {
    let r = roster(&[("A", 0, 3), ("B", 0, 1), ("C", 0, 1), ("D", 0, 2)]);
    let drivers = vec![id(&r, "A"), id(&r, "B"), id(&r, "C"), id(&r, "D")];

    for seed in 0..10 {
        let mut planner = Planner::new(r.clone());
        let chosen = planner
            .assign_laundry(&drivers, &mut SeededTieBreak::new(seed))
            .unwrap();
        assert_eq!(chosen, id(&r, "B"));
        assert_eq!(planner.roster().get(chosen).unwrap().wash_count, 2);
    }

    // l'ordre des chauffeurs départage
    let reordered = vec![id(&r, "D"), id(&r, "C"), id(&r, "B"), id(&r, "A")];
    let mut planner = Planner::new(r.clone());
    let chosen = planner.assign_laundry(&reordered, &mut OrderedTieBreak).unwrap();
    assert_eq!(chosen, id(&r, "C"));
}

#[test]
fn laundry_without_drivers_uses_whole_roster_minimum() {
    let r = roster(&[("A", 0, 2), ("B", 0, 1), ("C", 0, 1), ("D", 0, 4)]);
    let mut seen = HashSet::new();
    for seed in 0..50 {
        let mut planner = Planner::new(r.clone());
        let chosen = planner.assign_laundry(&[], &mut SeededTieBreak::new(seed)).unwrap();
        seen.insert(chosen);
    }
    let expected: HashSet<_> = [id(&r, "B"), id(&r, "C")].into_iter().collect();
    assert_eq!(seen, expected);
}

#[test]
fn unknown_driver_is_an_error() {
    let r = roster(&[("A", 0, 0)]);
    let mut planner = Planner::new(r);
    let err = planner
        .assign_laundry(&[PersonId::new(42)], &mut OrderedTieBreak)
        .unwrap_err();
    assert_eq!(err, PlanError::UnknownPerson(PersonId::new(42)));
}

#[test]
fn lowest_tier_is_taken_whole_before_next() {
    let r = roster(&[("A", 2, 0), ("B", 0, 0), ("C", 1, 0), ("D", 1, 0), ("E", 0, 0)]);
    for seed in 0..30 {
        let mut planner = Planner::new(r.clone());
        let drivers = planner
            .select_drivers(0, 3, &mut SeededTieBreak::new(seed))
            .unwrap();
        let set: HashSet<_> = drivers.iter().copied().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&id(&r, "B")));
        assert!(set.contains(&id(&r, "E")));
        assert!(!set.contains(&id(&r, "A")));
        // le palier 0 est tiré en premier
        assert!(drivers[..2].iter().all(|d| *d == id(&r, "B") || *d == id(&r, "E")));
    }
}

#[test]
fn trip_counts_use_pre_event_state() {
    let r = roster(&[("A", 0, 0), ("B", 1, 0), ("C", 1, 0)]);
    let mut planner = Planner::new(r.clone());
    let drivers = planner.select_drivers(0, 2, &mut OrderedTieBreak).unwrap();
    // A d'abord (seul à 0), puis B (premier du palier 1) ; A à 1 ne repasse pas
    assert_eq!(drivers, vec![id(&r, "A"), id(&r, "B")]);
    let counts: Vec<u32> = planner.roster().people.iter().map(|p| p.trip_count).collect();
    assert_eq!(counts, vec![1, 2, 1]);
}

#[test]
fn zero_drivers_still_gets_laundry() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0)]);
    let events: Vec<Event> = (1..=6).map(|d| event(d, 0)).collect();
    let plan = scheduler::run(&r, &events, &mut SeededTieBreak::new(5)).unwrap();
    assert!(plan.assignments.iter().all(|a| a.drivers.is_empty()));
    let washes: Vec<u32> = plan.roster.people.iter().map(|p| p.wash_count).collect();
    assert_eq!(washes, vec![3, 3]);
    assert!(plan.roster.people.iter().all(|p| p.trip_count == 0));
}

#[test]
fn same_seed_same_plan() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0), ("C", 0, 0), ("D", 0, 0), ("E", 0, 0)]);
    let events: Vec<Event> = (1..=10).map(|d| event(d, d % 4)).collect();
    let a = scheduler::run(&r, &events, &mut SeededTieBreak::new(77)).unwrap();
    let b = scheduler::run(&r, &events, &mut SeededTieBreak::new(77)).unwrap();
    assert_eq!(a.assignments, b.assignments);
    assert_eq!(a.roster, b.roster);
    assert_eq!(a.seed, Some(77));
    assert_eq!(a.events, events);
}

#[test]
fn preflight_reports_first_offending_event() {
    let r = roster(&[("A", 0, 0), ("B", 0, 0)]);
    let events = vec![event(1, 2), event(2, 3), event(3, 4)];
    assert_eq!(
        scheduler::preflight(&r, &events).unwrap_err(),
        PlanError::InsufficientRoster {
            event: 1,
            needed: 3,
            available: 2
        }
    );
    assert!(scheduler::preflight(&r, &events[..1]).is_ok());
}

#[test]
fn saturated_trip_count_is_an_error() {
    let r = roster(&[("A", u32::MAX, 0), ("B", u32::MAX, 0)]);
    let mut planner = Planner::new(r.clone());
    let err = planner
        .select_drivers(0, 2, &mut OrderedTieBreak)
        .unwrap_err();
    assert_eq!(err, PlanError::CounterOverflow(id(&r, "A")));
    assert_eq!(planner.roster(), &r);
}

#[test]
fn saturated_wash_count_is_an_error() {
    let r = roster(&[("A", 0, u32::MAX)]);
    let err = scheduler::run(&r, &[event(1, 0)], &mut OrderedTieBreak).unwrap_err();
    assert_eq!(err, PlanError::CounterOverflow(id(&r, "A")));
}
