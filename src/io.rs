use crate::model::{Event, Plan, Roster, Venue};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

const DATE_OUT: &str = "%d-%m-%Y";

/// Import du roster depuis CSV: header `name[,trip_count][,wash_count]`.
/// Compteurs vides ou absents = 0.
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut roster = Roster::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid roster row {}: empty name", line + 1);
        }
        let trips = parse_count(rec.get(1))
            .with_context(|| format!("invalid trip_count for {name}"))?;
        let washes = parse_count(rec.get(2))
            .with_context(|| format!("invalid wash_count for {name}"))?;
        roster.add(name, trips, washes)?;
    }
    Ok(roster)
}

/// Entier positif ; `2.0` est tronqué comme l'ancienne feuille de calcul le faisait.
fn parse_count(raw: Option<&str>) -> anyhow::Result<u32> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = raw.parse::<u32>() {
        return Ok(n);
    }
    let f: f64 = raw
        .parse()
        .with_context(|| format!("expected a number, got {raw:?}"))?;
    if !f.is_finite() || f < 0.0 || f > f64::from(u32::MAX) {
        bail!("expected a non-negative count, got {raw}");
    }
    Ok(f.trunc() as u32)
}

/// Import des matchs: header `date,start_time,opponent,venue,assembly_time,drivers_needed`
pub fn import_events_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Event>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let event = parse_event(&rec).with_context(|| format!("invalid event row {}", line + 1))?;
        out.push(event);
    }
    Ok(out)
}

fn parse_event(rec: &StringRecord) -> anyhow::Result<Event> {
    let field = |i: usize| rec.get(i).map(str::trim).unwrap_or("");

    let date = parse_date(field(0))?;
    let start_time = parse_time(field(1)).context("start_time")?;
    let opponent = field(2).to_string();
    let venue: Venue = field(3).parse().map_err(anyhow::Error::msg)?;
    let assembly_time = match field(4) {
        "" => None,
        raw => Some(parse_time(raw).context("assembly_time")?),
    };
    let drivers_needed = parse_count(Some(field(5))).context("drivers_needed")?;

    Ok(Event {
        date,
        start_time,
        opponent,
        venue,
        assembly_time,
        drivers_needed,
    })
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_OUT))
        .with_context(|| format!("invalid date: {raw}"))
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time: {raw}"))
}

/// Export CSV du roster final: header `name,trip_count,wash_count`
pub fn export_roster_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "trip_count", "wash_count"])?;
    let mut trips = itoa::Buffer::new();
    let mut washes = itoa::Buffer::new();
    for p in &roster.people {
        w.write_record([
            p.name.as_str(),
            trips.format(p.trip_count),
            washes.format(p.wash_count),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des matchs, inchangés.
pub fn export_events_csv<P: AsRef<Path>>(path: P, events: &[Event]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "date",
        "start_time",
        "opponent",
        "venue",
        "assembly_time",
        "drivers_needed",
    ])?;
    let mut needed = itoa::Buffer::new();
    for e in events {
        let cells = event_cells(e);
        w.write_record([
            cells[0].as_str(),
            cells[1].as_str(),
            e.opponent.as_str(),
            e.venue.as_str(),
            cells[2].as_str(),
            needed.format(e.drivers_needed),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du planning: une ligne par match, `driver_1..driver_N` puis `laundry`.
pub fn export_planning_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let slots = plan.max_drivers();
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;

    let mut header: Vec<String> = ["date", "start_time", "opponent", "venue", "assembly_time"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend((1..=slots).map(|i| format!("driver_{i}")));
    header.push("laundry".to_string());
    w.write_record(&header)?;

    for a in &plan.assignments {
        let cells = event_cells(&a.event);
        let mut row = vec![
            cells[0].clone(),
            cells[1].clone(),
            a.event.opponent.clone(),
            a.event.venue.as_str().to_string(),
            cells[2].clone(),
        ];
        for slot in 0..slots {
            let name = match a.drivers.get(slot) {
                Some(id) => plan
                    .roster
                    .name_of(*id)
                    .with_context(|| format!("driver {id} missing from roster"))?
                    .to_string(),
                None => String::new(),
            };
            row.push(name);
        }
        let laundry = plan
            .roster
            .name_of(a.laundry)
            .with_context(|| format!("laundry assignee {} missing from roster", a.laundry))?;
        row.push(laundry.to_string());
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

fn event_cells(e: &Event) -> [String; 3] {
    [
        e.date.format(DATE_OUT).to_string(),
        e.start_time.format("%H:%M").to_string(),
        e.assembly_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
    ]
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Fichiers écrits par [`write_output_dir`].
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub roster: PathBuf,
    pub events: PathBuf,
    pub planning: PathBuf,
}

/// Écrit roster final, matchs et planning dans `dir`, suffixés par la date du jour.
pub fn write_output_dir<P: AsRef<Path>>(
    dir: P,
    plan: &Plan,
    day: NaiveDate,
) -> anyhow::Result<OutputFiles> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;
    let stem = format!("driver_planning_{}", day.format("%Y-%m-%d"));
    let files = OutputFiles {
        roster: dir.join(format!("{stem}_roster.csv")),
        events: dir.join(format!("{stem}_events.csv")),
        planning: dir.join(format!("{stem}_planning.csv")),
    };
    export_roster_csv(&files.roster, &plan.roster)
        .with_context(|| format!("writing {}", files.roster.display()))?;
    export_events_csv(&files.events, &plan.events)
        .with_context(|| format!("writing {}", files.events.display()))?;
    export_planning_csv(&files.planning, plan)
        .with_context(|| format!("writing {}", files.planning.display()))?;
    Ok(files)
}
