use crate::model::{Assignment, Plan, Roster};
use std::fmt::Write;

/// Charge cumulée d'une personne à la fin d'un run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLine {
    pub name: String,
    pub trip_count: u32,
    pub wash_count: u32,
}

/// Permet de customiser le rendu du planning (texte, markdown, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &Plan) -> String;
}

/// Rendu texte brut : une ligne par match puis le bilan de charge.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlan;

impl PlanRenderer for TextPlan {
    fn render(&self, plan: &Plan) -> String {
        let mut out = String::new();
        for a in &plan.assignments {
            let _ = writeln!(out, "{}", assignment_line(&plan.roster, a));
        }

        let summary = load_summary(&plan.roster);
        if summary.is_empty() {
            return out;
        }
        let width = summary.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
        let _ = writeln!(out);
        for l in &summary {
            let _ = writeln!(
                out,
                "{:<width$}  trips={}  washes={}",
                l.name, l.trip_count, l.wash_count
            );
        }
        let (trips, washes) = spread(&summary);
        let _ = writeln!(out, "spread: trips={trips} washes={washes}");
        out
    }
}

fn assignment_line(roster: &Roster, a: &Assignment) -> String {
    let name = |id| roster.name_of(id).unwrap_or("?");
    let drivers = if a.drivers.is_empty() {
        "-".to_string()
    } else {
        a.drivers.iter().map(|&id| name(id)).collect::<Vec<_>>().join(", ")
    };
    format!(
        "{} | {} | {} ({}) | drivers: {} | laundry: {}",
        a.event.date.format("%d-%m-%Y"),
        a.event.start_time.format("%H:%M"),
        a.event.opponent,
        a.event.venue.as_str(),
        drivers,
        name(a.laundry)
    )
}

/// Compteurs par personne, dans l'ordre du roster.
pub fn load_summary(roster: &Roster) -> Vec<LoadLine> {
    roster
        .people
        .iter()
        .map(|p| LoadLine {
            name: p.name.clone(),
            trip_count: p.trip_count,
            wash_count: p.wash_count,
        })
        .collect()
}

/// Écart max - min des deux compteurs.
fn spread(lines: &[LoadLine]) -> (u32, u32) {
    let range = |f: fn(&LoadLine) -> u32| {
        let min = lines.iter().map(f).min().unwrap_or(0);
        let max = lines.iter().map(f).max().unwrap_or(0);
        max - min
    };
    (range(|l| l.trip_count), range(|l| l.wash_count))
}
