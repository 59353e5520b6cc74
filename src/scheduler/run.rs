use super::{types::PlanError, Planner};
use crate::model::{Event, Plan, Roster};
use crate::rng::TieBreak;
use chrono::Utc;
use uuid::Uuid;

/// Contrôles faits avant tout tirage : unicité, roster vide, effectif suffisant.
pub fn preflight(roster: &Roster, events: &[Event]) -> Result<(), PlanError> {
    roster.validate()?;
    if roster.is_empty() && !events.is_empty() {
        return Err(PlanError::EmptyRoster);
    }
    if let Some((event, e)) = events
        .iter()
        .enumerate()
        .find(|(_, e)| e.drivers_needed as usize > roster.len())
    {
        return Err(PlanError::InsufficientRoster {
            event,
            needed: e.drivers_needed as usize,
            available: roster.len(),
        });
    }
    Ok(())
}

/// Traite les matchs dans l'ordre fourni sur une copie de travail du roster.
///
/// Le roster de l'appelant n'est jamais modifié ; en cas d'erreur aucun plan
/// partiel n'est rendu.
pub fn run<T: TieBreak + ?Sized>(
    roster: &Roster,
    events: &[Event],
    tie_break: &mut T,
) -> Result<Plan, PlanError> {
    preflight(roster, events)?;

    #[cfg(feature = "logging")]
    tracing::info!(people = roster.len(), events = events.len(), seed = ?tie_break.seed(), "run start");

    let mut planner = Planner::new(roster.clone());
    let assignments = events
        .iter()
        .enumerate()
        .map(|(index, event)| planner.plan_event(index, event, &mut *tie_break))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(feature = "logging")]
    tracing::info!(assignments = assignments.len(), "run done");

    Ok(Plan {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        seed: tie_break.seed(),
        roster: planner.into_roster(),
        events: events.to_vec(),
        assignments,
    })
}
