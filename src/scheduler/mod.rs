mod drivers;
mod laundry;
mod run;
mod types;
mod util;

pub use run::{preflight, run};
pub use types::PlanError;

use crate::model::{Assignment, Event, PersonId, Roster};
use crate::rng::TieBreak;

/// Planner : détient le roster de travail pendant un run (seul écrivain des compteurs).
#[derive(Debug, Default)]
pub struct Planner {
    roster: Roster,
}

impl Planner {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// Tire `needed` chauffeurs distincts et incrémente leur `trip_count`.
    pub fn select_drivers<T: TieBreak + ?Sized>(
        &mut self,
        event: usize,
        needed: usize,
        tie_break: &mut T,
    ) -> Result<Vec<PersonId>, PlanError> {
        drivers::select_drivers(self, event, needed, tie_break)
    }

    /// Désigne la personne de lessive et incrémente son `wash_count`.
    pub fn assign_laundry<T: TieBreak + ?Sized>(
        &mut self,
        drivers: &[PersonId],
        tie_break: &mut T,
    ) -> Result<PersonId, PlanError> {
        laundry::assign_laundry(self, drivers, tie_break)
    }

    /// Un pas du run : chauffeurs (si besoin), puis lessive.
    pub fn plan_event<T: TieBreak + ?Sized>(
        &mut self,
        index: usize,
        event: &Event,
        tie_break: &mut T,
    ) -> Result<Assignment, PlanError> {
        let drivers = if event.drivers_needed > 0 {
            self.select_drivers(index, event.drivers_needed as usize, &mut *tie_break)?
        } else {
            Vec::new()
        };
        let laundry = self.assign_laundry(&drivers, tie_break)?;

        #[cfg(feature = "logging")]
        tracing::debug!(event = index, opponent = %event.opponent, ?drivers, %laundry, "event planned");

        Ok(Assignment {
            event: event.clone(),
            drivers,
            laundry,
        })
    }
}
