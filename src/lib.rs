#![forbid(unsafe_code)]
//! Roulement — répartition équitable des chauffeurs et de la lessive sur une saison.
//!
//! - Chauffeurs : palier de `trip_count` le plus bas d'abord, tirage au sort dans le palier.
//! - Lessive : le chauffeur du match qui a le moins lavé, sinon tirage sur tout le roster.
//! - Tirages injectables et rejouables (graine).
//! - Import/export CSV et JSON en dehors du moteur.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod report;
pub mod rng;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Assignment, Event, Person, PersonId, Plan, Roster, Venue};
pub use report::{load_summary, LoadLine, PlanRenderer, TextPlan};
pub use rng::{OrderedTieBreak, SeededTieBreak, TieBreak};
pub use scheduler::{preflight, run, PlanError, Planner};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
