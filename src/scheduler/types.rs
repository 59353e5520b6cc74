use crate::model::PersonId;
use thiserror::Error;

/// Erreurs du moteur : toutes interrompent le run entier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("event #{event} needs {needed} driver(s) but the roster only has {available} member(s)")]
    InsufficientRoster {
        event: usize,
        needed: usize,
        available: usize,
    },
    #[error("duplicate identity in roster: {0}")]
    DuplicateIdentity(String),
    #[error("unknown person: {0}")]
    UnknownPerson(PersonId),
    #[error("counter overflow for person {0}")]
    CounterOverflow(PersonId),
    #[error("empty roster: events need at least one member")]
    EmptyRoster,
}
