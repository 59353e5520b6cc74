use crate::scheduler::PlanError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Identifiant stable d'une personne, attribué à l'ajout dans le roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PersonId(u32);

impl PersonId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Membre du roster et ses compteurs de corvées.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trip_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wash_count: u32,
}

/// Roster complet, dans l'ordre de chargement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une personne ; le nom sert d'identité côté chargement et doit être unique.
    pub fn add<N: Into<String>>(
        &mut self,
        name: N,
        trip_count: u32,
        wash_count: u32,
    ) -> Result<PersonId, PlanError> {
        let name = name.into();
        if self.find_by_name(&name).is_some() {
            return Err(PlanError::DuplicateIdentity(name));
        }
        let id = PersonId(self.people.iter().map(|p| p.id.0 + 1).max().unwrap_or(0));
        self.people.push(Person {
            id,
            name,
            trip_count,
            wash_count,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }
    pub fn find_by_name<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }
    pub fn name_of(&self, id: PersonId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    /// Vérifie l'unicité des noms et des identifiants (roster désérialisé ou édité à la main).
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for p in &self.people {
            if !names.insert(p.name.as_str()) {
                return Err(PlanError::DuplicateIdentity(p.name.clone()));
            }
            if !ids.insert(p.id) {
                return Err(PlanError::DuplicateIdentity(p.id.to_string()));
            }
        }
        Ok(())
    }
}

/// Lieu du match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn as_str(self) -> &'static str {
        match self {
            Venue::Home => "home",
            Venue::Away => "away",
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "thuis" | "h" => Ok(Venue::Home),
            "away" | "uit" | "a" | "u" => Ok(Venue::Away),
            other => Err(format!("unknown venue: {other}")),
        }
    }
}

/// Match (ou autre occasion) à couvrir. Immuable pendant un run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub opponent: String,
    pub venue: Venue,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assembly_time: Option<NaiveTime>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drivers_needed: u32,
}

/// Résultat pour un match : l'événement recopié, les chauffeurs tirés et la lessive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub event: Event,
    pub drivers: Vec<PersonId>,
    pub laundry: PersonId,
}

/// Sortie complète d'un run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Graine du tirage, quand elle est connue (rejouer le run).
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    pub roster: Roster,
    pub events: Vec<Event>,
    pub assignments: Vec<Assignment>,
}

impl Plan {
    /// Plus grand nombre de chauffeurs sur un même match.
    pub fn max_drivers(&self) -> usize {
        self.assignments
            .iter()
            .map(|a| a.drivers.len())
            .max()
            .unwrap_or(0)
    }
}
