use super::{types::PlanError, util, Planner};
use crate::model::PersonId;
use crate::rng::TieBreak;

/// Parmi les chauffeurs du match : le plus petit `wash_count`, premier de la liste
/// en cas d'égalité (pas de tirage). Sans chauffeur : tirage parmi tout le roster
/// au minimum de `wash_count`.
pub(super) fn assign_laundry<T: TieBreak + ?Sized>(
    planner: &mut Planner,
    drivers: &[PersonId],
    tie_break: &mut T,
) -> Result<PersonId, PlanError> {
    let people = &planner.roster.people;

    let chosen = if drivers.is_empty() {
        let pool: Vec<usize> = (0..people.len()).collect();
        let group = util::min_group(people, &pool, |p| p.wash_count);
        let k = tie_break
            .choose(group.len())
            .ok_or(PlanError::EmptyRoster)?;
        group[k]
    } else {
        let mut positions = Vec::with_capacity(drivers.len());
        for &id in drivers {
            positions.push(util::position_of(people, id).ok_or(PlanError::UnknownPerson(id))?);
        }
        // min_by_key garde le premier des minima
        positions
            .into_iter()
            .min_by_key(|&i| people[i].wash_count)
            .ok_or(PlanError::EmptyRoster)?
    };

    let person = &mut planner.roster.people[chosen];
    person.wash_count = person
        .wash_count
        .checked_add(1)
        .ok_or(PlanError::CounterOverflow(person.id))?;
    Ok(person.id)
}
