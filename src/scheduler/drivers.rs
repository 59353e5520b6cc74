use super::{types::PlanError, util, Planner};
use crate::model::PersonId;
use crate::rng::TieBreak;

/// Remplit les `needed` places par paliers de `trip_count` croissant ; tirage au
/// sort uniquement à l'intérieur du palier courant.
pub(super) fn select_drivers<T: TieBreak + ?Sized>(
    planner: &mut Planner,
    event: usize,
    needed: usize,
    tie_break: &mut T,
) -> Result<Vec<PersonId>, PlanError> {
    let people = &planner.roster.people;
    let mut pool: Vec<usize> = (0..people.len()).collect();
    let mut chosen: Vec<usize> = Vec::with_capacity(needed);

    while chosen.len() < needed {
        let group = util::min_group(people, &pool, |p| p.trip_count);
        if group.is_empty() {
            return Err(PlanError::InsufficientRoster {
                event,
                needed,
                available: people.len(),
            });
        }
        let take = (needed - chosen.len()).min(group.len());
        let picked: Vec<usize> = tie_break
            .sample(group.len(), take)
            .into_iter()
            .map(|k| group[k])
            .collect();

        #[cfg(feature = "logging")]
        tracing::trace!(event, tier = people[group[0]].trip_count, group = group.len(), take, "driver tier");

        pool.retain(|i| !picked.contains(i));
        chosen.extend(picked);
    }

    let ids: Vec<PersonId> = chosen.iter().map(|&i| people[i].id).collect();
    // compteurs incrémentés une fois le groupe complet : le tirage voit l'état d'avant le match
    let bumped = chosen
        .iter()
        .map(|&i| {
            people[i]
                .trip_count
                .checked_add(1)
                .ok_or(PlanError::CounterOverflow(people[i].id))
        })
        .collect::<Result<Vec<u32>, _>>()?;
    for (&i, count) in chosen.iter().zip(bumped) {
        planner.roster.people[i].trip_count = count;
    }
    Ok(ids)
}
