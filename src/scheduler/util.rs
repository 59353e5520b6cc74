use crate::model::Person;

/// Indices de `pool` dont le compteur vaut le minimum du pool (ordre conservé).
pub(super) fn min_group<F>(people: &[Person], pool: &[usize], counter: F) -> Vec<usize>
where
    F: Fn(&Person) -> u32,
{
    let Some(min) = pool.iter().map(|&i| counter(&people[i])).min() else {
        return Vec::new();
    };
    pool.iter()
        .copied()
        .filter(|&i| counter(&people[i]) == min)
        .collect()
}

pub(super) fn position_of(people: &[Person], id: crate::model::PersonId) -> Option<usize> {
    people.iter().position(|p| p.id == id)
}
