//! Source de hasard injectable pour départager les ex-aequo.
//!
//! Le moteur ne tire jamais au hasard directement : il passe par [`TieBreak`].
//! [`SeededTieBreak`] rejoue exactement la même séquence pour une même graine,
//! [`OrderedTieBreak`] prend toujours les premiers dans l'ordre du roster.

use rand::{seq::index, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait TieBreak {
    /// Tire `amount` indices distincts dans `0..len`, uniformément et sans remise.
    /// L'ordre du résultat est l'ordre de tirage.
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize>;

    /// Un seul indice dans `0..len`, `None` si `len == 0`.
    fn choose(&mut self, len: usize) -> Option<usize> {
        self.sample(len, 1).first().copied()
    }

    /// Graine permettant de rejouer les tirages, si elle existe.
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Tirage ChaCha8 reproductible.
#[derive(Clone, Debug)]
pub struct SeededTieBreak {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededTieBreak {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Graine tirée de l'entropie du système ; elle reste consultable via [`TieBreak::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl TieBreak for SeededTieBreak {
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        if amount == 0 {
            return Vec::new();
        }
        index::sample(&mut self.inner, len, amount).into_vec()
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Départage déterministe : toujours les premiers du groupe.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedTieBreak;

impl TieBreak for OrderedTieBreak {
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}

impl<T: TieBreak + ?Sized> TieBreak for &mut T {
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (**self).sample(len, amount)
    }
    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

impl<T: TieBreak + ?Sized> TieBreak for Box<T> {
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (**self).sample(len, amount)
    }
    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}
