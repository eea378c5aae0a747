use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Every random choice a generator makes goes through this trait, so a run can be
/// replayed with a seeded RNG or driven by a fixed script in tests.
///
/// Any [`rand::Rng`] is a random source.
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool;

    /// Shuffle `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        // Fisher-Yates, driven by `pick_index` so scripted sources stay in control
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }

    /// Pick a uniformly random element of `items`, or `None` if it is empty.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.pick_index(items.len()))
        }
    }
}

impl<R: Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn coin_flip(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, self);
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
