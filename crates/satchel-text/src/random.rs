use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// A string of `len` ASCII letters.
///
/// Draws from a generator seeded once per process. Not suitable for secrets.
pub fn random_string(len: usize) -> String {
    let mut rng = RNG.lock().unwrap_or_else(PoisonError::into_inner);
    (0..len)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect()
}
