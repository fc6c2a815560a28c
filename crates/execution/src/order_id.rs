use parking_lot::Mutex;
use rand::distributions::{Distribution, Uniform};
use std::collections::HashSet;

const ORDER_ID_LEN: usize = 8;

/// Generates 8-character uppercase-ASCII order ids, unique per generator.
///
/// Uniqueness is enforced by rejection sampling against the set of ids
/// already handed out; the id space (26^8) makes retries vanishingly rare.
pub struct OrderIdGenerator {
    seen: Mutex<HashSet<String>>,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub fn next_id(&self) -> String {
        let letters = Uniform::new_inclusive(b'A', b'Z');
        let mut rng = rand::thread_rng();
        let mut seen = self.seen.lock();
        loop {
            let candidate: String = (0..ORDER_ID_LEN)
                .map(|_| letters.sample(&mut rng) as char)
                .collect();
            if seen.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    #[inline]
    pub fn issued(&self) -> usize {
        self.seen.lock().len()
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
