// src/domain/selection.rs
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How passes choose among interchangeable template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    #[default]
    RoundRobin,
    Seeded(u64),
    Random,
}

impl SelectionStrategy {
    /// Fresh cursor. `salt` keeps separate passes from sharing one seeded sequence.
    pub fn cursor(&self, salt: u64) -> VariantCursor {
        let kind = match self {
            Self::RoundRobin => CursorKind::RoundRobin(0),
            Self::Seeded(seed) => CursorKind::Rng(Box::new(StdRng::seed_from_u64(seed ^ salt))),
            Self::Random => CursorKind::Rng(Box::new(StdRng::from_entropy())),
        };
        VariantCursor { kind }
    }
}

enum CursorKind {
    RoundRobin(usize),
    Rng(Box<StdRng>),
}

pub struct VariantCursor {
    kind: CursorKind,
}

impl VariantCursor {
    /// Next index in `0..len`; `0` when `len` is zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match &mut self.kind {
            CursorKind::RoundRobin(counter) => {
                let index = *counter % len;
                *counter += 1;
                index
            }
            CursorKind::Rng(rng) => rng.gen_range(0..len),
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_index(items.len());
        items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_cycles_in_order() {
        let mut cursor = SelectionStrategy::RoundRobin.cursor(7);
        let picks: Vec<usize> = (0..5).map(|_| cursor.next_index(3)).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn seeded_cursors_repeat() {
        let first: Vec<usize> = {
            let mut cursor = SelectionStrategy::Seeded(42).cursor(1);
            (0..8).map(|_| cursor.next_index(10)).collect()
        };
        let second: Vec<usize> = {
            let mut cursor = SelectionStrategy::Seeded(42).cursor(1);
            (0..8).map(|_| cursor.next_index(10)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn pick_on_empty_slice_is_none() {
        let mut cursor = SelectionStrategy::Random.cursor(0);
        let empty: [u8; 0] = [];
        assert!(cursor.pick(&empty).is_none());
        assert_eq!(cursor.next_index(0), 0);
    }
}
