use std::sync::Arc;

use rand::Rng;

use crate::packet_engine::models::ActivityTemplate;

/// A shuffled set of candidate templates that can be drawn from in order.
pub struct CandidatePool {
    items: Vec<Arc<ActivityTemplate>>,
    cursor: usize,
}

impl CandidatePool {
    /// Keep `items` in the given order.
    pub fn ordered(items: Vec<Arc<ActivityTemplate>>) -> Self {
        CandidatePool { items, cursor: 0 }
    }

    /// Shuffle `items` with `rng` (Fisher-Yates).
    pub fn shuffled<R: Rng>(mut items: Vec<Arc<ActivityTemplate>>, rng: &mut R) -> Self {
        for i in (1..items.len()).rev() {
            let j = rng.gen_range(0..=i);
            items.swap(i, j);
        }
        CandidatePool { items, cursor: 0 }
    }

    /// Next candidate, or `None` once the pool is drained.
    pub fn draw(&mut self) -> Option<Arc<ActivityTemplate>> {
        let item = self.items.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_engine::helpers::template;
    use crate::packet_engine::models::ActivityType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn items(n: usize) -> Vec<Arc<ActivityTemplate>> {
        (0..n)
            .map(|i| Arc::new(template(&format!("t-{i}"), ActivityType::Riddle, 1, "T", "P")))
            .collect()
    }

    fn ids(mut pool: CandidatePool) -> Vec<String> {
        std::iter::from_fn(|| pool.draw()).map(|t| t.id.clone()).collect()
    }

    #[test]
    fn shuffle_keeps_every_item_once() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut drawn = ids(CandidatePool::shuffled(items(20), &mut rng));
        assert_eq!(drawn.len(), 20);
        drawn.sort();
        drawn.dedup();
        assert_eq!(drawn.len(), 20);
    }

    #[test]
    fn shuffle_is_deterministic_with_seed() {
        let make = |seed: u64| ids(CandidatePool::shuffled(items(10), &mut StdRng::seed_from_u64(seed)));
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn draining_returns_none() {
        let mut pool = CandidatePool::ordered(items(1));
        assert_eq!(pool.remaining(), 1);
        assert!(pool.draw().is_some());
        assert!(pool.draw().is_none());
        assert_eq!(pool.remaining(), 0);
    }
}
