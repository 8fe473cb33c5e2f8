//! Identifier generation for components and quiz options

use crate::component::ComponentId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Hands out component ids of the form `component-<unix millis>-<suffix>`.
///
/// Every id issued or registered is remembered, so a generator never returns
/// the same id twice, even after the component carrying it was deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<ComponentId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Deterministic suffixes, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    pub fn next_component_id(&mut self) -> ComponentId {
        loop {
            let millis = chrono::Utc::now().timestamp_millis();
            let id = ComponentId::from(format!("component-{}-{}", millis, self.suffix()));
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Records an id that came from elsewhere (e.g. a loaded snapshot).
    /// Returns false if it was already known.
    pub fn register(&mut self, id: &ComponentId) -> bool {
        self.issued.insert(id.clone())
    }

    pub fn is_issued(&self, id: &ComponentId) -> bool {
        self.issued.contains(id)
    }

    /// A quiz option id not present in `existing`.
    pub fn next_option_id<'a, I>(&mut self, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let taken: HashSet<&str> = existing.into_iter().collect();
        loop {
            let id = format!("option-{}", self.suffix());
            if !taken.contains(id.as_str()) {
                return id;
            }
        }
    }

    fn suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_format() {
        let mut ids = IdGenerator::with_seed(7);
        let id = ids.next_component_id();
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "component");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_component_ids_are_unique() {
        let mut ids = IdGenerator::with_seed(1);
        let mut seen = HashSet::new();
        for _ in 0..1_000 {
            assert!(seen.insert(ids.next_component_id()));
        }
    }

    #[test]
    fn test_register_marks_id_as_taken() {
        let mut ids = IdGenerator::new();
        let foreign = ComponentId::from("component-imported");
        assert!(ids.register(&foreign));
        assert!(!ids.register(&foreign));
        assert!(ids.is_issued(&foreign));
    }

    #[test]
    fn test_option_id_avoids_existing() {
        let mut ids = IdGenerator::with_seed(3);
        let first = ids.next_option_id(std::iter::empty());
        assert!(first.starts_with("option-"));

        let mut replay = IdGenerator::with_seed(3);
        let second = replay.next_option_id([first.as_str()]);
        assert_ne!(first, second);
    }
}
