use std::any::{TypeId, type_name};
use std::collections::HashMap;
use tracing::debug;

/// Per-kind instance counters. Every entity kind that adopts the capability
/// gets its own monotonic counter, lazily initialized on first registration
/// and never decremented. The registry is owned by the caller and passed
/// into constructors, so two registries never see each other's counts.
#[derive(Default)]
pub struct InstanceRegistry {
    counters: HashMap<TypeId, u64>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current instance count for kind `K`, 0 if the kind never registered.
    pub fn instances<K: 'static>(&self) -> u64 {
        self.counters.get(&TypeId::of::<K>()).copied().unwrap_or(0)
    }

    // Callable only from entity constructors inside the crate.
    pub(crate) fn register<K: 'static>(&mut self) {
        let count = self.counters.entry(TypeId::of::<K>()).or_insert(0);
        *count += 1;
        debug!(kind = type_name::<K>(), count = *count, "instance registered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Engine;
    struct Depot;

    #[test]
    fn unregistered_kind_counts_zero() {
        let registry = InstanceRegistry::new();
        assert_eq!(registry.instances::<Engine>(), 0);
    }

    #[test]
    fn counters_are_per_kind() {
        let mut registry = InstanceRegistry::new();
        registry.register::<Engine>();
        registry.register::<Engine>();
        registry.register::<Engine>();
        registry.register::<Depot>();
        assert_eq!(registry.instances::<Engine>(), 3);
        assert_eq!(registry.instances::<Depot>(), 1);
    }

    #[test]
    fn registries_are_independent() {
        let mut first = InstanceRegistry::new();
        let second = InstanceRegistry::new();
        first.register::<Engine>();
        assert_eq!(first.instances::<Engine>(), 1);
        assert_eq!(second.instances::<Engine>(), 0);
    }
}
