//! Capability registry: the closed universe of names resolvable from
//! synthesized code.
//!
//! Built once by the host at startup, read-only afterwards.  Registration
//! order is preserved because the compiler binds names in exactly this
//! order, and the validator/normalizer key their icon-casing tables off
//! the same entries.

use std::collections::HashMap;

use crate::lang::interp::Value;

// ─── Kinds ────────────────────────────────────────────────────────────────────

/// Category of a registered capability.  `Icon` entries additionally
/// participate in the validator's exact-casing check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapabilityKind {
    Component,
    Icon,
    Hook,
    Helper,
    Global,
}

/// One registered name → value binding.
pub struct Capability {
    pub name: String,
    pub kind: CapabilityKind,
    pub value: Value,
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// Ordered, closed mapping from capability name to value.
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: Vec<Capability>,
    index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability.  Startup-only; registering the same name
    /// twice is a host configuration error and panics.
    pub fn register(&mut self, name: &str, kind: CapabilityKind, value: Value) {
        if self.index.contains_key(name) {
            panic!("capability '{}' registered twice", name);
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Capability {
            name: name.to_string(),
            kind,
            value,
        });
    }

    pub fn resolve(&self, name: &str) -> Option<&Capability> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    /// Names of the icon subset, in registration order.
    pub fn icon_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|c| c.kind == CapabilityKind::Icon)
            .map(|c| c.name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &Capability> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_and_order() {
        let mut reg = CapabilityRegistry::new();
        reg.register("Button", CapabilityKind::Component, Value::Component("Button".into()));
        reg.register("Play", CapabilityKind::Icon, Value::Component("Play".into()));
        reg.register("announce", CapabilityKind::Helper, Value::Null);

        assert_eq!(reg.len(), 3);
        assert_eq!(
            reg.names().collect::<Vec<_>>(),
            vec!["Button", "Play", "announce"]
        );
        assert_eq!(reg.icon_names().collect::<Vec<_>>(), vec!["Play"]);
        assert_eq!(reg.resolve("Play").unwrap().kind, CapabilityKind::Icon);
        assert!(reg.resolve("play").is_none(), "names are case-sensitive");
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_registration_is_fatal() {
        let mut reg = CapabilityRegistry::new();
        reg.register("Button", CapabilityKind::Component, Value::Null);
        reg.register("Button", CapabilityKind::Component, Value::Null);
    }
}
