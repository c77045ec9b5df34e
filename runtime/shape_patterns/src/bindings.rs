//! Binding environment produced by one matching attempt.

use smallvec::SmallVec;

use shape_value::{Name, Value};

/// Name → value associations from a successful match.
///
/// Keys are unique: binding a name that is already bound replaces the
/// earlier value. Most patterns bind only a handful of names, so entries
/// live inline until the fifth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: SmallVec<[(Name, Value); 4]>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding of `name`.
    pub fn bind(&mut self, name: Name, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// Absorb `other`; its bindings win on conflict.
    pub fn merge(&mut self, other: Bindings) {
        for (name, value) in other {
            self.bind(name, value);
        }
    }
}

impl IntoIterator for Bindings {
    type Item = (Name, Value);
    type IntoIter = smallvec::IntoIter<[(Name, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.bind(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rebinding_replaces() {
        let mut b = Bindings::new();
        b.bind(Name::new("x"), Value::int(1));
        b.bind(Name::new("y"), Value::int(2));
        b.bind(Name::new("x"), Value::int(3));
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("x"), Some(&Value::int(3)));
        let names: Vec<_> = b.names().map(Name::as_str).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn merge_prefers_incoming() {
        let mut a: Bindings = [(Name::new("x"), Value::int(1))].into_iter().collect();
        let b: Bindings = [
            (Name::new("x"), Value::int(9)),
            (Name::new("z"), Value::None),
        ]
        .into_iter()
        .collect();
        a.merge(b);
        assert_eq!(a.get("x"), Some(&Value::int(9)));
        assert!(a.contains("z"));
        assert!(!a.contains("y"));
    }
}
