//! Shape-dedup registry: one class per structurally-identical shape.

use indexmap::IndexMap;

use crate::ident;
use crate::model::ClassModel;

/// Dedup key over the sorted, casing-normalized field-name set of a shape.
/// Field types and values are deliberately excluded, so shapes sharing a key
/// set but differing in inferred types collapse to one class instead of
/// multiplying near-identical nested classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeKey(String);

impl ShapeKey {
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut slugs: Vec<String> = keys.into_iter().map(ident::slug_key).collect();
        slugs.sort_unstable();
        slugs.dedup();
        ShapeKey(slugs.join("|"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Append-only map ShapeKey -> ClassModel for one generation run.
/// Insertion order is the emission order (depth-first post-order of the
/// document walk; the root class registers last).
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    classes: IndexMap<ShapeKey, ClassModel>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &ShapeKey) -> Option<&ClassModel> {
        self.classes.get(key)
    }

    /// Insert-if-absent: when `key` was claimed while `model` was being
    /// built (an object nested inside a same-shaped object), the earlier
    /// registration wins and `model` is discarded. Entries are never
    /// replaced or removed within a run.
    pub fn register(&mut self, key: ShapeKey, model: ClassModel) -> &ClassModel {
        self.classes.entry(key).or_insert(model)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Consume the registry, yielding classes in registration order.
    pub fn into_classes(self) -> Vec<ClassModel> {
        self.classes.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn class(name: &str) -> ClassModel {
        ClassModel {
            namespace: r"App\Data".into(),
            name: name.into(),
            fields: Vec::new(),
            uses: BTreeSet::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn key_ignores_order_case_and_separators() {
        let a = ShapeKey::from_keys(["userName", "id"]);
        let b = ShapeKey::from_keys(["id", "USERNAME"]);
        let c = ShapeKey::from_keys(["id", "user-name"]);
        assert_eq!(a, b);
        assert_ne!(a, c); // separator introduces a word boundary the plain key lacks
        assert_eq!(a.as_str(), "id|username");
    }

    #[test]
    fn key_deduplicates_normalized_names() {
        let a = ShapeKey::from_keys(["User Name", "user--name"]);
        assert_eq!(a.as_str(), "user_name");
    }

    #[test]
    fn register_keeps_the_first_entry() {
        let mut registry = ShapeRegistry::new();
        let key = ShapeKey::from_keys(["x", "y"]);
        registry.register(key.clone(), class("First"));
        let winner = registry.register(key.clone(), class("Second"));
        assert_eq!(winner.name, "First");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(&key).map(|c| c.name.as_str()), Some("First"));
    }

    #[test]
    fn classes_come_out_in_registration_order() {
        let mut registry = ShapeRegistry::new();
        registry.register(ShapeKey::from_keys(["a"]), class("AData"));
        registry.register(ShapeKey::from_keys(["b"]), class("BData"));
        registry.register(ShapeKey::from_keys(["c"]), class("CData"));
        let names: Vec<String> = registry.into_classes().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["AData", "BData", "CData"]);
    }
}
