// Strongly-typed class model for renderers. No serde_json::Value here.

use std::collections::BTreeSet;

use serde::Serialize;

/// Scalar kinds that can appear inside an array-of-scalars field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    Bool,
    Int,
    Float,
    String,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyType {
    /// Only null evidence; renders as a nullable unknown ("mixed").
    Unknown,
    Bool,
    Int,
    Float,
    String,
    Date,
    /// Array of scalars; order-independent union of the element kinds seen.
    ScalarList { items: BTreeSet<Scalar> },
    /// Nested object, by generated class name.
    Class { name: String },
    /// Array of objects, collapsed to one merged element class.
    Collection { name: String },
    /// Opaque fallback: empty arrays and element sequences that cannot be
    /// merged into a single shape.
    UntypedArray,
}

impl PropertyType {
    /// Class referenced by this type, if any.
    pub fn class_ref(&self) -> Option<&str> {
        match self {
            PropertyType::Class { name } | PropertyType::Collection { name } => Some(name),
            _ => None,
        }
    }
}

/// One generated property.
///
/// `nullable` is always true: sample-based inference can never prove that a
/// field is present (and non-null) in every future document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub raw_key: String,
    /// Identifier after the configured casing transform.
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub nullable: bool,
}

impl FieldSpec {
    /// A remap annotation back to the raw key is required whenever the casing
    /// transform changed the name, so (de)serialization against the original
    /// JSON stays correct.
    pub fn needs_remap(&self) -> bool {
        self.name != self.raw_key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Getter,
    Setter,
}

/// Descriptor for one accessor method; bodies are the renderer's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSpec {
    pub kind: Accessor,
    /// Method name, e.g. `getUserName`.
    pub name: String,
    /// Identifier of the backing field.
    pub field: String,
}

/// Language-agnostic description of one generated data class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassModel {
    pub namespace: String,
    pub name: String,
    /// Stable field order (document order) for deterministic rendering.
    pub fields: Vec<FieldSpec>,
    /// Names of other generated classes referenced by fields.
    pub uses: BTreeSet<String>,
    pub methods: Vec<MethodSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_needed_only_when_name_changed() {
        let same = FieldSpec {
            raw_key: "id".into(),
            name: "id".into(),
            ty: PropertyType::Int,
            nullable: true,
        };
        let renamed = FieldSpec {
            raw_key: "user_name".into(),
            name: "userName".into(),
            ty: PropertyType::String,
            nullable: true,
        };
        assert!(!same.needs_remap());
        assert!(renamed.needs_remap());
    }

    #[test]
    fn class_ref_covers_both_reference_types() {
        let class = PropertyType::Class { name: "UserData".into() };
        let coll = PropertyType::Collection { name: "TagData".into() };
        assert_eq!(class.class_ref(), Some("UserData"));
        assert_eq!(coll.class_ref(), Some("TagData"));
        assert_eq!(PropertyType::Int.class_ref(), None);
    }
}
