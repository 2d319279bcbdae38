//! Recursive shape inference over one parsed JSON document.
//!
//! Single-threaded, depth-first, single pass: objects become classes
//! (deduplicated through the shape registry), arrays of objects collapse to
//! one merged element shape, scalars map to primitive property types.
//! Recursion depth equals document nesting depth; pathologically deep input
//! can exhaust the stack (accepted resource limit, not otherwise bounded).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::config::GeneratorConfig;
use crate::error::{Diagnostic, GenerateError, Result};
use crate::ident::{self, NamePool};
use crate::merge;
use crate::model::{Accessor, ClassModel, FieldSpec, MethodSpec, PropertyType, Scalar};
use crate::parse::kind_name;
use crate::registry::{ShapeKey, ShapeRegistry};

// --------------------------- Value classification ------------------------- //

/// Distinct value kinds, as seen by array-element reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    Date,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Date => "date",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// Kind of one value; `None` for null. Integer-valued JSON numbers are
/// `Int`, everything else numeric is `Float`.
pub fn classify(value: &Value, detect_dates: bool) -> Option<ValueKind> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ValueKind::Bool),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Some(ValueKind::Int)
            } else {
                Some(ValueKind::Float)
            }
        }
        Value::String(s) => {
            if detect_dates && is_date_prefixed(s) {
                Some(ValueKind::Date)
            } else {
                Some(ValueKind::String)
            }
        }
        Value::Array(_) => Some(ValueKind::Array),
        Value::Object(_) => Some(ValueKind::Object),
    }
}

static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

/// True when the string opens with a `YYYY-MM-DD` prefix that is a real
/// calendar date (`2024-13-99` stays a plain string).
pub fn is_date_prefixed(s: &str) -> bool {
    let Some(caps) = DATE_PREFIX.captures(s) else {
        return false;
    };
    let ymd: Option<(i32, u32, u32)> = (|| {
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?))
    })();
    match ymd {
        Some((y, m, d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        None => false,
    }
}

// -------------------------------- Generator ------------------------------- //

/// Everything one run produces: classes in emission order, plus the
/// recoverable defects encountered along the way.
#[derive(Debug)]
pub struct Generation {
    pub classes: Vec<ClassModel>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One-shot inference pass. Owns the shape registry and the claimed class
/// names; both are append-only for the duration of the run.
pub struct Generator {
    config: GeneratorConfig,
    registry: ShapeRegistry,
    names: NamePool,
    diagnostics: Vec<Diagnostic>,
}

impl Generator {
    /// Fails fast on an invalid namespace; no class is produced in that case.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if !ident::is_valid_namespace(&config.namespace) {
            return Err(GenerateError::InvalidNamespace(config.namespace));
        }
        let config = GeneratorConfig {
            namespace: config.namespace.trim_start_matches('\\').to_string(),
            ..config
        };
        Ok(Self {
            config,
            registry: ShapeRegistry::new(),
            names: NamePool::new(),
            diagnostics: Vec::new(),
        })
    }

    /// Run the full pass over `document` and consume the generator.
    ///
    /// The root always yields exactly one class: a root object is inferred
    /// directly, a root array has its elements merged into the root shape.
    pub fn run(mut self, document: &Value) -> Result<Generation> {
        let root_name = self.config.root_name.clone();
        match document {
            Value::Object(map) => {
                self.class_for_object(map, &root_name);
            }
            Value::Array(items) => {
                let merged = self.merge_root_elements(items, &root_name);
                self.class_for_object(&merged, &root_name);
            }
            other => {
                return Err(GenerateError::UnsupportedRoot { found: kind_name(other) });
            }
        }
        Ok(Generation {
            classes: self.registry.into_classes(),
            diagnostics: self.diagnostics,
        })
    }

    /// Merge a root-level array into the root shape. Non-object elements
    /// cannot contribute fields; they are skipped with a diagnostic.
    fn merge_root_elements(&mut self, items: &[Value], root_name: &str) -> Map<String, Value> {
        let mut objects = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(map) => objects.push(map),
                Value::Null => {}
                other => {
                    let found = kind_name(other);
                    tracing::warn!(key = root_name, found, "skipping non-object root element");
                    self.diagnostics.push(Diagnostic::UnmergeableElement {
                        key: root_name.to_string(),
                        found,
                    });
                }
            }
        }
        merge::merge_elements(&objects, self.config.detect_dates, &mut self.diagnostics)
    }

    /// Class name for the shape of `map`, registering a new class on a
    /// registry miss. The key covers the casing-normalized field-name set
    /// only, so shapes differing merely in field types share one class.
    fn class_for_object(&mut self, map: &Map<String, Value>, source_key: &str) -> String {
        let shape_key = ShapeKey::from_keys(map.keys().map(String::as_str));
        if let Some(existing) = self.registry.lookup(&shape_key) {
            return existing.name.clone();
        }
        let model = self.build_class(map, source_key);
        self.registry.register(shape_key, model).name.clone()
    }

    fn build_class(&mut self, map: &Map<String, Value>, source_key: &str) -> ClassModel {
        let name = self.names.claim(ident::class_name(source_key));
        let mut class = ClassModel {
            namespace: self.config.namespace.clone(),
            name,
            fields: Vec::new(),
            uses: BTreeSet::new(),
            methods: Vec::new(),
        };
        for (key, value) in map {
            self.add_field(&mut class, key, value);
        }
        class
    }

    fn add_field(&mut self, class: &mut ClassModel, raw_key: &str, value: &Value) {
        if !ident::is_valid_identifier(raw_key) {
            tracing::warn!(class = %class.name, key = raw_key, "skipping field: invalid identifier");
            self.diagnostics.push(Diagnostic::InvalidFieldName {
                class: class.name.clone(),
                key: raw_key.to_string(),
            });
            return;
        }

        let ty = self.property_type(raw_key, value);
        if let Some(referenced) = ty.class_ref() {
            class.uses.insert(referenced.to_string());
        }

        let name = self.config.casing.apply(raw_key);
        if self.config.setters {
            class.methods.push(MethodSpec {
                kind: Accessor::Setter,
                name: format!("set{}", ident::to_pascal_case(&name)),
                field: name.clone(),
            });
        }
        if self.config.getters {
            class.methods.push(MethodSpec {
                kind: Accessor::Getter,
                name: format!("get{}", ident::to_pascal_case(&name)),
                field: name.clone(),
            });
        }
        class.fields.push(FieldSpec { raw_key: raw_key.to_string(), name, ty, nullable: true });
    }

    fn property_type(&mut self, key: &str, value: &Value) -> PropertyType {
        match value {
            Value::Null => PropertyType::Unknown,
            Value::Bool(_) => PropertyType::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    PropertyType::Int
                } else {
                    PropertyType::Float
                }
            }
            Value::String(s) => {
                if self.config.detect_dates && is_date_prefixed(s) {
                    PropertyType::Date
                } else {
                    PropertyType::String
                }
            }
            Value::Object(map) => PropertyType::Class { name: self.class_for_object(map, key) },
            Value::Array(items) => self.array_type(key, items),
        }
    }

    /// Arrays of scalars become a scalar-union list; arrays of objects merge
    /// into one element class; everything else (nested arrays, mixed
    /// composite/scalar element sequences, no usable evidence) falls back to
    /// an opaque untyped array.
    fn array_type(&mut self, key: &str, items: &[Value]) -> PropertyType {
        if items.is_empty() {
            return PropertyType::UntypedArray;
        }

        if items.iter().all(|v| !v.is_array() && !v.is_object()) {
            let kinds: BTreeSet<Scalar> = items
                .iter()
                .filter_map(|v| classify(v, self.config.detect_dates))
                .map(scalar_of)
                .collect();
            if kinds.is_empty() {
                // all-null array: no evidence at all
                return PropertyType::UntypedArray;
            }
            return PropertyType::ScalarList { items: kinds };
        }

        let mut objects = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(map) => objects.push(map),
                Value::Null => {}
                other => {
                    tracing::warn!(key, found = kind_name(other), "unmergeable array elements");
                    self.diagnostics.push(Diagnostic::OpaqueArray { key: key.to_string() });
                    return PropertyType::UntypedArray;
                }
            }
        }

        let merged = merge::merge_elements(&objects, self.config.detect_dates, &mut self.diagnostics);
        PropertyType::Collection { name: self.class_for_object(&merged, key) }
    }
}

fn scalar_of(kind: ValueKind) -> Scalar {
    match kind {
        ValueKind::Bool => Scalar::Bool,
        ValueKind::Int => Scalar::Int,
        ValueKind::Float => Scalar::Float,
        ValueKind::String => Scalar::String,
        ValueKind::Date => Scalar::Date,
        // callers only classify non-composite values here
        ValueKind::Array | ValueKind::Object => Scalar::String,
    }
}

/// Convenience: one full pass over an already-parsed document.
pub fn generate(document: &Value, config: GeneratorConfig) -> Result<Generation> {
    Generator::new(config)?.run(document)
}

// ---------------------------------- Tests --------------------------------- //
