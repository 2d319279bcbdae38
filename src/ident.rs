//! Raw JSON keys to target identifiers and class names.
//!
//! Field identifiers follow the configured casing mode; class names are
//! always derived the same way regardless of that mode: singularize the
//! source key, pascal-case it, append the fixed `Data` suffix (collapsing a
//! doubled suffix when the key already carried it), then uniquify per run.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Casing applied to raw keys when deriving field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    /// Keep the raw key as-is.
    #[default]
    None,
    Camel,
    Snake,
    Kebab,
    Pascal,
}

impl std::fmt::Display for Casing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Casing::None => "none",
            Casing::Camel => "camel",
            Casing::Snake => "snake",
            Casing::Kebab => "kebab",
            Casing::Pascal => "pascal",
        })
    }
}

impl Casing {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Casing::None => raw.to_string(),
            Casing::Camel => to_camel_case(raw),
            Casing::Snake => to_snake_case(raw),
            Casing::Kebab => to_kebab_case(raw),
            Casing::Pascal => to_pascal_case(raw),
        }
    }
}

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Valid property/variable name in the target language.
pub fn is_valid_identifier(raw: &str) -> bool {
    IDENTIFIER.is_match(raw)
}

/// Valid namespace: identifier segments separated by `\`.
/// A single leading `\` is accepted (and trimmed by callers).
pub fn is_valid_namespace(raw: &str) -> bool {
    let trimmed = raw.strip_prefix('\\').unwrap_or(raw);
    !trimmed.is_empty() && trimmed.split('\\').all(is_valid_identifier)
}

/// Casing-normalized form of a raw key, used for shape-dedup keys:
/// lowercased, with runs of non-alphanumerics folded to a single `_`.
/// `userName`, `USERNAME` and `user-name`/`user_name` do not all collapse,
/// but case and separator variants of the same spelling do.
pub fn slug_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Split a key into lowercase words at separators and camel humps.
/// `userName`, `user_name`, `user-name` and `UserNAME2x` style keys all
/// decompose the way the usual snake/camel converters expect.
fn words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if (after_lower || acronym_end) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_snake_case(raw: &str) -> String {
    words(raw).join("_")
}

pub fn to_kebab_case(raw: &str) -> String {
    words(raw).join("-")
}

pub fn to_pascal_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in words(raw) {
        let mut cs = word.chars();
        if let Some(first) = cs.next() {
            out.extend(first.to_uppercase());
            out.push_str(cs.as_str());
        }
    }
    out
}

pub fn to_camel_case(raw: &str) -> String {
    let pascal = to_pascal_case(raw);
    let mut cs = pascal.chars();
    match cs.next() {
        Some(first) => first.to_lowercase().chain(cs).collect(),
        None => pascal,
    }
}

/// Naive singular form of a key (`users` -> `user`, `categories` ->
/// `category`, `boxes` -> `box`). Only the tail is touched so interior
/// casing survives for the pascal step.
fn singularize(name: &str) -> String {
    if !name.is_ascii() {
        return name.to_string();
    }
    let lower = name.to_ascii_lowercase();
    if lower.ends_with("ies") && name.len() > 3 {
        format!("{}y", &name[..name.len() - 3])
    } else if (lower.ends_with("ses") || lower.ends_with("xes") || lower.ends_with("zes"))
        && name.len() > 3
    {
        name[..name.len() - 2].to_string()
    } else if lower.ends_with('s') && !lower.ends_with("ss") && name.len() > 1 {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

const CLASS_SUFFIX: &str = "Data";

/// Class name for the shape found under `source_key`:
/// singular, pascal-cased, `Data`-suffixed. A key that already ends with the
/// suffix does not double it (`data` -> `Data`, not `DataData`).
pub fn class_name(source_key: &str) -> String {
    let base = to_pascal_case(&singularize(source_key));
    let mut name = format!("{base}{CLASS_SUFFIX}");
    if name.ends_with("DataData") {
        name.truncate(name.len() - CLASS_SUFFIX.len());
    }
    name
}

/// Claimed class names for one generation run; collisions get a numeric
/// suffix so every class name is unique within the namespace.
#[derive(Debug, Default)]
pub struct NamePool {
    used: HashSet<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut counter = 2usize;
        loop {
            let candidate = format!("{base}{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}
