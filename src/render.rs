//! Rendering: turn the abstract class-model sequence into source artifacts.
//!
//! The inference core never sees output text; renderers consume only
//! [`ClassModel`] values, so the same core can target different output
//! languages.

pub mod php;

use serde::Serialize;

use crate::model::ClassModel;

pub use php::PhpRenderer;

/// One emitted artifact: a path relative to the output root, plus the
/// source text for that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedClass {
    pub path: String,
    pub source: String,
}

pub trait Renderer {
    fn render(&self, class: &ClassModel) -> RenderedClass;

    /// Classes render independently and in sequence; one class, one artifact.
    fn render_all(&self, classes: &[ClassModel]) -> Vec<RenderedClass> {
        classes.iter().map(|c| self.render(c)).collect()
    }
}

/// Map a namespace to a relative folder, PSR-4 style: separators become `/`
/// and a leading `App` segment lowercases to `app`.
pub fn namespace_to_path(namespace: &str) -> String {
    let path = namespace.trim_start_matches('\\').replace('\\', "/");
    if path == "App" {
        return "app".to_string();
    }
    match path.strip_prefix("App/") {
        Some(rest) => format!("app/{rest}"),
        None => path,
    }
}
