//! Engine module: trait-based template engine dispatch.
//!
//! The template file's extension picks the engine. [`EngineRegistry`] is an
//! open map, so callers can register their own [`Engine`] next to the two
//! built-in ones.

pub mod jinja;
pub mod tera;

use crate::context::RenderContext;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Template text plus the name it is registered under inside the engine.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub source: String,
}

/// Trait for rendering a template against a [`RenderContext`].
///
/// Implementations bind `comments` and every [`Helper`] into the template.
///
/// [`Helper`]: crate::context::Helper
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;
    /// Template file extensions handled by this engine, without the dot.
    fn extensions(&self) -> &[&str];
    fn render(&self, template: &Template, ctx: &RenderContext) -> Result<String>;
}

/// Template extension → engine.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: BTreeMap<String, Arc<dyn Engine>>,
}

impl EngineRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with Tera and MiniJinja.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(self::tera::TeraEngine);
        registry.register(self::jinja::JinjaEngine);
        registry
    }

    /// Register `engine` for all its extensions, replacing earlier entries.
    pub fn register(&mut self, engine: impl Engine + 'static) {
        let engine: Arc<dyn Engine> = Arc::new(engine);
        for ext in engine.extensions() {
            self.engines.insert(ext.to_ascii_lowercase(), Arc::clone(&engine));
        }
    }

    pub fn get(&self, extension: &str) -> Option<&dyn Engine> {
        self.engines
            .get(&extension.to_ascii_lowercase())
            .map(|e| e.as_ref())
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.engines.iter().map(|(ext, e)| (ext, e.name())))
            .finish()
    }
}

/// Engine key of a template path: the text after the last `.` of the file
/// name, or `""` when there is none. A dotfile such as `.tera` keys on
/// `tera`.
pub fn engine_key(template: &Path) -> &str {
    template
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .unwrap_or_default()
}
