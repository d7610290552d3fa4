//! Render pipeline: source files → comments → engine → output file.

use crate::context::RenderContext;
use crate::engine::{engine_key, Engine, EngineRegistry, Template};
use crate::error::{Error, Result};
use crate::extract;
use crate::model::Comment;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Source extensions parsed when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js"];

/// Configured generator. [`Pipeline::default`] parses `.js` files with the
/// built-in engines and aborts on the first bad file.
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: EngineRegistry,
    extensions: Vec<String>,
    keep_going: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            registry: EngineRegistry::with_defaults(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            keep_going: false,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the engine registry.
    pub fn with_registry(mut self, registry: EngineRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register one more engine.
    pub fn with_engine(mut self, engine: impl Engine + 'static) -> Self {
        self.registry.register(engine);
        self
    }

    /// Source file extensions to parse (without the dot). Empty keeps the
    /// current set.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Skip files that fail extraction instead of aborting.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// True when `path` has one of the configured source extensions.
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Extract comments from every source file, in order, tagging each with
    /// the path it came from. Other files are skipped.
    pub fn collect<P: AsRef<Path>>(&self, sources: &[P]) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();

        for path in sources {
            let path = path.as_ref();
            if !self.is_source(path) {
                debug!(file = %path.display(), "skipping non-source file");
                continue;
            }

            info!(file = %path.display(), "parsing");
            let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;

            match extract::parse_comments(&text) {
                Ok(mut found) => {
                    let file = path.to_string_lossy().to_string();
                    for comment in &mut found {
                        comment.file = file.clone();
                    }
                    debug!(file = %path.display(), count = found.len(), "extracted comments");
                    comments.extend(found);
                }
                Err(source) if self.keep_going => {
                    warn!(file = %path.display(), error = %source, "skipping file");
                }
                Err(source) => {
                    return Err(Error::Extract {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }

        Ok(comments)
    }

    /// Look up the engine for a template path by its extension.
    pub fn engine_for(&self, template: &Path) -> Result<&dyn Engine> {
        let key = engine_key(template);
        self.registry
            .get(key)
            .ok_or_else(|| Error::UnsupportedEngine {
                engine: key.to_string(),
                template: template.to_path_buf(),
            })
    }

    /// Render `comments` through the template at `template`.
    pub fn render(&self, comments: Vec<Comment>, template: &Path) -> Result<String> {
        let engine = self.engine_for(template)?;
        debug!(engine = engine.name(), template = %template.display(), "selected engine");

        let source =
            fs::read_to_string(template).map_err(|e| Error::io("read template", template, e))?;
        let name = template
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "template".to_string());

        engine.render(&Template { name, source }, &RenderContext::new(comments))
    }

    /// Full run: extract from `sources`, render with `template`, write `dest`.
    ///
    /// An unsupported template extension fails before any file is read or
    /// written.
    pub fn run<P: AsRef<Path>>(&self, sources: &[P], dest: &Path, template: &Path) -> Result<()> {
        self.engine_for(template)?;

        let comments = self.collect(sources)?;
        let rendered = self.render(comments, template)?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
        }
        fs::write(dest, rendered).map_err(|e| Error::io("write", dest, e))?;
        info!(dest = %dest.display(), "wrote documentation");
        Ok(())
    }
}

/// Run the default pipeline.
pub fn run<P: AsRef<Path>>(sources: &[P], dest: &Path, template: &Path) -> Result<()> {
    Pipeline::default().run(sources, dest, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SHAPES: &str = "/**\n * Square area.\n * @function\n * @param {number} side\n */\nfunction square(side) {}\n";
    const CIRCLE: &str = "/**\n * Circle area.\n * @function\n */\nfunction circle(r) {}\n\n/**\n * Untagged.\n */\nvar PI = 3;\n";
    const LIST: &str = "{% for c in comments %}{{ c.file | split(pat=\"/\") | last }}:{{ c.ctx.name }};{% endfor %}";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn renders_in_file_order() {
        let dir = TempDir::new().unwrap();
        let b = write(&dir, "b.js", SHAPES);
        let a = write(&dir, "a.js", CIRCLE);
        let template = write(&dir, "list.tera", LIST);
        let dest = dir.path().join("out/index.html");

        run(&[&b, &a], &dest, &template).unwrap();

        let out = fs::read_to_string(&dest).unwrap();
        assert_eq!(out, "b.js:square;a.js:circle;a.js:PI;");
    }

    #[test]
    fn attaches_source_file() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", CIRCLE);
        let comments = Pipeline::new().collect(&[&a]).unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments.iter().all(|c| c.file == a.to_string_lossy()));
    }

    #[test]
    fn skips_other_extensions() {
        let dir = TempDir::new().unwrap();
        let js = write(&dir, "a.js", CIRCLE);
        let ts = write(&dir, "b.ts", SHAPES);
        let txt = write(&dir, "notes.txt", "/** @function */");

        let comments = Pipeline::new().collect(&[&ts, &js, &txt]).unwrap();
        assert_eq!(comments.len(), 2);

        let comments = Pipeline::new()
            .with_extensions(["ts"])
            .collect(&[&ts, &js])
            .unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn unsupported_engine_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", CIRCLE);
        let template = write(&dir, "index.ejs", "<%= comments %>");
        let dest = dir.path().join("index.html");

        let err = run(&[&a], &dest, &template).unwrap_err();
        match err {
            Error::UnsupportedEngine { engine, .. } => assert_eq!(engine, "ejs"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn template_without_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "template", "");
        let err = run::<&Path>(&[], &dir.path().join("out.html"), &template).unwrap_err();
        assert!(err.to_string().contains("rendering engine '' not supported"));
    }

    #[test]
    fn dotfile_template_selects_engine() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", SHAPES);
        let template = write(&dir, ".tera", "{{ comments | length }}");
        let dest = dir.path().join("index.html");

        run(&[&a], &dest, &template).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "1");
    }

    #[test]
    fn bad_file_aborts_by_default() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.js", CIRCLE);
        let bad = write(&dir, "bad.js", "/**\n * open\n");
        let template = write(&dir, "list.tera", LIST);
        let dest = dir.path().join("index.html");

        let err = run(&[&good, &bad], &dest, &template).unwrap_err();
        assert!(matches!(err, Error::Extract { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn keep_going_skips_bad_file() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.js", CIRCLE);
        let bad = write(&dir, "bad.js", "/**\n * open\n");
        let template = write(&dir, "list.tera", LIST);
        let dest = dir.path().join("index.html");

        Pipeline::new()
            .keep_going(true)
            .run(&[&bad, &good], &dest, &template)
            .unwrap();
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "good.js:circle;good.js:PI;"
        );
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "list.tera", LIST);
        let missing = dir.path().join("missing.js");
        let err = run(&[&missing], &dir.path().join("out.html"), &template).unwrap_err();
        assert!(matches!(err, Error::Io { action: "read", .. }));
    }

    #[test]
    fn extra_engine_is_selected_by_extension() {
        struct Count;

        impl Engine for Count {
            fn name(&self) -> &str {
                "count"
            }

            fn extensions(&self) -> &[&str] {
                &["count"]
            }

            fn render(&self, template: &Template, ctx: &RenderContext) -> Result<String> {
                Ok(format!("{}{}", template.source.trim(), ctx.comments.len()))
            }
        }

        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", CIRCLE);
        let template = write(&dir, "index.count", "comments: ");
        let dest = dir.path().join("index.txt");

        Pipeline::new()
            .with_engine(Count)
            .run(&[&a], &dest, &template)
            .unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "comments:2");
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", SHAPES);
        let template = write(&dir, "list.j2", "{{ comments | length }}");
        let dest = write(&dir, "index.html", "old content that is longer");

        run(&[&a], &dest, &template).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "1");
    }
}
