//! docjs: generate documentation from JSDoc-style comments.
//!
//! Source files are scanned for `/** ... */` blocks, each block becomes a
//! [`Comment`] with its [`Tag`]s, and the whole set is rendered through a
//! template engine chosen by the template's extension (`.tera` or
//! `.j2`/`.jinja`). Templates can call two query helpers:
//!
//! - `getCommentsByTag(comments, filter)`: comments with at least one tag
//!   matching every key of `filter`
//! - `filterTags(tags, filter)`: the tags matching every key of `filter`
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! docjs::run(
//!     &["src/circle.js"],
//!     Path::new("doc/index.html"),
//!     Path::new("template.html.tera"),
//! )
//! .unwrap();
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod extract;
pub mod logger;
pub mod model;
pub mod pipeline;
pub mod query;

pub use context::{Helper, RenderContext};
pub use engine::{Engine, EngineRegistry, Template};
pub use error::{Error, Result};
pub use model::{CodeContext, Comment, Description, Tag};
pub use pipeline::{run, Pipeline};
pub use query::{filter_tags, get_comments_by_tag, Filter};
