//! docjs: render JSDoc-style comments into an HTML page through a template.
//!
//! `docjs -o doc/index.html -t template.html.tera src/ lib/*.js`

use anyhow::{Context, Result};
use clap::Parser;
use docjs::logger::init_logger;
use docjs::Pipeline;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "docjs",
    about = "Generate HTML documentation from JSDoc-style comments"
)]
struct Cli {
    /// Source files, directories (walked recursively) or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Destination file, overwritten if it exists
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Template file. Its extension selects the engine: tera, j2, jinja, jinja2
    #[arg(short = 't', long)]
    template: PathBuf,

    /// Source file extension to parse (repeatable)
    #[arg(long = "ext", default_value = "js")]
    extensions: Vec<String>,

    /// Skip files whose comments fail to parse instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Debug logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let pipeline = Pipeline::new()
        .with_extensions(cli.extensions.iter().map(|e| e.trim_start_matches('.')))
        .keep_going(cli.keep_going);

    let files = expand_inputs(&cli.files, &pipeline)?;
    pipeline.run(&files, &cli.output, &cli.template)?;
    Ok(())
}

/// Expand files, directories and glob patterns into a list of paths.
///
/// Argument order is kept and duplicates dropped. Directory contents are
/// walked in file-name order and filtered to source extensions. A plain path
/// that does not exist is passed through so reading it reports the error.
fn expand_inputs(patterns: &[String], pipeline: &Pipeline) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("failed to read directory: {}", path.display()))?;
                if entry.file_type().is_file() && pipeline.is_source(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            continue;
        }
        if !is_glob(pattern) {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }

    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn directories_walk_recursively_in_name_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.js");
        let a = touch(dir.path(), "lib/a.js");
        touch(dir.path(), "readme.md");

        let files = expand_inputs(
            &[dir.path().to_string_lossy().to_string()],
            &Pipeline::new(),
        )
        .unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn argument_order_kept_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.js");
        let z = touch(dir.path(), "z.js");
        let args = vec![
            z.to_string_lossy().to_string(),
            a.to_string_lossy().to_string(),
            z.to_string_lossy().to_string(),
        ];
        assert_eq!(expand_inputs(&args, &Pipeline::new()).unwrap(), vec![z, a]);
    }

    #[test]
    fn glob_patterns_expand() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.js");
        touch(dir.path(), "b.txt");
        let pattern = format!("{}/*.js", dir.path().display());
        assert_eq!(expand_inputs(&[pattern], &Pipeline::new()).unwrap(), vec![a]);
    }

    #[test]
    fn missing_plain_path_passes_through() {
        let files = expand_inputs(&["nope/missing.js".to_string()], &Pipeline::new()).unwrap();
        assert_eq!(files, vec![PathBuf::from("nope/missing.js")]);
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob("src/*.js"));
        assert!(is_glob("src/[ab].js"));
        assert!(!is_glob("src/a.js"));
    }
}
