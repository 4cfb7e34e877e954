//! Corpus path discovery
//!
//! Finds the FAQ corpus across the usual deployment layouts.

use crate::error::{Result, RetrievalError};
use std::path::{Path, PathBuf};

/// Environment variable pointing at the corpus file
pub const CORPUS_PATH_ENV: &str = "NUIT_FAQS_PATH";

/// Find the corpus file with priority:
/// 1. NUIT_FAQS_PATH environment variable
/// 2. Candidates relative to `base_dir` (or the working directory)
/// 3. User home directory (~/.nuit-assistant/faqs.json)
pub fn find_corpus_path(base_dir: Option<&Path>) -> Result<PathBuf> {
    let explicit = std::env::var_os(CORPUS_PATH_ENV).map(PathBuf::from);
    find_corpus_path_with(explicit.as_deref(), base_dir)
}

/// Discovery with the override passed in rather than read from the environment.
///
/// An explicit path that is not a file is an error; it never falls through to
/// the bundled locations.
pub fn find_corpus_path_with(explicit: Option<&Path>, base_dir: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: explicit override
    if let Some(path) = explicit {
        if path.is_file() {
            log::info!("Using {}: {}", CORPUS_PATH_ENV, path.display());
            return Ok(path.to_path_buf());
        }
        return Err(RetrievalError::corpus_not_found(format!(
            "{} points at {}, which is not a file",
            CORPUS_PATH_ENV,
            path.display()
        )));
    }

    // Priority 2: bundled layouts
    for candidate in candidate_paths(base_dir) {
        if candidate.is_file() {
            log::info!("Using bundled corpus: {}", candidate.display());
            return Ok(candidate);
        }
    }

    // Priority 3: user home directory
    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        let user_path = PathBuf::from(home)
            .join(".nuit-assistant")
            .join("faqs.json");
        if user_path.is_file() {
            log::info!("Using user corpus: {}", user_path.display());
            return Ok(user_path);
        }
    }

    Err(RetrievalError::corpus_not_found(
        "FAQ corpus not found. Checked:\n\
         - NUIT_FAQS_PATH environment variable\n\
         - data/faqs.json\n\
         - frontend/public/data/faqs.json\n\
         - ~/.nuit-assistant/faqs.json",
    ))
}

/// Bundled corpus locations, most specific first
pub fn candidate_paths(base_dir: Option<&Path>) -> Vec<PathBuf> {
    let base = base_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    vec![
        base.join("data").join("faqs.json"),
        base.join("frontend").join("public").join("data").join("faqs.json"),
        base.join("..")
            .join("frontend")
            .join("public")
            .join("data")
            .join("faqs.json"),
    ]
}
