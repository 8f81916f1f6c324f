//! Presentation options for the demo, read from a JSON file.
//!
//! Lookup order for the file:
//!
//! - the `--options` flag
//! - the `QUICKSEARCH_OPTIONS_PATH` environment variable
//! - `<config dir>/quicksearch/options.json`
//!
//! A missing file means defaults. A file that cannot be parsed is reported
//! and ignored; only I/O failures other than "not found" are errors.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use dirs_next::{config_dir, home_dir};
use quicksearch_engine::SearchBarOptions;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the options file path.
pub const OPTIONS_PATH_ENV: &str = "QUICKSEARCH_OPTIONS_PATH";

pub const OPTIONS_FILE_NAME: &str = "options.json";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("options I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("options serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Resolve the options file from an explicit path, the environment, or the
/// platform config directory, in that order.
pub fn resolve_options_path(explicit: Option<&Path>) -> PathBuf {
    resolve_with_override(explicit, env::var(OPTIONS_PATH_ENV).ok().as_deref())
}

fn resolve_with_override(explicit: Option<&Path>, env_override: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env_override.map(str::trim).filter(|path| !path.is_empty()) {
        return expand_tilde(path);
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quicksearch")
        .join(OPTIONS_FILE_NAME)
}

/// Load options from `path`, falling back to defaults when the file is
/// missing or malformed.
pub fn load_options(path: &Path) -> Result<SearchBarOptions, OptionsError> {
    match fs::read_to_string(path) {
        Ok(data) => match parse_options(&data) {
            Ok(options) => {
                debug!(path = %path.display(), "loaded search bar options");
                Ok(options)
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse options file; using defaults"
                );
                Ok(SearchBarOptions::default())
            }
        },
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(SearchBarOptions::default()),
        Err(error) => Err(OptionsError::Io(error)),
    }
}

pub fn parse_options(data: &str) -> Result<SearchBarOptions, OptionsError> {
    Ok(serde_json::from_str(data)?)
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let options = load_options(&dir.path().join("absent.json")).unwrap();
        assert_eq!(options, SearchBarOptions::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(OPTIONS_FILE_NAME);
        fs::write(
            &path,
            r#"{ "placeholder": "Search for posts...", "input": { "height": "60px" } }"#,
        )
        .unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.placeholder, "Search for posts...");
        assert_eq!(options.input.height, "60px");
        assert_eq!(options.input.border_radius, "8px");
        assert_eq!(options.loading_label, "Loading...");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(OPTIONS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_options(&path).unwrap(), SearchBarOptions::default());
        assert!(matches!(parse_options("{ not json"), Err(OptionsError::Serialization(_))));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(load_options(dir.path()), Err(OptionsError::Io(_))));
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let explicit = PathBuf::from("/tmp/explicit.json");
        let resolved = resolve_with_override(Some(&explicit), Some("/tmp/env.json"));
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn environment_override_is_trimmed_and_expanded() {
        assert_eq!(
            resolve_with_override(None, Some("  /tmp/env.json ")),
            PathBuf::from("/tmp/env.json")
        );
        if let Some(home) = home_dir() {
            assert_eq!(
                resolve_with_override(None, Some("~/quicksearch.json")),
                home.join("quicksearch.json")
            );
        }
    }

    #[test]
    fn blank_override_falls_back_to_config_dir() {
        let resolved = resolve_with_override(None, Some("   "));
        assert!(resolved.ends_with(Path::new("quicksearch").join(OPTIONS_FILE_NAME)));
    }
}
