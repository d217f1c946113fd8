//! Load `.filestore.toml` from the working directory (CLI only). The lib takes [`ScanOpts`](crate::ScanOpts) directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct FilestoreToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    store_dir: Option<String>,
    workers: Option<usize>,
    timeout_secs: Option<u64>,
    strict: Option<bool>,
    verbose: Option<bool>,
}

/// Parse config text. Errors carry the toml diagnostic.
pub fn parse_filestore_toml(text: &str) -> Result<FilestoreToml, toml::de::Error> {
    toml::from_str(text)
}

/// Load the config file from `dir` if present. Returns the parse error message on a bad file
/// so the caller can log it; `Ok(None)` when there is no file.
pub fn load_filestore_toml(dir: &Path) -> Result<Option<FilestoreToml>, String> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_filestore_toml(&text)
        .map(Some)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &FilestoreToml, opts: &mut Opts) {
    let settings = &file.settings;
    if let Some(ref p) = settings.store_dir {
        opts.store_dir = Some(PathBuf::from(p));
    }
    if settings.workers.is_some() {
        opts.workers = settings.workers;
    }
    if settings.timeout_secs.is_some() {
        opts.timeout_secs = settings.timeout_secs;
    }
    apply_file_opt!(settings, opts, strict);
    apply_file_opt!(settings, opts, verbose);
}
