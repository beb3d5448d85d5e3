mod org;

pub use org::{Config, Organization, OutputSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.invrep/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invrep") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.invrep/
    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invrep"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Resolve the artifact output directory. `~` expands against the home
/// directory; a relative path is taken relative to the config directory.
pub fn resolve_output_dir(dir: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(dir);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[org]
name = "Tusuka Trousers Ltd."
address = "Neelngar, Konabari, Gazipur"
report_title = "Inventory Report"

[output]
# Where generated artifacts land unless 'generate --out-dir' says otherwise.
# Relative paths are resolved against this config directory.
dir = "output"
"#;
