//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_COLUMN_WIDTH, DEFAULT_PAGE_SIZE, DEFAULT_TIE_BREAKER};
use super::types::AppConfig;
use crate::model::CollectionKind;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".cbom-explorer.yaml",
    ".cbom-explorer.yml",
    "cbom-explorer.yaml",
    "cbom-explorer.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "cbom-explorer";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/cbom-explorer/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    search_paths()
        .into_iter()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Directories searched for a config file, in priority order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(git_root) = find_git_root()
        && !dirs.contains(&git_root)
    {
        dirs.push(git_root);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs.push(config_dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file deserializes to unit, not to an empty mapping.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults count as set, which is how
    /// CLI arguments are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        // View defaults
        if other.view.page_size != DEFAULT_PAGE_SIZE {
            self.view.page_size = other.view.page_size;
        }
        if other.view.debounce_ms != DEFAULT_DEBOUNCE_MS {
            self.view.debounce_ms = other.view.debounce_ms;
        }
        if other.view.tie_breaker.as_deref() != Some(DEFAULT_TIE_BREAKER) {
            self.view.tie_breaker.clone_from(&other.view.tie_breaker);
        }
        if other.view.default_kind != CollectionKind::default() {
            self.view.default_kind = other.view.default_kind;
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Table {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.max_column_width != DEFAULT_MAX_COLUMN_WIDTH {
            self.output.max_column_width = other.output.max_column_width;
        }

        // Behavior config
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if !other.behavior.fail_on_empty {
            self.behavior.fail_on_empty = false;
        }
        if other.behavior.reference_date.is_some() {
            self.behavior.reference_date = other.behavior.reference_date;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config file.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        r"# cbom-explorer configuration
# Place this file at .cbom-explorer.yaml in your project root
# or at ~/.config/cbom-explorer/cbom-explorer.yaml.
# CLI arguments always override file settings.

{}",
        serde_yaml_ng::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".cbom-explorer.yaml");
        std::fs::write(&config_path, "view:\n  page_size: 5\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("cbom-explorer.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".cbom-explorer.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path()).unwrap();
        assert!(found.ends_with(".cbom-explorer.yml"));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
view:
  page_size: 25
  tie_breaker: serialNumber
output:
  format: json
behavior:
  reference_date: 2026-01-15
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.view.page_size, 25);
        assert_eq!(config.view.tie_breaker.as_deref(), Some("serialNumber"));
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(
            config.behavior.reference_date,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 15)
        );
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "view: [unclosed").unwrap();

        let (config, loaded_from) = load_or_default(Some(config_path.as_path()));
        assert_eq!(config, AppConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().page_size(50).debounce_ms(100).build();
        let overrides = AppConfig::builder()
            .page_size(5)
            .output_format(ReportFormat::Csv)
            .quiet(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.view.page_size, 5);
        assert_eq!(base.view.debounce_ms, 100);
        assert_eq!(base.output.format, ReportFormat::Csv);
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("view:"));
        assert!(example.contains("page_size: 10"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "view:\n  page_size: 5").unwrap();

        assert_eq!(discover_config_file(Some(config_path.as_path())), Some(config_path));
    }
}
