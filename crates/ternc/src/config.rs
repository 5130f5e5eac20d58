use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up next to the input when no `--config` is given.
pub const CONFIG_FILE: &str = "tern.toml";

/// Represents a parsed tern.toml file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub lower: LowerSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub diagnostics: DiagnosticsSection,
}

/// Settings from the [lower] section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LowerSection {
    /// Replaces the name the front end gave the program.
    #[serde(default)]
    pub program_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsSection {
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self { color: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Read and parse a tern.toml from a file path.
    pub fn from_file(path: &Path) -> Result<Config, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
            .map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Parse a tern.toml from a string.
    pub fn from_str(content: &str) -> Result<Config, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load the configuration for `input`.
    ///
    /// An explicit path must exist. Otherwise a tern.toml beside the input is
    /// used when present, and the defaults when not.
    pub fn discover(explicit: Option<&Path>, input: &Path) -> Result<(Config, Option<PathBuf>), String> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        let beside = input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE);
        if beside.is_file() {
            Ok((Self::from_file(&beside)?, Some(beside)))
        } else {
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[lower]
program_name = "Banking"

[output]
pretty = false

[diagnostics]
color = false
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.lower.program_name.as_deref(), Some("Banking"));
        assert!(!config.output.pretty);
        assert!(!config.diagnostics.color);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert!(config.lower.program_name.is_none());
        assert!(config.output.pretty);
        assert!(config.diagnostics.color);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::from_str("[output]\n").unwrap();
        assert!(config.output.pretty);
    }

    #[test]
    fn reject_unknown_key() {
        let err = Config::from_str("[output]\nwidth = 80\n").unwrap_err();
        assert!(err.contains("Failed to parse config"), "Error: {}", err);
    }

    #[test]
    fn discover_finds_file_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[lower]\nprogram_name = \"X\"\n").unwrap();
        let input = dir.path().join("tree.json");
        let (config, found) = Config::discover(None, &input).unwrap();
        assert_eq!(config.lower.program_name.as_deref(), Some("X"));
        assert_eq!(found, Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn discover_without_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, found) = Config::discover(None, &dir.path().join("tree.json")).unwrap();
        assert!(found.is_none());
        assert!(config.output.pretty);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::discover(Some(&missing), &dir.path().join("tree.json")).unwrap_err();
        assert!(err.contains("Failed to read"), "Error: {}", err);
    }
}
