//! Configuration management for annofmt.
//!
//! This module provides the [`Config`] struct which holds the marker set driving
//! line classification. Configuration can be loaded from:
//! - TOML files (`annofmt.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["annofmt.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_line_marker() -> String {
    "- ".to_string()
}
fn default_quote_marker() -> String {
    "> ".to_string()
}
fn default_heading_marker() -> String {
    "#".to_string()
}
fn default_comment_marker() -> String {
    "%".to_string()
}
fn default_task_marker() -> String {
    "?".to_string()
}
fn default_tag_marker() -> String {
    "!".to_string()
}
fn default_merge_marker() -> String {
    "+".to_string()
}
fn default_keyword_marker() -> String {
    "=".to_string()
}
fn default_front_matter_delimiter() -> String {
    "---".to_string()
}
fn default_keywords_key() -> String {
    "keywords".to_string()
}

/// Marker set and output settings for annofmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix that starts every control line (default: "- ")
    #[serde(default = "default_line_marker")]
    pub line_marker: String,

    /// Prefix of a quoted highlight line (default: "> ")
    #[serde(default = "default_quote_marker")]
    pub quote_marker: String,

    /// Heading marker, repeated to select depth (default: "#")
    #[serde(default = "default_heading_marker")]
    pub heading_marker: String,

    /// Comment marker (default: "%")
    #[serde(default = "default_comment_marker")]
    pub comment_marker: String,

    /// Task marker (default: "?")
    #[serde(default = "default_task_marker")]
    pub task_marker: String,

    /// Tag marker (default: "!")
    #[serde(default = "default_tag_marker")]
    pub tag_marker: String,

    /// Merge marker, joins the quotes around it into one line (default: "+")
    #[serde(default = "default_merge_marker")]
    pub merge_marker: String,

    /// Keyword marker (default: "=")
    #[serde(default = "default_keyword_marker")]
    pub keyword_marker: String,

    /// Line that opens and closes a leading metadata block (default: "---")
    #[serde(default = "default_front_matter_delimiter")]
    pub front_matter_delimiter: String,

    /// Key of the injected keyword metadata line (default: "keywords")
    #[serde(default = "default_keywords_key")]
    pub keywords_key: String,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub line_marker: Option<String>,
    pub quote_marker: Option<String>,
    pub heading_marker: Option<String>,
    pub comment_marker: Option<String>,
    pub task_marker: Option<String>,
    pub tag_marker: Option<String>,
    pub merge_marker: Option<String>,
    pub keyword_marker: Option<String>,
    pub front_matter_delimiter: Option<String>,
    pub keywords_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_marker: default_line_marker(),
            quote_marker: default_quote_marker(),
            heading_marker: default_heading_marker(),
            comment_marker: default_comment_marker(),
            task_marker: default_task_marker(),
            tag_marker: default_tag_marker(),
            merge_marker: default_merge_marker(),
            keyword_marker: default_keyword_marker(),
            front_matter_delimiter: default_front_matter_delimiter(),
            keywords_key: default_keywords_key(),
        }
    }
}

impl Config {
    /// The six single-character control markers with their setting names
    #[must_use]
    pub fn control_markers(&self) -> [(&'static str, &str); 6] {
        [
            ("heading_marker", &self.heading_marker),
            ("comment_marker", &self.comment_marker),
            ("task_marker", &self.task_marker),
            ("tag_marker", &self.tag_marker),
            ("merge_marker", &self.merge_marker),
            ("keyword_marker", &self.keyword_marker),
        ]
    }

    /// Validate the marker set
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.line_marker.is_empty() {
            return Some("line_marker must not be empty".to_string());
        }
        if self.quote_marker.trim().is_empty() {
            return Some("quote_marker must contain a non-whitespace character".to_string());
        }
        if self.line_marker == self.quote_marker {
            return Some(format!(
                "line_marker and quote_marker are both {:?}",
                self.line_marker
            ));
        }

        let markers = self.control_markers();
        for (name, marker) in &markers {
            if marker.chars().count() != 1 {
                return Some(format!(
                    "{name} must be a single character, got {marker:?}"
                ));
            }
        }
        for (i, (name, marker)) in markers.iter().enumerate() {
            if let Some((other, _)) = markers[i + 1..].iter().find(|(_, m)| m == marker) {
                return Some(format!("{name} and {other} are both {marker:?}"));
            }
        }

        for (name, value) in [
            ("front_matter_delimiter", &self.front_matter_delimiter),
            ("keywords_key", &self.keywords_key),
        ] {
            if value.trim().is_empty() {
                return Some(format!("{name} must not be empty"));
            }
            if value.contains('\n') {
                return Some(format!("{name} must fit on a single line"));
            }
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        let fields = [
            (&mut self.line_marker, &partial.line_marker),
            (&mut self.quote_marker, &partial.quote_marker),
            (&mut self.heading_marker, &partial.heading_marker),
            (&mut self.comment_marker, &partial.comment_marker),
            (&mut self.task_marker, &partial.task_marker),
            (&mut self.tag_marker, &partial.tag_marker),
            (&mut self.merge_marker, &partial.merge_marker),
            (&mut self.keyword_marker, &partial.keyword_marker),
            (&mut self.front_matter_delimiter, &partial.front_matter_delimiter),
            (&mut self.keywords_key, &partial.keywords_key),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                field.clone_from(v);
            }
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// The home directory config comes first, then every ancestor from the root
    /// down to the file's directory. Returns paths least specific first.
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config has the lowest priority
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer configs override
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        let mut config = Self::default();
        for path in &config_files {
            log::debug!("Reading config file {}", path.display());
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
