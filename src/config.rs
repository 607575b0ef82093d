use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;
use crate::lines::DocSyntax;

/// Name of the optional project configuration file.
pub const CONFIG_FILE: &str = ".doccomment.toml";

/// Default maximum source file size (16 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Project configuration loaded from `.doccomment.toml`.
/// Include/exclude patterns are path prefixes applied to source files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path prefixes excluded from scanning.
    exclude: Vec<String>,
    /// Path prefixes to scan; empty means everything.
    include: Vec<String>,
    /// Documentation marker overrides keyed by file extension.
    markers: HashMap<String, MarkerOverride>,
    /// Files larger than this many bytes are rejected.
    pub max_file_size: u64,
}

/// Raw TOML structure for `.doccomment.toml`.
#[derive(serde::Deserialize)]
struct DocCommentTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::markers`].
    #[serde(default)]
    markers: HashMap<String, MarkerOverride>,
    /// See [`Config::max_file_size`].
    max_file_size: Option<u64>,
}

/// Per-extension replacement for the default documentation markers.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MarkerOverride {
    /// Replacement block marker, e.g. `/**`.
    pub block: Option<String>,
    /// Replacement line marker, e.g. `///`.
    pub line: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self::scan_everything_by_default();
    }
}

impl Config {
    /// Load config from `.doccomment.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::scan_everything_by_default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: DocCommentTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            markers: raw.markers,
            max_file_size: raw.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
        });
    }

    /// Default config that includes everything and excludes nothing.
    fn scan_everything_by_default() -> Self {
        return Self {
            exclude: Vec::new(),
            include: Vec::new(),
            markers: HashMap::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        };
    }

    /// Check whether a source file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }

    /// Apply any marker override configured for `ext` on top of `default`.
    pub fn syntax_for(&self, ext: &str, default: DocSyntax) -> DocSyntax {
        let Some(markers) = self.markers.get(ext) else {
            return default;
        };
        return DocSyntax {
            block_marker: markers.block.clone().or(default.block_marker),
            line_marker: markers.line.clone().or(default.line_marker),
            strict_markers: default.strict_markers,
        };
    }
}
