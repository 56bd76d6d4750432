//! Configuration for a ChesterGL build
//!
//! A [`BuildConfig`] is assembled once, from defaults, an optional TOML file
//! and command-line overrides, and is read-only for the rest of the run.

use chester_core::{ChesterError, ChesterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where extern stubs are downloaded from unless configured otherwise
pub const DEFAULT_EXTERNS_URL: &str = "http://closure-compiler.googlecode.com/svn/trunk/contrib/externs";

/// Flag profile selected for the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Debug,
    #[default]
    Release,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }

    /// Name of the flag file written for this mode
    pub fn flag_file_name(&self) -> String {
        format!("{}.flags", self.as_str())
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildMode::Debug)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one build run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Debug or release flag profile
    pub mode: BuildMode,

    /// Download extern stubs before compiling
    pub fetch_externs: bool,

    /// Run JSDoc after a successful compile
    pub build_docs: bool,

    /// Directory receiving chester.js, its source map and docs
    pub output_dir: PathBuf,

    /// Interpreter used to run closurebuilder.py
    pub python: PathBuf,

    /// Java runtime used to run JSDoc
    pub java: PathBuf,

    /// JSDoc toolkit root directory
    pub jsdoc_root: PathBuf,

    /// Closure Compiler directory; externs are stored here too
    pub compiler_root: PathBuf,

    /// Closure Library root directory
    pub library_root: PathBuf,

    /// Compiler jar filename inside `compiler_root`
    pub compiler_jar: String,

    /// Base URL extern stubs are fetched from
    pub externs_url: String,

    /// Directory the flag file is written to and tools are run from
    pub work_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::Release,
            fetch_externs: true,
            build_docs: false,
            output_dir: PathBuf::from("./html"),
            python: PathBuf::from("python"),
            java: PathBuf::from("java"),
            jsdoc_root: PathBuf::from("/Applications/jsdoc-toolkit"),
            compiler_root: PathBuf::from("/Applications/closure-compiler"),
            library_root: PathBuf::from("/Applications/closure-library"),
            compiler_jar: "compiler.jar".to_string(),
            externs_url: DEFAULT_EXTERNS_URL.to_string(),
            work_dir: PathBuf::from("."),
        }
    }
}

impl BuildConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChesterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChesterError::configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        log::debug!("Loaded build configuration from {:?}", path);
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ChesterResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ChesterResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ChesterError::configuration_with_field(
                "output directory cannot be empty",
                "output_dir",
            ));
        }

        if self.compiler_jar.is_empty() {
            return Err(ChesterError::configuration_with_field(
                "compiler jar filename cannot be empty",
                "compiler_jar",
            ));
        }

        if self.compiler_jar.contains('/') || self.compiler_jar.contains('\\') {
            return Err(ChesterError::configuration_with_field(
                format!(
                    "compiler jar must be a filename inside the compiler directory, got '{}'",
                    self.compiler_jar
                ),
                "compiler_jar",
            ));
        }

        if self.externs_url.trim().is_empty() {
            return Err(ChesterError::configuration_with_field(
                "externs URL cannot be empty",
                "externs_url",
            ));
        }

        Ok(())
    }

    /// Location a given extern is stored at
    pub fn extern_path(&self, name: &str) -> String {
        format!("{}/{}", self.compiler_root.display(), name)
    }

    /// Path of the flag file for the configured mode
    pub fn flag_file_path(&self) -> PathBuf {
        self.work_dir.join(self.mode.flag_file_name())
    }

    /// Compiled bundle, as passed to the build tool
    pub fn output_file(&self) -> String {
        format!("{}/chester.js", self.output_dir.display())
    }

    /// Source map written by the compiler
    pub fn source_map_file(&self) -> String {
        format!("{}/chester.js.map", self.output_dir.display())
    }

    /// Directory JSDoc writes into
    pub fn docs_dir(&self) -> String {
        format!("{}/docs", self.output_dir.display())
    }

    /// Resolve a tool-relative path against the working directory, the way
    /// the spawned tools will see it.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.work_dir.join(path)
    }
}
