//! Interpreter configuration
//!
//! Settings are fixed when an interpreter is created. The flags among them
//! (`undef_error`, `autoput`, `echo`, `trace_gc`) are only initial values;
//! programs change them at run time through the `set*` builtins.
//!
//! # Example
//!
//! ```rust
//! use joy_core::Config;
//!
//! let config = Config::new()
//!     .with_memory_max(50_000)
//!     .with_undef_error(false)
//!     .with_args(vec!["joy".to_string(), "input.joy".to_string()]);
//! assert_eq!(config.memory_max, 50_000);
//! ```
//!
//! Configuration can also come from TOML:
//!
//! ```toml
//! memory_max = 40000
//! trace_gc = 3
//! ```

use crate::arena::MEMORYMAX;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Startup settings for one interpreter instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arena capacity in nodes
    pub memory_max: usize,
    /// Executing an undefined user word is an error
    pub undef_error: bool,
    /// Auto-print mode reported by `autoput`; the driver acts on it
    pub autoput: i64,
    /// Echo mode reported by `echo`; the driver acts on it
    pub echo: i64,
    /// Collector and engine trace verbosity
    pub trace_gc: i64,
    /// Program arguments returned by `argv` and `argc`
    pub args: Vec<String>,
    /// Register the SIGINT handler that aborts running programs
    pub install_sigint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory_max: MEMORYMAX,
            undef_error: true,
            autoput: 1,
            echo: 0,
            trace_gc: 1,
            args: Vec::new(),
            install_sigint: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory_max(mut self, nodes: usize) -> Self {
        self.memory_max = nodes;
        self
    }

    pub fn with_undef_error(mut self, on: bool) -> Self {
        self.undef_error = on;
        self
    }

    pub fn with_autoput(mut self, mode: i64) -> Self {
        self.autoput = mode;
        self
    }

    pub fn with_echo(mut self, mode: i64) -> Self {
        self.echo = mode;
        self
    }

    pub fn with_trace_gc(mut self, level: i64) -> Self {
        self.trace_gc = level;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_sigint(mut self, install: bool) -> Self {
        self.install_sigint = install;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.memory_max, MEMORYMAX);
        assert!(config.undef_error);
        assert_eq!(config.autoput, 1);
        assert_eq!(config.echo, 0);
        assert_eq!(config.trace_gc, 1);
        assert!(!config.install_sigint);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("memory_max = 500\ntrace_gc = 3\n").unwrap();
        assert_eq!(config.memory_max, 500);
        assert_eq!(config.trace_gc, 3);
        assert!(config.undef_error);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Config::from_toml_str("memory_max = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "undef_error = false").unwrap();
        writeln!(tmp, "args = [\"joy\", \"x\"]").unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert!(!config.undef_error);
        assert_eq!(config.args, vec!["joy", "x"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
