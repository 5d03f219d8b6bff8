//! Optional `template2pdf.toml` configuration.
//!
//! Settings that rarely change between runs (which browser to use, sandboxing,
//! house-style print options) live here rather than on the command line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use template2pdf::{ChromePrinter, ChromePrinterBuilder, PrintOptions};

pub const DEFAULT_CONFIG_FILE: &str = "template2pdf.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Escape HTML in substituted values
    #[serde(default)]
    pub autoescape: bool,
    /// Where the intermediate HTML page is written (defaults to the working directory)
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Print option overrides applied to every conversion
    #[serde(default = "PrintOptions::empty")]
    pub print: PrintOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Path to the Chrome / Chromium binary (otherwise found on PATH)
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    #[serde(default)]
    pub window_width: Option<u32>,
    #[serde(default)]
    pub window_height: Option<u32>,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            autoescape: false,
            scratch_dir: None,
            browser: BrowserConfig::default(),
            print: PrintOptions::empty(),
        }
    }
}

fn default_sandbox() -> bool {
    true
}
fn default_idle_timeout_secs() -> u64 {
    30
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            path: None,
            sandbox: default_sandbox(),
            window_width: None,
            window_height: None,
            idle_timeout_secs: default_idle_timeout_secs(),
            args: Vec::default(),
        }
    }
}

impl BrowserConfig {
    pub fn printer(&self) -> Result<ChromePrinter> {
        let mut builder = ChromePrinterBuilder::default();
        builder
            .sandbox(self.sandbox)
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs));
        if let Some(path) = &self.path {
            builder.path(path.clone());
        }
        if let (Some(width), Some(height)) = (self.window_width, self.window_height) {
            builder.window_size((width, height));
        }
        for arg in self.args.iter() {
            builder.arg(arg.as_str());
        }
        builder
            .build()
            .with_context(|| "Failed to configure the browser")
    }
}

impl Configuration {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML in {}", path.display()))
    }

    /// Load `explicit` if given, otherwise `template2pdf.toml` from the working
    /// directory if there is one, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Configuration> {
        match explicit {
            Some(path) => Configuration::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                log::debug!("using {DEFAULT_CONFIG_FILE} from the working directory");
                Configuration::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Configuration::default()),
        }
    }
}
