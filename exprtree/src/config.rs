use std::path::Path;

use iht::FactoryConfig;
use serde::Deserialize;
use termcolor::ColorChoice;

use crate::error::ExprResult;

/// When pretty-printing to a terminal emits colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colors when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Layout settings of the pretty-printer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrettyConfig {
    /// Target line width.
    pub width: usize,
    /// Indentation of operands when an operator spans several lines.
    pub indent: usize,
    pub color: ColorMode,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 2,
            color: ColorMode::Auto,
        }
    }
}

impl PrettyConfig {
    pub fn from_toml_str(src: &str) -> ExprResult<Self> {
        Ok(toml::from_str(src)?)
    }
}

/// Complete configuration document, one table per component:
///
/// ```toml
/// [factory]
/// initial_buckets = 4096
///
/// [pretty]
/// width = 100
/// color = "never"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExprConfig {
    pub factory: FactoryConfig,
    pub pretty: PrettyConfig,
}

impl ExprConfig {
    pub fn from_toml_str(src: &str) -> ExprResult<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Load the configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> ExprResult<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }
}
