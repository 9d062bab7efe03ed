use crate::entropy::Base;
use crate::error::{Error, Result};
use crate::report::Format;
use crate::source::Source;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `base = 2.0` or `base = "e"` in config.toml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BaseSetting {
    Number(f64),
    Name(String),
}

impl BaseSetting {
    pub fn to_base(&self) -> Result<Base> {
        match self {
            BaseSetting::Number(v) => Base::new(*v),
            BaseSetting::Name(s) => s.parse(),
        }
    }
}

/// User defaults read from `<config_dir>/entro/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub base: Option<BaseSetting>,
    pub format: Option<Format>,
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|d| d.join("entro").join("config.toml"))
    }

    /// Defaults when the file does not exist; an error when it exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let buf = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let s = Self::parse(&buf).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(s)
    }

    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(p) => Self::load(&p),
            None => Ok(Settings::default()),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// CLI value wins over the file, the file over the built-in default.
    pub fn resolve_base(&self, cli: Option<Base>) -> Result<Base> {
        if let Some(b) = cli {
            return Ok(b);
        }
        match &self.base {
            Some(b) => b.to_base(),
            None => Ok(Base::default()),
        }
    }

    pub fn resolve_format(&self, cli: Option<Format>) -> Format {
        cli.or(self.format).unwrap_or_default()
    }
}

/// Everything the core needs for one measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub base: Base,
    pub source: Source,
}
