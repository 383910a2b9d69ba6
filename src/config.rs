use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.scribens.fr/Scribens/TextSolution_Servlet";
pub const DEFAULT_CHAR_LIMIT: usize = 6000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_OPTIONS_COR: &str =
    "Genre_Je:0|Genre_Tu:0|Genre_Nous:0|Genre_Vous:0|Genre_On:0|RefOrth:0|ShowUPSol:1";
pub const DEFAULT_OPTIONS_STYLE: &str =
    "RepMin:3|GapRep:3|AllWords:0|FamilyWords:0|MinPhLg:30|MinPhCt:5|Ttr:250|Tts:150";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub char_limit: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub language: String,

    /// Grammar and gender preferences sent as `optionsCor`
    pub options_cor: String,
    /// Style thresholds sent as `optionsStyle`
    pub options_style: String,

    /// Write every raw response to this file
    pub save_response: Option<PathBuf>,

    /// Reuse responses stored in the cache directory; unset means off
    pub cache: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            char_limit: DEFAULT_CHAR_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            language: "fr".to_string(),
            options_cor: DEFAULT_OPTIONS_COR.to_string(),
            options_style: DEFAULT_OPTIONS_STYLE.to_string(),
            save_response: None,
            cache: None,
        }
    }
}

/// Values given on the command line; `None` leaves the file settings alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub char_limit: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub save_response: Option<PathBuf>,
    pub cache: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".scribens.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        Ok(config.apply(overrides))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        let defaults = Self::default();
        if other.endpoint != defaults.endpoint {
            self.endpoint = other.endpoint;
        }
        if other.char_limit != defaults.char_limit {
            self.char_limit = other.char_limit;
        }
        if other.timeout_secs != defaults.timeout_secs {
            self.timeout_secs = other.timeout_secs;
        }
        if other.user_agent != defaults.user_agent {
            self.user_agent = other.user_agent;
        }
        if other.language != defaults.language {
            self.language = other.language;
        }
        if other.options_cor != defaults.options_cor {
            self.options_cor = other.options_cor;
        }
        if other.options_style != defaults.options_style {
            self.options_style = other.options_style;
        }
        if other.save_response.is_some() {
            self.save_response = other.save_response;
        }
        if other.cache.is_some() {
            self.cache = other.cache;
        }
        self
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(limit) = overrides.char_limit {
            self.char_limit = limit;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(path) = overrides.save_response {
            self.save_response = Some(path);
        }
        if overrides.cache {
            self.cache = Some(true);
        }
        self
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "scribens").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn cache_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "scribens").map(|dirs| dirs.cache_dir().to_path_buf())
    }
}
