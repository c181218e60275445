//! Layered settings for the CLI: built-in defaults, then an optional TOML
//! file named by `HANDSCOPE_CONFIG`, then `HANDSCOPE_*` environment
//! variables. The winning layer of every value is recorded so `cfg` can
//! show where it came from.

use std::fs;
use std::time::Duration;

use handscope_engine::equity::EquityConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub iterations: usize,
    pub max_iterations: usize,
    pub seed: Option<u64>,
    pub deadline_ms: Option<u64>,
    /// Treat recoverable parse warnings as failures in `verify`.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub iterations: ValueSource,
    pub max_iterations: ValueSource,
    pub seed: ValueSource,
    pub deadline_ms: ValueSource,
    pub strict: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            iterations: ValueSource::Default,
            max_iterations: ValueSource::Default,
            seed: ValueSource::Default,
            deadline_ms: ValueSource::Default,
            strict: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EquityConfig::default();
        Self {
            iterations: engine.iterations,
            max_iterations: engine.max_iterations,
            seed: None,
            deadline_ms: None,
            strict: false,
        }
    }
}

impl Config {
    /// Equity settings for one run; `iterations` and `seed` from the command
    /// line take precedence over the resolved values.
    pub fn equity(&self, iterations: Option<usize>, seed: Option<u64>) -> EquityConfig {
        EquityConfig {
            iterations: iterations.unwrap_or(self.iterations),
            max_iterations: self.max_iterations,
            seed: seed.or(self.seed),
            deadline: self.deadline_ms.map(Duration::from_millis),
            ..EquityConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HANDSCOPE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.max_iterations {
            cfg.max_iterations = v;
            sources.max_iterations = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.deadline_ms {
            cfg.deadline_ms = Some(v);
            sources.deadline_ms = ValueSource::File;
        }
        if let Some(v) = f.strict {
            cfg.strict = v;
            sources.strict = ValueSource::File;
        }
    }

    if let Ok(n) = std::env::var("HANDSCOPE_ITERATIONS")
        && !n.is_empty()
    {
        cfg.iterations = n
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid iterations".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("HANDSCOPE_MAX_ITERATIONS")
        && !n.is_empty()
    {
        cfg.max_iterations = n
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_iterations".into()))?;
        sources.max_iterations = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("HANDSCOPE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var("HANDSCOPE_DEADLINE_MS")
        && !ms.is_empty()
    {
        cfg.deadline_ms = Some(
            ms.parse()
                .map_err(|_| ConfigError::Invalid("Invalid deadline_ms".into()))?,
        );
        sources.deadline_ms = ValueSource::Env;
    }
    if let Ok(strict) = std::env::var("HANDSCOPE_STRICT")
        && !strict.is_empty()
    {
        cfg.strict =
            parse_bool(&strict).ok_or_else(|| ConfigError::Invalid("Invalid strict".into()))?;
        sources.strict = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    iterations: Option<usize>,
    #[serde(default)]
    max_iterations: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    deadline_ms: Option<u64>,
    #[serde(default)]
    strict: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >0".into(),
        ));
    }
    if cfg.iterations > cfg.max_iterations {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: iterations ({}) exceed max_iterations ({})",
            cfg.iterations, cfg.max_iterations
        )));
    }
    if cfg.deadline_ms == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: deadline_ms must be >0".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_engine() {
        let cfg = Config::default();
        assert_eq!(cfg.iterations, 10_000);
        assert_eq!(cfg.max_iterations, 1_000_000);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn validation_rejects_bad_limits() {
        let zero = Config {
            iterations: 0,
            ..Config::default()
        };
        assert!(validate(&zero).is_err());

        let over = Config {
            iterations: 20,
            max_iterations: 10,
            ..Config::default()
        };
        assert!(validate(&over).is_err());

        let no_time = Config {
            deadline_ms: Some(0),
            ..Config::default()
        };
        assert!(validate(&no_time).is_err());
    }

    #[test]
    fn command_line_overrides_win() {
        let cfg = Config {
            seed: Some(1),
            deadline_ms: Some(250),
            ..Config::default()
        };
        let eq = cfg.equity(Some(500), Some(9));
        assert_eq!(eq.iterations, 500);
        assert_eq!(eq.seed, Some(9));
        assert_eq!(eq.deadline, Some(Duration::from_millis(250)));

        let eq = cfg.equity(None, None);
        assert_eq!(eq.iterations, 10_000);
        assert_eq!(eq.seed, Some(1));
    }

    #[test]
    fn bools_accept_common_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
