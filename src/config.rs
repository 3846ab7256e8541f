use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub cache_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct Site {
    pub base_url: String,
    #[serde(default = "default_content_extension")]
    pub content_extension: String,
}

#[derive(Deserialize, Clone)]
pub struct Cache {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: i64,
    pub purge_interval_secs: Option<u64>,
}

impl Default for Cache {
    fn default() -> Self {
        Cache {
            enabled: true,
            timeout_secs: default_timeout_secs(),
            purge_interval_secs: None,
        }
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct Render {
    #[serde(default)]
    pub allow_raw_html: bool,
}

#[derive(Deserialize, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub render: Render,
    pub server: Server,
    pub log: Option<Log>,
}

fn default_content_extension() -> String {
    "md".to_string()
}

fn default_true() -> bool {
    true
}

/// Ten years, far past any useful page lifetime.
const MAX_TIMEOUT_SECS: i64 = 10 * 365 * 24 * 3600;

fn default_timeout_secs() -> i64 {
    3600
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|p| p.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not resolve executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        cache_dir: parse_path(cfg.paths.cache_dir)?,
    };

    if cfg.cache.timeout_secs <= 0 || cfg.cache.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(io::Error::new(ErrorKind::InvalidData,
            format!("cache.timeout_secs must be between 1 and {}", MAX_TIMEOUT_SECS)));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
