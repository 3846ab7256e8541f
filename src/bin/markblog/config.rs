use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use markblog::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

/// Next to the executable, then the current dir, then the user config dir.
fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {}", CFG_FILE_NAME)),
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Error reading {}", config_path.display()))?;

    if let Some(mut log) = config.log {
        let location = match log.location {
            Some(location) => location,
            None => dirs::cache_dir()
                .ok_or_else(|| anyhow!("Could not find user cache dir for log files"))?
                .join("markblog").join("log").join("server.log"),
        };
        println!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    if config.cache.enabled {
        fs::create_dir_all(&config.paths.cache_dir)
            .with_context(|| format!("Error creating cache dir {}", config.paths.cache_dir.display()))?;
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match config_path {
        Some(path) => path,
        None => dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not find user config dir"))?
            .join(CFG_FILE_NAME),
    };

    println!("Writing sample config to {}", path.display());
    write_sample_cfg(&path)
        .with_context(|| format!("Error writing {}", path.display()))?;

    Ok(path)
}
