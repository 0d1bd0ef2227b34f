use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::{BotType, FirstPlayerMode};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";

pub fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(default_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub first_player: FirstPlayerMode,
    #[serde(default)]
    pub bot_type: BotType,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_prefix: Option<String>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if let Some(prefix) = &self.log_prefix
            && prefix.trim().is_empty()
        {
            return Err("log_prefix must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_player: FirstPlayerMode::Human,
            bot_type: BotType::Heuristic,
            seed: None,
            log_prefix: None,
        }
    }
}
