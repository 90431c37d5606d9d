use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> GameResult<String>;
    fn deserialize(&self, content: &str) -> GameResult<TConfig>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> GameResult<String> {
        serde_yaml_ng::to_string(config)
            .map_err(|e| GameError::Storage(format!("Failed to serialize: {}", e)))
    }

    fn deserialize(&self, content: &str) -> GameResult<TConfig> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| GameError::MalformedPersistedState(e.to_string()))
    }
}
