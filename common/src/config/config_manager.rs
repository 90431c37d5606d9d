use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ConfigContentProvider, ConfigSerializer, Validate, YamlConfigSerializer};
use crate::error::{GameError, GameResult};
use crate::log_warn;

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    fn cached(&self) -> MutexGuard<'_, Option<TConfig>> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reads and validates the stored config. Missing content yields `TConfig::default()`.
    pub fn get_config(&self) -> GameResult<TConfig> {
        let mut current = self.cached();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(GameError::MalformedPersistedState)?;

        *current = Some(config.clone());
        Ok(config)
    }

    /// Like [`Self::get_config`], but unreadable or malformed content is discarded
    /// in favour of the default.
    pub fn load_or_default(&self) -> TConfig {
        match self.get_config() {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Discarding stored state, using defaults: {}", e);
                let config = TConfig::default();
                *self.cached() = Some(config.clone());
                config
            }
        }
    }

    pub fn set_config(&self, config: &TConfig) -> GameResult<()> {
        config
            .validate()
            .map_err(GameError::MalformedPersistedState)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.cached() = Some(config.clone());
        Ok(())
    }
}
