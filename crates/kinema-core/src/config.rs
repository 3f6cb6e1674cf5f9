use crate::color::Color;
use crate::easing::Easing;
use crate::error::{KinemaError, KinemaResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            title: "Kinema".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub target_fps: u32,
    /// Seconds used by animation factories when no duration is given.
    pub default_duration: f64,
    pub default_easing: Easing,
    pub background: String, // "#RRGGBB"
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            default_duration: 1.0,
            default_easing: Easing::EaseInOut,
            background: "#333333".to_string(),
        }
    }
}

impl PlaybackConfig {
    /// Parsed background color.
    pub fn background_color(&self) -> KinemaResult<Color> {
        Color::from_hex(&self.background).map_err(|e| {
            KinemaError::Config(format!("playback.background '{}': {}", self.background, e))
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String, // an EnvFilter directive, e.g. "info" or "kinema_scene=debug"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> KinemaResult<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &std::path::Path) -> KinemaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> KinemaResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| KinemaError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn validate(&self) -> KinemaResult<()> {
        if self.playback.target_fps == 0 {
            return Err(KinemaError::Config(
                "playback.target_fps must be at least 1".to_string(),
            ));
        }
        self.playback.background_color()?;
        Ok(())
    }
}
