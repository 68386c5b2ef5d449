/// Tunables for a session, loadable from TOML.
///
/// Every section falls back to its `Default` when absent, so a config file
/// only has to mention the values it wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub stars: StarConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub enemies: EnemyConfig,
    pub asteroids: AsteroidConfig,
    pub session: SessionConfig,
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Margin the player may not cross, in pixels.
    pub boundary: f32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub speed: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub size: f32,
    /// Flame frame advances on ticks divisible by this.
    pub flame_update_rate: u64,
    /// Minimum ms between two thrust level increases.
    pub flame_thrust_rate_ms: u64,
    pub shoot_rate_ms: u64,
    pub skins: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub size: f32,
    pub hitbox: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawning_enabled: bool,
    pub wave_size: usize,
    pub spacing: f32,
    pub size: f32,
    /// Higher is faster: the step interval is `move_cadence_ms / speed`.
    pub speed: f32,
    pub skin: u8,
    pub step: f32,
    pub move_cadence_ms: u64,
    pub spawn_cooldown_ms: u64,
    pub explosion_frame_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub spawning_enabled: bool,
    pub large_size: f32,
    pub small_size: f32,
    pub spawn_interval_ms: u64,
    pub lifespan_ms: u64,
    pub fragment_count: usize,
    pub max_vertical_drift: f32,
    pub max_fragment_drift: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether the player-two activation key is bound at all.
    pub two_player: bool,
    pub high_score_path: PathBuf,
    /// Write the high score back on shutdown when it was beaten.
    pub persist_high_score: bool,
    pub music_dir: Option<PathBuf>,
    pub show_hitboxes: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 540.0,
            height: 720.0,
            boundary: 30.0,
            tick_rate: 60,
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 120,
            speed: 2.0,
            size: 2.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            size: 50.0,
            flame_update_rate: 15,
            flame_thrust_rate_ms: 100,
            shoot_rate_ms: 500,
            skins: 5,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            size: 48.0,
            hitbox: 1.0,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawning_enabled: true,
            wave_size: 5,
            spacing: 60.0,
            size: 60.0,
            speed: 1.0,
            skin: 11,
            step: 50.0,
            move_cadence_ms: 1500,
            spawn_cooldown_ms: 5000,
            explosion_frame_ms: 100,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            spawning_enabled: true,
            large_size: 48.0,
            small_size: 24.0,
            spawn_interval_ms: 3000,
            lifespan_ms: 20_000,
            fragment_count: 3,
            max_vertical_drift: 2.0,
            max_fragment_drift: 2.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            two_player: true,
            high_score_path: PathBuf::from("highscore.txt"),
            persist_high_score: false,
            music_dir: None,
            show_hitboxes: false,
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl Config {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The effective config as TOML, in the same shape `load` accepts.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.arena.tick_rate == 0 {
            return invalid("arena.tick_rate must be positive");
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return invalid("arena dimensions must be positive");
        }
        if self.player.size <= 0.0
            || self.enemies.size <= 0.0
            || self.asteroids.large_size <= 0.0
            || self.asteroids.small_size <= 0.0
            || self.projectile.size <= 0.0
        {
            return invalid("entity sizes must be positive");
        }
        let span = self.player.size + 2.0 * self.arena.boundary;
        if span > self.arena.width || span > self.arena.height {
            return invalid("arena is too small for the player and boundary");
        }
        if self.enemies.wave_size == 0 {
            return invalid("enemies.wave_size must be positive");
        }
        if self.enemies.speed <= 0.0 {
            return invalid("enemies.speed must be positive");
        }
        if self.player.skins == 0 {
            return invalid("player.skins must be positive");
        }
        if self.player.flame_update_rate == 0 {
            return invalid("player.flame_update_rate must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [asteroids]
            fragment_count = 5

            [session]
            persist_high_score = true
            "#,
        )
        .unwrap();
        assert_eq!(config.asteroids.fragment_count, 5);
        assert_eq!(config.asteroids.lifespan_ms, 20_000);
        assert!(config.session.persist_high_score);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let err = Config::from_toml("[arena]\ntick_rate = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn tiny_arena_rejected() {
        let err = Config::from_toml("[arena]\nwidth = 80.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn dumped_config_loads_back() {
        let mut config = Config::default();
        config.asteroids.fragment_count = 4;
        config.session.music_dir = Some(PathBuf::from("music"));

        let dumped = config.to_toml().unwrap();
        assert!(dumped.contains("fragment_count = 4"));
        assert_eq!(Config::from_toml(&dumped).unwrap(), config);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::from_toml("[arena\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
