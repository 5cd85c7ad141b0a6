//! Configuration of [`CartPoleEnv`](crate::CartPoleEnv).
use crate::{EpisodeConfig, PhysicalConstants};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`CartPoleEnv`](crate::CartPoleEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct CartPoleEnvConfig {
    /// Physical constants of the engine.
    pub constants: PhysicalConstants,

    /// Initial conditions applied on every reset.
    pub episode: EpisodeConfig,

    /// Episodes are truncated after this many steps if set.
    pub max_steps: Option<usize>,
}

impl CartPoleEnvConfig {
    /// Sets the physical constants.
    pub fn constants(mut self, v: PhysicalConstants) -> Self {
        self.constants = v;
        self
    }

    /// Sets the initial conditions of episodes.
    pub fn episode(mut self, v: EpisodeConfig) -> Self {
        self.episode = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Constructs [`CartPoleEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CartPoleEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_env_config() -> Result<()> {
        let config = CartPoleEnvConfig::default()
            .constants(PhysicalConstants::default().cart_mass(0.5).force_noise(0.0))
            .episode(EpisodeConfig::new(0.1, -0.05, 0.2))
            .max_steps(Some(300));

        let dir = TempDir::new("cartpole_env_config")?;
        let path = dir.path().join("env_config.yaml");
        config.save(&path)?;
        let loaded = CartPoleEnvConfig::load(&path)?;
        assert_eq!(config, loaded);
        Ok(())
    }

    #[test]
    fn test_partial_yaml_uses_defaults() -> Result<()> {
        let yaml = "episode:\n  initial_pole_angle: 0.1\nconstants:\n  pole_mass: 0.1\n";
        let config: CartPoleEnvConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.episode, EpisodeConfig::new(0.0, 0.1, 0.0));
        assert_eq!(config.constants.pole_mass, 0.1);
        assert_eq!(config.constants.cart_mass, 0.31);
        assert_eq!(config.max_steps, None);
        Ok(())
    }
}
