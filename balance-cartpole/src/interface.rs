//! Description of the simulator sent to the training service on registration.
use crate::SessionError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Simulator interface.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SimulatorInterface {
    /// Name under which the simulator registers.
    pub name: String,

    /// Seconds the service waits for the simulator before dropping the session.
    pub timeout: f64,

    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl SimulatorInterface {
    /// Creates an interface.
    pub fn new(name: impl Into<String>, timeout: f64) -> Self {
        Self {
            name: name.into(),
            timeout,
            description: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.description = Some(v.into());
        self
    }

    /// Loads the interface from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, if the name is empty, or if
    /// the timeout is not a positive number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open interface file {:?}", path))?;
        let interface: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse interface file {:?}", path))?;
        interface.validate()?;
        Ok(interface)
    }

    /// Checks that the interface can be registered.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.name.trim().is_empty() {
            return Err(SessionError::Interface("empty name".to_string()));
        }
        if self.timeout.is_nan() || self.timeout <= 0.0 {
            return Err(SessionError::Interface(format!(
                "timeout must be positive, got {}",
                self.timeout
            )));
        }
        Ok(())
    }
}
