//! Physical constants of the cart-pole system.
use serde::{Deserialize, Serialize};

/// Parameters of the dynamics law.
///
/// A value of this type is handed to [`CartPoleModel`](crate::CartPoleModel) at
/// construction and never changes afterwards. Engines with different constants can
/// coexist, e.g. for domain randomization.
///
/// The default values describe a light cart (0.31 kg) carrying a 0.4 m pole.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s^2).
    pub gravity: f64,

    /// Mass of the cart (kg).
    pub cart_mass: f64,

    /// Mass of the pole (kg).
    pub pole_mass: f64,

    /// Half the length of the pole (m).
    pub pole_half_length: f64,

    /// Force applied to the cart for a command of magnitude 1 (N).
    pub force_mag: f64,

    /// Duration of a tick (s).
    pub step_duration: f64,

    /// Width of the track (m). Not enforced by the dynamics.
    pub track_width: f64,

    /// Half-width of the uniform noise added to the command, as a fraction of `force_mag`.
    /// Only the magnitude matters; a negative value acts like its absolute value.
    pub force_noise: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 0.31,
            pole_mass: 0.055,
            pole_half_length: 0.4 / 2.0,
            force_mag: 1.0,
            step_duration: 0.02,
            track_width: 1.0,
            force_noise: 0.02,
        }
    }
}

impl PhysicalConstants {
    /// Mass of the cart and the pole.
    #[inline]
    pub fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }

    /// Product of the pole mass and the pole half-length.
    #[inline]
    pub fn pole_mass_length(&self) -> f64 {
        self.pole_mass * self.pole_half_length
    }

    /// Sets the gravitational acceleration.
    pub fn gravity(mut self, v: f64) -> Self {
        self.gravity = v;
        self
    }

    /// Sets the mass of the cart.
    pub fn cart_mass(mut self, v: f64) -> Self {
        self.cart_mass = v;
        self
    }

    /// Sets the mass of the pole.
    pub fn pole_mass(mut self, v: f64) -> Self {
        self.pole_mass = v;
        self
    }

    /// Sets half the length of the pole.
    pub fn pole_half_length(mut self, v: f64) -> Self {
        self.pole_half_length = v;
        self
    }

    /// Sets the force magnitude.
    pub fn force_mag(mut self, v: f64) -> Self {
        self.force_mag = v;
        self
    }

    /// Sets the duration of a tick.
    pub fn step_duration(mut self, v: f64) -> Self {
        self.step_duration = v;
        self
    }

    /// Sets the width of the track.
    pub fn track_width(mut self, v: f64) -> Self {
        self.track_width = v;
        self
    }

    /// Sets the noise fraction.
    pub fn force_noise(mut self, v: f64) -> Self {
        self.force_noise = v;
        self
    }
}
