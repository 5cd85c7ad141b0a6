//! Dynamics engine of the cart-pole system.
//!
//! The classic single-pole equations of motion (Barto, Sutton and Anderson, 1983),
//! integrated with explicit Euler at a fixed tick.
use crate::{EpisodeConfig, NoiseSource, PhysicalConstants, SimulationState};
use std::f64::consts::FRAC_PI_4;

/// Angle magnitude at which the pole is considered fallen (45 degrees).
pub const TERMINAL_POLE_ANGLE: f64 = FRAC_PI_4;

/// Cart-pole dynamics engine.
///
/// The state is zeroed on construction; [`CartPoleModel::reset`] starts an episode,
/// [`CartPoleModel::step`] advances it by one tick.
///
/// Stepping a terminal engine is not prevented. The driving loop has to stop calling
/// [`CartPoleModel::step`] once [`CartPoleModel::is_terminal`] returns `true`,
/// otherwise the pole keeps integrating past the threshold.
///
/// Inputs are not validated. Non-finite values propagate into the state, and a NaN
/// pole angle is never terminal.
#[derive(Debug, Clone)]
pub struct CartPoleModel<N: NoiseSource> {
    constants: PhysicalConstants,
    noise: N,
    state: SimulationState,
    applied_force: f64,
}

impl<N: NoiseSource> CartPoleModel<N> {
    /// Creates an engine with the given constants and noise source.
    pub fn new(constants: PhysicalConstants, noise: N) -> Self {
        Self {
            constants,
            noise,
            state: SimulationState::default(),
            applied_force: 0.0,
        }
    }

    /// Physical constants of this engine.
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Mutable access to the noise source, e.g. for reseeding between episodes.
    pub fn noise_mut(&mut self) -> &mut N {
        &mut self.noise
    }

    /// Starts an episode from the given initial conditions.
    ///
    /// Velocities and the pole center fields are zeroed. Nothing from the previous
    /// episode is carried over.
    pub fn reset(&mut self, config: &EpisodeConfig) {
        self.state = SimulationState {
            cart_position: config.initial_cart_position,
            pole_angle: config.initial_pole_angle,
            target_pole_position: config.target_pole_position,
            ..SimulationState::default()
        };
        self.applied_force = 0.0;
    }

    /// Advances the state by one tick under `command`.
    ///
    /// The force is `force_mag * (command + noise)` with noise drawn uniformly from
    /// `[-force_noise, force_noise]`, so a zero-force policy cannot balance the pole
    /// by doing nothing.
    pub fn step(&mut self, command: f64) {
        let c = &self.constants;
        let noise = self.noise.uniform(-c.force_noise, c.force_noise);
        let force = c.force_mag * (command + noise);

        let total_mass = c.total_mass();
        let pole_mass_length = c.pole_mass_length();
        let s = &mut self.state;

        let cos_theta = s.pole_angle.cos();
        let sin_theta = s.pole_angle.sin();

        let temp = (force + pole_mass_length * s.pole_angular_velocity.powi(2) * sin_theta)
            / total_mass;
        let angular_accel = (c.gravity * sin_theta - cos_theta * temp)
            / (c.pole_half_length
                * (4.0 / 3.0 - (c.pole_mass * cos_theta.powi(2)) / total_mass));
        let linear_accel = temp - (pole_mass_length * angular_accel * cos_theta) / total_mass;

        // Positions are advanced with the velocities of the previous tick.
        s.cart_position += c.step_duration * s.cart_velocity;
        s.cart_velocity += c.step_duration * linear_accel;
        s.pole_angle += c.step_duration * s.pole_angular_velocity;
        s.pole_angular_velocity += c.step_duration * angular_accel;

        s.pole_center_position = s.cart_position + s.pole_angle.sin() * c.pole_half_length;
        // Takes the sine of the angular velocity, not of the angle. The remote service
        // was trained against this definition.
        s.pole_center_velocity =
            s.cart_velocity + s.pole_angular_velocity.sin() * c.pole_half_length;

        self.applied_force = force;
    }

    /// Returns a snapshot of the state.
    pub fn observe(&self) -> SimulationState {
        self.state
    }

    /// `true` once the pole angle reaches 45 degrees in either direction.
    pub fn is_terminal(&self) -> bool {
        self.state.pole_angle.abs() >= TERMINAL_POLE_ANGLE
    }

    /// Force applied in the last tick, zero after a reset.
    pub fn applied_force(&self) -> f64 {
        self.applied_force
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RngNoise, SequenceNoise, ZeroNoise};

    fn model_with_angle(angle: f64) -> CartPoleModel<ZeroNoise> {
        let mut model = CartPoleModel::new(PhysicalConstants::default(), ZeroNoise);
        model.reset(&EpisodeConfig::new(0.0, angle, 0.0));
        model
    }

    #[test]
    fn test_reset_applies_initial_conditions() {
        let mut model = CartPoleModel::new(PhysicalConstants::default(), ZeroNoise);
        model.reset(&EpisodeConfig::new(0.3, -0.1, 0.7));
        assert_eq!(
            model.observe(),
            SimulationState {
                cart_position: 0.3,
                pole_angle: -0.1,
                target_pole_position: 0.7,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_reset_does_not_leak_between_episodes() {
        let config = EpisodeConfig::new(0.1, 0.2, 0.3);
        let mut model = CartPoleModel::new(PhysicalConstants::default(), RngNoise::seeded(1));
        model.reset(&config);
        let fresh = model.observe();

        for _ in 0..50 {
            model.step(1.0);
        }
        assert_ne!(model.observe(), fresh);

        model.reset(&config);
        assert_eq!(model.observe(), fresh);
        assert_eq!(model.applied_force(), 0.0);
    }

    #[test]
    fn test_default_reset_equals_explicit_zeros() {
        let mut a = CartPoleModel::new(PhysicalConstants::default(), ZeroNoise);
        let mut b = CartPoleModel::new(PhysicalConstants::default(), ZeroNoise);
        a.reset(&EpisodeConfig::default());
        b.reset(&EpisodeConfig::new(0.0, 0.0, 0.0));
        assert_eq!(a.observe(), b.observe());
        assert_eq!(a.observe(), SimulationState::default());
    }

    #[test]
    fn test_termination_boundary() {
        let eps = 1e-9;
        assert!(!model_with_angle(0.0).is_terminal());
        assert!(!model_with_angle(FRAC_PI_4 - eps).is_terminal());
        assert!(!model_with_angle(-FRAC_PI_4 + eps).is_terminal());
        assert!(model_with_angle(FRAC_PI_4).is_terminal());
        assert!(model_with_angle(-FRAC_PI_4).is_terminal());
        assert!(model_with_angle(FRAC_PI_4 + eps).is_terminal());
        assert!(model_with_angle(3.0).is_terminal());
    }

    #[test]
    fn test_equilibrium_is_preserved_without_force() {
        let mut model = model_with_angle(0.0);
        model.step(0.0);
        assert_eq!(model.observe(), SimulationState::default());
        assert_eq!(model.applied_force(), 0.0);
    }

    #[test]
    fn test_first_tick_uses_previous_velocity_for_position() {
        let mut model = model_with_angle(0.0);
        model.step(1.0);
        let s = model.observe();

        // Velocities change, positions and the angle do not.
        assert_eq!(s.cart_position, 0.0);
        assert_eq!(s.pole_angle, 0.0);
        assert!((s.cart_velocity - 0.06177606177606178).abs() < 1e-12);
        assert!((s.pole_angular_velocity + 0.23166023166023164).abs() < 1e-12);
        assert!((s.pole_center_velocity - 0.01585731770145641).abs() < 1e-12);
        assert_eq!(model.applied_force(), 1.0);
    }

    #[test]
    fn test_applied_force_within_noise_bound() {
        let constants = PhysicalConstants::default();
        let mut model = CartPoleModel::new(constants, RngNoise::seeded(3));
        model.reset(&EpisodeConfig::default());

        for command in &[-1.0, 0.0, 0.5, 1.0] {
            for _ in 0..200 {
                model.step(*command);
                let deviation = model.applied_force() - constants.force_mag * command;
                assert!(deviation.abs() <= constants.force_mag * constants.force_noise + 1e-12);
            }
        }
    }

    #[test]
    fn test_noise_is_drawn_once_per_step() {
        let mut model = CartPoleModel::new(
            PhysicalConstants::default(),
            SequenceNoise::new(vec![0.01, -0.02]),
        );
        model.step(0.5);
        assert!((model.applied_force() - 0.51).abs() < 1e-12);
        model.step(0.5);
        assert!((model.applied_force() - 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_nan_input_propagates() {
        let mut model = model_with_angle(f64::NAN);
        assert!(!model.is_terminal());

        let mut model = model_with_angle(0.1);
        model.step(f64::NAN);
        let s = model.observe();
        assert!(s.cart_velocity.is_nan());
        assert!(s.pole_angular_velocity.is_nan());
        model.step(0.0);
        assert!(model.observe().pole_angle.is_nan());
        assert!(!model.is_terminal());
    }

    #[test]
    fn test_out_of_range_angle_is_accepted() {
        let angle = 10.0 * std::f64::consts::PI;
        let mut model = model_with_angle(angle);
        assert!(model.is_terminal());

        model.step(5.0);
        assert_eq!(model.observe().pole_angle, angle);
        assert!(model.observe().pole_angular_velocity.is_finite());
    }
}
