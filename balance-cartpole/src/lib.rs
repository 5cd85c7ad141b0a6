#![warn(missing_docs)]
//! Cart-pole simulator for remote reinforcement learning training.
//!
//! [`CartPoleModel`] is the dynamics engine: an inverted pendulum hinged on a cart
//! moving along a 1-D track, advanced by explicit Euler integration at a fixed tick.
//! Its physical parameters come from a [`PhysicalConstants`] value and the noise
//! added to the force command from an injected [`NoiseSource`].
//!
//! ```rust
//! use balance_cartpole::{CartPoleModel, EpisodeConfig, PhysicalConstants, RngNoise};
//!
//! let mut model = CartPoleModel::new(PhysicalConstants::default(), RngNoise::seeded(42));
//! model.reset(&EpisodeConfig::new(0.0, 0.05, 0.0));
//! while !model.is_terminal() {
//!     model.step(0.0);
//! }
//! assert!(model.observe().pole_angle.abs() >= std::f64::consts::FRAC_PI_4);
//! ```
//!
//! Around the engine, [`CartPoleEnv`] implements [`balance_core::Env`] so that
//! policies can be evaluated on it, and [`SimulatorSession`] drives the engine
//! from the events of a [`TrainingService`].
mod config;
mod constants;
mod env;
mod error;
mod interface;
mod model;
mod noise;
pub mod session;
mod state;

pub use config::CartPoleEnvConfig;
pub use constants::PhysicalConstants;
pub use env::{CartPoleAct, CartPoleEnv, CartPoleInfo, CartPoleObs};
pub use error::SessionError;
pub use interface::SimulatorInterface;
pub use model::{CartPoleModel, TERMINAL_POLE_ANGLE};
pub use noise::{NoiseSource, RngNoise, SequenceNoise, ZeroNoise};
pub use session::{
    AdvanceResponse, Event, ReplayService, SessionSummary, SimulatorSession,
    SimulatorStateReport, TrainingService,
};
pub use state::{Action, EpisodeConfig, SimulationState};
