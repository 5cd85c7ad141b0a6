//! [`Env`] adapter of the dynamics engine.
use crate::{CartPoleEnvConfig, CartPoleModel, RngNoise, SimulationState};
use anyhow::Result;
use balance_core::{record::Record, Act, Env, Info, Obs, Step};
use log::{debug, trace};
use rand::rngs::StdRng;

/// Observation of [`CartPoleEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleObs(pub SimulationState);

impl Obs for CartPoleObs {
    fn to_vec(&self) -> Vec<f32> {
        self.0.to_array().iter().map(|v| *v as f32).collect()
    }
}

impl From<SimulationState> for CartPoleObs {
    fn from(state: SimulationState) -> Self {
        Self(state)
    }
}

/// Action of [`CartPoleEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleAct {
    /// Command, nominally in `[-1, 1]`.
    pub command: f64,
}

impl CartPoleAct {
    /// Creates an action.
    pub fn new(command: f64) -> Self {
        Self { command }
    }
}

impl Act for CartPoleAct {
    fn to_vec(&self) -> Vec<f32> {
        vec![self.command as f32]
    }
}

/// Information attached to each [`Step`] of [`CartPoleEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleInfo {
    /// Force applied to the cart in the step, noise included.
    pub applied_force: f64,
}

impl Info for CartPoleInfo {}

/// Cart-pole environment.
///
/// Every reset starts from the initial conditions in [`CartPoleEnvConfig::episode`].
/// A step yields reward 1 while the pole stays up and 0 on the step it falls.
/// Episodes end when the pole falls, or are truncated after
/// [`CartPoleEnvConfig::max_steps`] steps if set.
pub struct CartPoleEnv {
    config: CartPoleEnvConfig,
    model: CartPoleModel<RngNoise<StdRng>>,
    seed: i64,
    count_steps: usize,
}

impl CartPoleEnv {
    /// The underlying dynamics engine.
    pub fn model(&self) -> &CartPoleModel<RngNoise<StdRng>> {
        &self.model
    }

    /// Number of steps in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }
}

impl Env for CartPoleEnv {
    type Config = CartPoleEnvConfig;
    type Obs = CartPoleObs;
    type Act = CartPoleAct;
    type Info = CartPoleInfo;

    /// Builds the environment. The noise of the engine is seeded with `seed`.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let noise = RngNoise::seeded(seed as u64);
        Ok(Self {
            config: config.clone(),
            model: CartPoleModel::new(config.constants, noise),
            seed,
            count_steps: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.model.step(a.command);
        self.count_steps += 1;

        let state = self.model.observe();
        let is_terminated = self.model.is_terminal();
        let is_truncated = match self.config.max_steps {
            Some(max_steps) => self.count_steps >= max_steps,
            None => false,
        };
        let reward = if is_terminated { 0.0 } else { 1.0 };
        trace!(
            "step {}: command = {}, state = {:?}",
            self.count_steps,
            a.command,
            state
        );

        let info = CartPoleInfo {
            applied_force: self.model.applied_force(),
        };
        let step = Step::<Self>::new(
            CartPoleObs(state),
            a.clone(),
            reward,
            is_terminated,
            is_truncated,
            info,
            None,
        );
        (step, state.to_record(is_terminated))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.model.reset(&self.config.episode);
        self.count_steps = 0;
        debug!("Reset cart-pole with {:?}", self.config.episode);
        Ok(self.model.observe().into())
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = self.reset().ok();
        }
        (step, record)
    }

    /// Reseeds the noise with `seed + ix` and resets the environment, so that
    /// evaluation episodes with the same index see the same noise.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        let seed = self.seed.wrapping_add(ix as i64) as u64;
        *self.model.noise_mut() = RngNoise::seeded(seed);
        self.reset()
    }
}
