//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return and length across all episodes.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::debug;

/// A default implementation of the [`Evaluator`] trait.
///
/// This evaluator runs a specified number of episodes, each until the environment
/// reports termination or truncation. Environments without a step limit must
/// terminate on their own; the evaluator does not cut episodes short.
///
/// # Examples
///
/// ```ignore
/// let config = CartPoleEnvConfig::default().max_steps(Some(200));
/// let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&config, 42, 10)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Runs `n_episodes` episodes, resetting the environment with the episode index,
    /// and returns the average of the returns as `"Episode return"` and the average
    /// of the episode lengths as `"Episode length"`.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;
        let mut len_total = 0usize;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f32;
            let mut len_episode = 0usize;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_episode += step.reward;
                len_episode += 1;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            debug!(
                "Evaluation episode {}: {} steps, return = {}",
                ix, len_episode, r_episode
            );
            r_total += r_episode;
            len_total += len_episode;
        }

        let n = self.n_episodes.max(1) as f32;
        Ok(Record::from_slice(&[
            ("Episode return", RecordValue::Scalar(r_total / n)),
            ("Episode length", RecordValue::Scalar(len_total as f32 / n)),
        ]))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }
}
