#![warn(missing_docs)]
//! Abstractions for running episodes on balance simulators.
//!
//! An environment implementing [`Env`] is driven by a [`Policy`]: the policy maps
//! an observation to an action, and the environment returns a [`Step`] together
//! with a [`Record`](record::Record) describing what happened in that step.
//! [`Evaluator`]s and [`util::eval_with_recorder`] are the driving loops built on
//! top of these traits.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
