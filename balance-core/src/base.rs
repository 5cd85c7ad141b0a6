//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
pub trait Obs: Clone + Debug {
    /// Flattens the observation, used when the observation is written to a record.
    fn to_vec(&self) -> Vec<f32>;
}

/// An action applied to an environment.
pub trait Act: Clone + Debug {
    /// Flattens the action, used when the action is written to a record.
    fn to_vec(&self) -> Vec<f32>;
}
