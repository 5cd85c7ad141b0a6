//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    Act, Env, Obs, Policy,
};
use anyhow::Result;
use log::info;

/// Run episodes with a policy and recorder, returning the return of each episode.
///
/// For every step, the record emitted by the environment is extended with
/// `"episode"`, `"step"`, `"reward"`, `"obs"` (the observation the action was
/// chosen on) and `"act"`, then written to `recorder`. The terminal step is
/// recorded as well.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset()?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward;

            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("obs", RecordValue::Array1(prev_obs.to_vec()));
            record.insert("act", RecordValue::Array1(act.to_vec()));
            recorder.write(record);

            count_step += 1;
            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        info!(
            "Episode {:?}, {:?} steps, reward = {:?}",
            episode, count_step, r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}
