use anyhow::Result;
use balance_cartpole::{
    CartPoleAct, CartPoleEnv, CartPoleEnvConfig, CartPoleObs, EpisodeConfig,
};
use balance_core::{
    record::{BufferedRecorder, Record},
    util, DefaultEvaluator, Env as _, Evaluator as _, Policy,
};
use log::info;
use serde::Serialize;
use std::{convert::TryFrom, fs::File, path::Path};

const N_EPISODES: usize = 5;
const MAX_STEPS: usize = 200;

struct RandomPolicy;

impl Policy<CartPoleEnv> for RandomPolicy {
    fn sample(&mut self, _: &CartPoleObs) -> CartPoleAct {
        CartPoleAct::new(fastrand::f64() * 2.0 - 1.0)
    }
}

#[derive(Debug, Serialize)]
struct CartPoleRecord {
    episode: usize,
    step: usize,
    reward: f32,
    command: f32,
    cart_position: f32,
    cart_velocity: f32,
    pole_angle: f32,
    pole_angular_velocity: f32,
    halted: bool,
}

impl TryFrom<&Record> for CartPoleRecord {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self> {
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            step: record.get_scalar("step")? as _,
            reward: record.get_scalar("reward")?,
            command: record.get_array1("act")?[0],
            cart_position: record.get_scalar("cart_position")?,
            cart_velocity: record.get_scalar("cart_velocity")?,
            pole_angle: record.get_scalar("pole_angle")?,
            pole_angular_velocity: record.get_scalar("pole_angular_velocity")?,
            halted: record.get_scalar("halted")? == 1.0,
        })
    }
}

fn env_config() -> CartPoleEnvConfig {
    CartPoleEnvConfig::default()
        .episode(EpisodeConfig::new(0.0, 0.05, 0.0))
        .max_steps(Some(MAX_STEPS))
}

fn run(csv_path: &Path) -> Result<f32> {
    let mut env = CartPoleEnv::build(&env_config(), 42)?;
    let mut recorder = BufferedRecorder::new();
    let mut policy = RandomPolicy;

    let returns = util::eval_with_recorder(&mut env, &mut policy, N_EPISODES, &mut recorder)?;
    info!("Returns: {:?}", returns);

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(File::create(csv_path)?);
    for record in recorder.iter() {
        wtr.serialize(CartPoleRecord::try_from(record)?)?;
    }
    wtr.flush()?;

    let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&env_config(), 0, N_EPISODES)?;
    let record = evaluator.evaluate(&mut policy)?;
    let avg_return = record.get_scalar("Episode return")?;
    info!("Average return of the random policy: {}", avg_return);
    Ok(avg_return)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);
    run(Path::new("random_cartpole_eval.csv"))?;
    Ok(())
}
