use anyhow::Result;
use balance_core::{
    record::{BufferedRecorder, Record, RecordValue},
    util, Act, DefaultEvaluator, Env, Evaluator, Obs, Policy, Step,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug)]
struct CounterObs(usize);

impl Obs for CounterObs {
    fn to_vec(&self) -> Vec<f32> {
        vec![self.0 as f32]
    }
}

#[derive(Clone, Debug)]
struct CounterAct(f32);

impl Act for CounterAct {
    fn to_vec(&self) -> Vec<f32> {
        vec![self.0]
    }
}

/// Terminates after `len + ix` steps, where `ix` is the index given on reset.
struct CounterEnv {
    len: usize,
    extra: usize,
    count: usize,
}

impl Env for CounterEnv {
    type Config = usize;
    type Obs = CounterObs;
    type Act = CounterAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            len: *config,
            extra: 0,
            count: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.count += 1;
        let is_terminated = self.count >= self.len + self.extra;
        let step = Step::new(
            CounterObs(self.count),
            a.clone(),
            a.0,
            is_terminated,
            false,
            (),
            None,
        );
        (step, Record::from_scalar("count", self.count as f32))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.count = 0;
        Ok(CounterObs(0))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = self.reset().ok();
        }
        (step, record)
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.extra = ix;
        self.reset()
    }
}

struct ConstantPolicy(f32);

impl Policy<CounterEnv> for ConstantPolicy {
    fn sample(&mut self, _obs: &CounterObs) -> CounterAct {
        CounterAct(self.0)
    }
}

#[test]
fn test_default_evaluator_averages_episodes() -> Result<()> {
    init();
    let mut evaluator = DefaultEvaluator::<CounterEnv>::new(&3, 0, 3)?;
    let record = evaluator.evaluate(&mut ConstantPolicy(2.0))?;

    // Episode lengths are 3, 4 and 5.
    assert_eq!(record.get_scalar("Episode length")?, 4.0);
    assert_eq!(record.get_scalar("Episode return")?, 8.0);
    Ok(())
}

#[test]
fn test_eval_with_recorder_writes_every_step() -> Result<()> {
    init();
    let mut env = CounterEnv::build(&4, 0)?;
    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(&mut env, &mut ConstantPolicy(0.5), 2, &mut recorder)?;

    assert_eq!(returns, vec![2.0, 2.0]);
    assert_eq!(recorder.len(), 8);

    let last = recorder.iter().last().unwrap();
    assert_eq!(last.get_scalar("episode")?, 1.0);
    assert_eq!(last.get_scalar("step")?, 3.0);
    assert_eq!(last.get_array1("obs")?, vec![3.0]);
    assert_eq!(last.get_array1("act")?, vec![0.5]);
    assert_eq!(last.get("count"), Some(&RecordValue::Scalar(4.0)));
    Ok(())
}

#[test]
fn test_step_with_reset_sets_init_obs() -> Result<()> {
    let mut env = CounterEnv::build(&1, 0)?;
    env.reset()?;
    let (step, _) = env.step_with_reset(&CounterAct(1.0));
    assert!(step.is_done());
    assert!(matches!(step.init_obs, Some(CounterObs(0))));
    Ok(())
}
