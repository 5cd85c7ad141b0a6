//! Drives the simulator from a scripted training service and prints the reported
//! states as JSON lines.
use anyhow::Result;
use balance_cartpole::{
    Action, CartPoleModel, EpisodeConfig, Event, PhysicalConstants, ReplayService,
    RngNoise, SimulatorInterface, SimulatorSession,
};
use balance_core::record::NullRecorder;
use std::path::Path;

/// A script with `n_episodes` episodes, each stepping a bang-bang controller for
/// `n_steps` ticks.
fn script(n_episodes: usize, n_steps: usize) -> Vec<Event> {
    let mut events = vec![Event::Idle { callback_time: 0.0 }];
    for i in 0..n_episodes {
        events.push(Event::EpisodeStart {
            config: EpisodeConfig::new(0.0, 0.02 * i as f64, 0.0),
        });
        for t in 0..n_steps {
            let command = if (t / 5) % 2 == 0 { 1.0 } else { -1.0 };
            events.push(Event::EpisodeStep {
                action: Action { command },
            });
        }
        events.push(Event::EpisodeFinish);
    }
    events.push(Event::Unregister);
    events
}

fn run(n_episodes: usize, n_steps: usize) -> Result<ReplayService> {
    let interface_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("cartpole_interface.json");
    let interface = SimulatorInterface::load(interface_path)?;
    let model = CartPoleModel::new(PhysicalConstants::default(), RngNoise::seeded(42));

    let mut session = SimulatorSession::new(
        ReplayService::new(script(n_episodes, n_steps)),
        model,
        interface,
    );
    session.run(&mut NullRecorder::default())?;
    Ok(session.into_service())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let service = run(3, 50)?;
    for report in service.reports() {
        println!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}
