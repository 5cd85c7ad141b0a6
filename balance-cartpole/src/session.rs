//! Event loop connecting a [`CartPoleModel`] to a remote training service.
//!
//! The simulator registers itself, then repeatedly reports its state and receives
//! the next event:
//!
//! * `EpisodeStart` resets the engine with the given initial conditions,
//! * `EpisodeStep` advances the engine with the given command,
//! * `Idle` waits for the given number of seconds,
//! * `EpisodeFinish` only marks the end of an episode,
//! * `Unregister` deletes the session and ends the loop.
//!
//! Every report carries `halted`, i.e. [`CartPoleModel::is_terminal`]. The service
//! is expected to finish the episode once the simulator is halted; the session
//! keeps stepping if it does not.
//!
//! How the service is reached is up to the [`TrainingService`] implementation.
//! [`ReplayService`] plays back a scripted list of events.
mod replay;
use crate::{
    Action, CartPoleModel, EpisodeConfig, NoiseSource, SessionError, SimulationState,
    SimulatorInterface,
};
use anyhow::Result;
use balance_core::record::{Record, RecordValue, Recorder};
use log::{debug, info, warn};
pub use replay::ReplayService;
use serde::{Deserialize, Serialize};
use std::{thread, time::Duration};

/// Event sent by the training service.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(tag = "type")]
pub enum Event {
    /// Nothing to do; ask again after `callback_time` seconds.
    Idle {
        /// Seconds to wait.
        callback_time: f64,
    },

    /// Start an episode.
    EpisodeStart {
        /// Initial conditions.
        #[serde(default)]
        config: EpisodeConfig,
    },

    /// Advance the episode by one tick.
    EpisodeStep {
        /// Control input.
        #[serde(default)]
        action: Action,
    },

    /// The episode has ended.
    EpisodeFinish,

    /// The session is closed by the service.
    Unregister,

    /// An event this simulator does not handle. Ignored.
    #[serde(other)]
    Unknown,
}

impl Event {
    /// Name of the event type.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Idle { .. } => "Idle",
            Event::EpisodeStart { .. } => "EpisodeStart",
            Event::EpisodeStep { .. } => "EpisodeStep",
            Event::EpisodeFinish => "EpisodeFinish",
            Event::Unregister => "Unregister",
            Event::Unknown => "Unknown",
        }
    }
}

/// State reported to the service before each event.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SimulatorStateReport {
    /// Sequence id of the last event received, 1 before the first one.
    pub sequence_id: i64,

    /// State of the engine.
    pub state: SimulationState,

    /// `true` if the pole has fallen.
    pub halted: bool,
}

/// Reply of the service to a report.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct AdvanceResponse {
    /// Sequence id to send with the next report.
    pub sequence_id: i64,

    /// What the simulator has to do next.
    pub event: Event,
}

/// A remote training service.
pub trait TrainingService {
    /// Registers the simulator and returns the id of the created session.
    fn register(&mut self, interface: &SimulatorInterface) -> Result<String>;

    /// Reports the state of the simulator and receives the next event.
    fn advance(&mut self, session_id: &str, report: &SimulatorStateReport)
        -> Result<AdvanceResponse>;

    /// Deletes the session.
    fn unregister(&mut self, session_id: &str) -> Result<()>;
}

/// Counts of what happened in a session.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct SessionSummary {
    /// Number of `EpisodeStart` events.
    pub episodes: usize,

    /// Number of `EpisodeStep` events.
    pub steps: usize,

    /// Number of `Idle` events.
    pub idles: usize,
}

/// Runs a [`CartPoleModel`] against a [`TrainingService`].
pub struct SimulatorSession<S, N>
where
    S: TrainingService,
    N: NoiseSource,
{
    service: S,
    model: CartPoleModel<N>,
    interface: SimulatorInterface,
}

impl<S, N> SimulatorSession<S, N>
where
    S: TrainingService,
    N: NoiseSource,
{
    /// Creates a session. Nothing is sent until [`SimulatorSession::run`].
    pub fn new(service: S, model: CartPoleModel<N>, interface: SimulatorInterface) -> Self {
        Self {
            service,
            model,
            interface,
        }
    }

    /// The engine driven by the session.
    pub fn model(&self) -> &CartPoleModel<N> {
        &self.model
    }

    /// The training service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Consumes the session and returns the training service.
    pub fn into_service(self) -> S {
        self.service
    }

    /// Registers the simulator and processes events until the service unregisters it.
    ///
    /// Each report and the event received for it are written to `recorder`, with the
    /// state fields, `"sequence_id"` and `"event"`.
    ///
    /// # Errors
    ///
    /// Returns the first error of the service, or an error for an `Idle` wait that
    /// does not fit a [`Duration`]. The session is unregistered before the error is
    /// returned, unless the failing request was the unregistration itself.
    pub fn run<R: Recorder>(&mut self, recorder: &mut R) -> Result<SessionSummary> {
        self.interface.validate()?;
        let session_id = self.service.register(&self.interface)?;
        info!(
            "Registered simulator {:?} as session {}",
            self.interface.name, session_id
        );

        match self.process_events(&session_id, recorder) {
            Ok(summary) => {
                // Requested by the service, so a failure here is not retried.
                self.service.unregister(&session_id)?;
                info!("Unregistered simulator");
                Ok(summary)
            }
            Err(err) => {
                if let Err(e) = self.service.unregister(&session_id) {
                    warn!("Failed to unregister session {}: {}", session_id, e);
                }
                info!("Unregistered simulator because: {}", err);
                Err(err)
            }
        }
    }

    fn process_events<R: Recorder>(
        &mut self,
        session_id: &str,
        recorder: &mut R,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut sequence_id = 1;

        loop {
            let report = SimulatorStateReport {
                sequence_id,
                state: self.model.observe(),
                halted: self.model.is_terminal(),
            };
            let response = self.service.advance(session_id, &report)?;
            sequence_id = response.sequence_id;
            debug!("[{}] Last event: {}", sequence_id, response.event.name());

            let record = report.state.to_record(report.halted).merge(Record::from_slice(&[
                ("sequence_id", RecordValue::Scalar(sequence_id as f32)),
                (
                    "event",
                    RecordValue::String(response.event.name().to_string()),
                ),
            ]));
            recorder.write(record);

            match response.event {
                Event::Idle { callback_time } => {
                    summary.idles += 1;
                    if callback_time > 0.0 {
                        let wait = Duration::try_from_secs_f64(callback_time).map_err(|e| {
                            SessionError::Service(format!(
                                "invalid idle callback time {}: {}",
                                callback_time, e
                            ))
                        })?;
                        thread::sleep(wait);
                    }
                }
                Event::EpisodeStart { config } => {
                    summary.episodes += 1;
                    info!("Episode {} starting with {:?}", summary.episodes, config);
                    self.model.reset(&config);
                }
                Event::EpisodeStep { action } => {
                    if report.halted {
                        warn!("Stepping a halted simulator");
                    }
                    summary.steps += 1;
                    self.model.step(action.command);
                }
                Event::EpisodeFinish => {
                    info!("Episode {} finishing", summary.episodes);
                }
                Event::Unregister => return Ok(summary),
                Event::Unknown => {}
            }
        }
    }
}
