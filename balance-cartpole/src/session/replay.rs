use super::{AdvanceResponse, Event, SimulatorStateReport, TrainingService};
use crate::{SessionError, SimulatorInterface};
use anyhow::Result;
use std::{collections::VecDeque, io::Read};

/// A [`TrainingService`] that plays back a fixed list of events.
///
/// Every report received is kept, so the states a simulator would have sent to a
/// real service can be inspected afterwards. When the script is exhausted,
/// [`TrainingService::advance`] fails.
#[derive(Debug, Default)]
pub struct ReplayService {
    events: VecDeque<Event>,
    reports: Vec<SimulatorStateReport>,
    sequence_id: i64,
    session_id: Option<String>,
    n_unregistered: usize,
}

impl ReplayService {
    /// Creates a service playing back `events` in order.
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            sequence_id: 1,
            ..Default::default()
        }
    }

    /// Creates a service from a JSON array of events.
    pub fn from_reader(rdr: impl Read) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_reader(rdr)?;
        Ok(Self::new(events))
    }

    /// Reports received so far.
    pub fn reports(&self) -> &[SimulatorStateReport] {
        &self.reports
    }

    /// Events not yet sent.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// `true` while a session is registered.
    pub fn is_registered(&self) -> bool {
        self.session_id.is_some()
    }

    /// Number of times a session has been deleted.
    pub fn n_unregistered(&self) -> usize {
        self.n_unregistered
    }

    fn check_session(&self, session_id: &str) -> Result<(), SessionError> {
        match &self.session_id {
            Some(id) if id == session_id => Ok(()),
            _ => Err(SessionError::Service(format!(
                "unknown session {}",
                session_id
            ))),
        }
    }
}

impl TrainingService for ReplayService {
    fn register(&mut self, interface: &SimulatorInterface) -> Result<String> {
        if self.session_id.is_some() {
            return Err(SessionError::Service("already registered".to_string()).into());
        }
        let session_id = format!("replay-{}", interface.name);
        self.session_id = Some(session_id.clone());
        Ok(session_id)
    }

    fn advance(
        &mut self,
        session_id: &str,
        report: &SimulatorStateReport,
    ) -> Result<AdvanceResponse> {
        self.check_session(session_id)?;
        self.reports.push(report.clone());
        let event = self
            .events
            .pop_front()
            .ok_or_else(|| SessionError::Service("event script exhausted".to_string()))?;
        self.sequence_id += 1;
        Ok(AdvanceResponse {
            sequence_id: self.sequence_id,
            event,
        })
    }

    fn unregister(&mut self, session_id: &str) -> Result<()> {
        self.check_session(session_id)?;
        self.session_id = None;
        self.n_unregistered += 1;
        Ok(())
    }
}
