// in-memory ledgers for tests

use super::{Ledger, LedgerError, LedgerProvider};
use async_trait::async_trait;
use common::model::channel::Channel;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Failure {
    Open,
    Read,
    Append,
}

#[derive(Default)]
struct State {
    sheets: HashMap<Channel, Vec<Vec<String>>>,
    failures: HashSet<(Channel, Failure)>,
    opens: HashMap<Channel, usize>,
}

#[derive(Clone, Default)]
pub struct MemoryLedgers {
    state: Arc<Mutex<State>>,
}

struct MemorySheet {
    channel: Channel,
    state: Arc<Mutex<State>>,
}

impl MemoryLedgers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, channel: Channel, rows: Vec<Vec<String>>) {
        self.state.lock().unwrap().sheets.insert(channel, rows);
    }

    pub fn fail(&self, channel: Channel, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((channel, failure));
    }

    pub fn rows(&self, channel: Channel) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .sheets
            .get(&channel)
            .cloned()
            .unwrap_or_default()
    }

    pub fn opens(&self, channel: Channel) -> usize {
        self.state
            .lock()
            .unwrap()
            .opens
            .get(&channel)
            .copied()
            .unwrap_or(0)
    }
}

fn unavailable(channel: Channel, failure: Failure) -> LedgerError {
    LedgerError::Api {
        status: 503,
        body: format!("{:?} unavailable for {}", failure, channel.id()),
    }
}

#[async_trait]
impl LedgerProvider for MemoryLedgers {
    async fn open(&self, channel: Channel) -> Result<Box<dyn Ledger>, LedgerError> {
        let mut state = self.state.lock().unwrap();
        *state.opens.entry(channel).or_default() += 1;
        if state.failures.contains(&(channel, Failure::Open)) {
            return Err(unavailable(channel, Failure::Open));
        }
        Ok(Box::new(MemorySheet {
            channel,
            state: self.state.clone(),
        }))
    }
}

#[async_trait]
impl Ledger for MemorySheet {
    async fn read_column(&self, index: usize) -> Result<Vec<String>, LedgerError> {
        let state = self.state.lock().unwrap();
        if state.failures.contains(&(self.channel, Failure::Read)) {
            return Err(unavailable(self.channel, Failure::Read));
        }
        Ok(state
            .sheets
            .get(&self.channel)
            .map(|rows| {
                rows.iter()
                    .map(|row| row.get(index).cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<usize, LedgerError> {
        let mut state = self.state.lock().unwrap();
        if state.failures.contains(&(self.channel, Failure::Append)) {
            return Err(unavailable(self.channel, Failure::Append));
        }
        let count = rows.len();
        state.sheets.entry(self.channel).or_default().extend(rows);
        Ok(count)
    }

    fn name(&self) -> &str {
        self.channel.sheet_name()
    }
}
