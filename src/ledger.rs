//! Asynchronous ledger client.
//!
//! The simulation never blocks on the ledger: requests go to a worker
//! thread over a channel, completed outcomes come back through a shared
//! inbox that a system drains once per tick. The backend itself is an
//! injected trait object; [`NullLedger`] keeps the game fully playable
//! offline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use bevy_ecs::prelude::*;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::LedgerError;

/// A confirmed ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub tx_id: String,
}

/// Aggregate stats the backend can report for the menu screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub games_played: u64,
    pub total_score: u64,
    pub high_score: u64,
    pub tokens: u64,
    pub level: u32,
    pub lives: u32,
}

/// A blocking ledger backend. Runs on the worker thread only.
pub trait Ledger: Send {
    fn finalize_score(&mut self, score: u64, coins: u32) -> Result<Receipt, LedgerError>;
    fn claim_quest(&mut self, quest_id: u32) -> Result<Receipt, LedgerError>;
    fn buy_life(&mut self) -> Result<Receipt, LedgerError>;
    fn stats(&mut self) -> Result<LedgerStats, LedgerError>;
}

/// The offline backend: every call reports the ledger as unavailable.
pub struct NullLedger;

impl Ledger for NullLedger {
    fn finalize_score(&mut self, _score: u64, _coins: u32) -> Result<Receipt, LedgerError> {
        Err(LedgerError::Unavailable)
    }

    fn claim_quest(&mut self, _quest_id: u32) -> Result<Receipt, LedgerError> {
        Err(LedgerError::Unavailable)
    }

    fn buy_life(&mut self) -> Result<Receipt, LedgerError> {
        Err(LedgerError::Unavailable)
    }

    fn stats(&mut self) -> Result<LedgerStats, LedgerError> {
        Err(LedgerError::Unavailable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerRequest {
    Finalize { score: u64, coins: u32 },
    ClaimQuest { quest_id: u32 },
    BuyLife,
    Stats,
}

impl LedgerRequest {
    fn name(&self) -> &'static str {
        match self {
            LedgerRequest::Finalize { .. } => "finalize",
            LedgerRequest::ClaimQuest { .. } => "claim_quest",
            LedgerRequest::BuyLife => "buy_life",
            LedgerRequest::Stats => "stats",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LedgerOutcome {
    Finalized(Receipt),
    QuestClaimed(Receipt),
    LifePurchased(Receipt),
    Stats(LedgerStats),
    Failed { request: &'static str, error: LedgerError },
}

/// World-side handle to the ledger worker.
#[derive(Resource)]
pub struct LedgerHandle {
    sender: Mutex<mpsc::Sender<LedgerRequest>>,
    inbox: Arc<Mutex<Vec<LedgerOutcome>>>,
    busy: Arc<AtomicBool>,
}

impl LedgerHandle {
    /// Spawns the worker thread around the given backend.
    pub fn spawn(mut backend: Box<dyn Ledger>) -> Self {
        let (sender, receiver) = mpsc::channel::<LedgerRequest>();
        let inbox = Arc::new(Mutex::new(Vec::new()));
        let busy = Arc::new(AtomicBool::new(false));

        let worker_inbox = Arc::clone(&inbox);
        let worker_busy = Arc::clone(&busy);
        thread::Builder::new()
            .name("ledger".into())
            .spawn(move || {
                while let Ok(request) = receiver.recv() {
                    debug!(request = request.name(), "Ledger request started");
                    let outcome = match request {
                        LedgerRequest::Finalize { score, coins } => backend
                            .finalize_score(score, coins)
                            .map(LedgerOutcome::Finalized),
                        LedgerRequest::ClaimQuest { quest_id } => {
                            backend.claim_quest(quest_id).map(LedgerOutcome::QuestClaimed)
                        }
                        LedgerRequest::BuyLife => backend.buy_life().map(LedgerOutcome::LifePurchased),
                        LedgerRequest::Stats => backend.stats().map(LedgerOutcome::Stats),
                    };
                    let outcome = outcome.unwrap_or_else(|error| LedgerOutcome::Failed {
                        request: request.name(),
                        error,
                    });
                    worker_inbox.lock().push(outcome);
                    worker_busy.store(false, Ordering::Release);
                }
            })
            .expect("could not spawn ledger worker");

        LedgerHandle {
            sender: Mutex::new(sender),
            inbox,
            busy,
        }
    }

    /// Enqueues a request. Fails with [`LedgerError::Busy`] while a prior
    /// request is still in flight, debouncing repeat submissions.
    pub fn submit(&self, request: LedgerRequest) -> Result<(), LedgerError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(LedgerError::Busy);
        }
        if self.sender.lock().send(request).is_err() {
            self.busy.store(false, Ordering::Release);
            warn!("Ledger worker is gone");
            return Err(LedgerError::Transport("worker thread stopped".into()));
        }
        Ok(())
    }

    /// Drains every completed outcome.
    pub fn poll(&self) -> Vec<LedgerOutcome> {
        std::mem::take(&mut *self.inbox.lock())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Checks a run score before it is allowed near the ledger.
pub fn validate_score(score: f64) -> Result<u64, LedgerError> {
    if !score.is_finite() || score <= 0.0 {
        return Err(LedgerError::InvalidScore(score));
    }
    Ok(score.floor() as u64)
}
