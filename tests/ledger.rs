use std::thread;
use std::time::{Duration, Instant};

use speculoos::prelude::*;

use corgi_run::error::LedgerError;
use corgi_run::ledger::{
    validate_score, Ledger, LedgerHandle, LedgerOutcome, LedgerRequest, LedgerStats, NullLedger, Receipt,
};

#[test]
fn test_score_validation_rejects_junk() {
    assert_that(&matches!(validate_score(0.0), Err(LedgerError::InvalidScore(_)))).is_true();
    assert_that(&matches!(validate_score(-12.0), Err(LedgerError::InvalidScore(_)))).is_true();
    assert_that(&matches!(validate_score(f64::NAN), Err(LedgerError::InvalidScore(_)))).is_true();
    assert_that(&matches!(validate_score(f64::INFINITY), Err(LedgerError::InvalidScore(_)))).is_true();

    assert_that(&validate_score(12.7).unwrap()).is_equal_to(12);
    assert_that(&validate_score(0.5).unwrap()).is_equal_to(0);
}

/// Polls the handle until an outcome lands or the deadline passes.
fn wait_for_outcome(handle: &LedgerHandle) -> LedgerOutcome {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(outcome) = handle.poll().into_iter().next() {
            return outcome;
        }
        assert_that(&(Instant::now() < deadline)).is_true();
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_null_backend_reports_unavailable() {
    let handle = LedgerHandle::spawn(Box::new(NullLedger));

    handle
        .submit(LedgerRequest::Finalize { score: 100, coins: 3 })
        .expect("Submit should be accepted");

    let outcome = wait_for_outcome(&handle);
    assert_that(&matches!(
        outcome,
        LedgerOutcome::Failed {
            request: "finalize",
            error: LedgerError::Unavailable,
        }
    ))
    .is_true();
    assert_that(&handle.is_busy()).is_false();
}

/// A backend that takes a while, for exercising the busy debounce.
struct SlowLedger;

impl Ledger for SlowLedger {
    fn finalize_score(&mut self, score: u64, _coins: u32) -> Result<Receipt, LedgerError> {
        thread::sleep(Duration::from_millis(100));
        Ok(Receipt {
            tx_id: format!("tx-{score}"),
        })
    }

    fn claim_quest(&mut self, _quest_id: u32) -> Result<Receipt, LedgerError> {
        Err(LedgerError::Rejected("no quests".into()))
    }

    fn buy_life(&mut self) -> Result<Receipt, LedgerError> {
        Ok(Receipt { tx_id: "life".into() })
    }

    fn stats(&mut self) -> Result<LedgerStats, LedgerError> {
        Ok(LedgerStats {
            games_played: 12,
            total_score: 48_000,
            high_score: 9000,
            tokens: 310,
            level: 3,
            lives: 2,
        })
    }
}

#[test]
fn test_in_flight_requests_debounce_resubmission() {
    let handle = LedgerHandle::spawn(Box::new(SlowLedger));

    handle
        .submit(LedgerRequest::Finalize { score: 55, coins: 0 })
        .expect("First submit should be accepted");
    assert_that(&handle.is_busy()).is_true();

    // Mashing the submit key while the worker is out: refused, not queued.
    let second = handle.submit(LedgerRequest::Finalize { score: 55, coins: 0 });
    assert_that(&matches!(second, Err(LedgerError::Busy))).is_true();

    let outcome = wait_for_outcome(&handle);
    assert_that(&outcome).is_equal_to(LedgerOutcome::Finalized(Receipt { tx_id: "tx-55".into() }));

    // Idle again: a new request goes through.
    handle.submit(LedgerRequest::Stats).expect("Submit should be accepted");
    let outcome = wait_for_outcome(&handle);
    let stats = match outcome {
        LedgerOutcome::Stats(stats) => stats,
        other => panic!("expected a stats outcome, got {other:?}"),
    };
    assert_that(&stats.games_played).is_equal_to(12);
    assert_that(&stats.total_score).is_equal_to(48_000);
    assert_that(&stats.high_score).is_equal_to(9000);
    assert_that(&stats.tokens).is_equal_to(310);
    assert_that(&stats.level).is_equal_to(3);
    assert_that(&stats.lives).is_equal_to(2);
}
