//! World-side ledger plumbing: command handling and outcome polling.
//!
//! Submissions are fire-and-forget; the poll system surfaces outcomes as
//! HUD notifications so a failed or absent backend never interrupts play.

use bevy_ecs::prelude::*;
use tracing::{info, warn};

use crate::error::ProfileError;
use crate::events::{GameCommand, GameEvent};
use crate::hud;
use crate::ledger::{validate_score, LedgerHandle, LedgerOutcome, LedgerRequest};
use crate::profile::{self, Profile, ProfilePath};
use crate::session::GameSession;
use crate::systems::components::{Notification, PendingReset};
use crate::systems::stage::GameStage;

/// Handles score submission and life purchases from the game-over screen.
#[allow(clippy::too_many_arguments)]
pub fn ledger_command_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    session: Res<GameSession>,
    mut profile: ResMut<Profile>,
    path: Res<ProfilePath>,
    handle: Res<LedgerHandle>,
    mut notification: ResMut<Notification>,
    mut pending: ResMut<PendingReset>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else { continue };
        match command {
            GameCommand::SubmitScore if matches!(*stage, GameStage::GameOver) => {
                match validate_score(session.score).and_then(|score| {
                    handle
                        .submit(LedgerRequest::Finalize {
                            score,
                            coins: session.coins,
                        })
                        .map(|_| score)
                }) {
                    Ok(score) => {
                        info!(score, "Score submitted to ledger");
                        notification.show("submitting score...");
                    }
                    Err(e) => {
                        warn!(error = %e, "Score submission refused");
                        notification.show(e.to_string());
                    }
                }
            }
            GameCommand::BuyLife if matches!(*stage, GameStage::GameOver) => {
                match profile.pay_for_life() {
                    Ok(()) => {
                        if let Err(e) = profile::save(&profile, &path) {
                            warn!(error = %e, "Could not persist profile");
                        }
                        *pending = PendingReset::Revive;
                        notification.show("revived!");
                    }
                    // No coin balance: the ledger may still hold a spare life.
                    Err(ProfileError::InsufficientCoins { .. }) => match handle.submit(LedgerRequest::BuyLife) {
                        Ok(()) => notification.show("buying a life..."),
                        Err(e) => notification.show(e.to_string()),
                    },
                    Err(e) => notification.show(e.to_string()),
                }
            }
            GameCommand::GoHome => {
                // Refresh menu stats opportunistically; a busy worker is fine.
                let _ = handle.submit(LedgerRequest::Stats);
            }
            _ => {}
        }
    }
}

/// Drains completed ledger outcomes into notifications (and revives).
pub fn ledger_poll_system(
    handle: Res<LedgerHandle>,
    stage: Res<GameStage>,
    mut notification: ResMut<Notification>,
    mut pending: ResMut<PendingReset>,
) {
    for outcome in handle.poll() {
        match outcome {
            LedgerOutcome::Finalized(receipt) => {
                info!(tx_id = %receipt.tx_id, "Score recorded on ledger");
                notification.show(format!("score recorded ({})", receipt.tx_id));
            }
            LedgerOutcome::QuestClaimed(receipt) => {
                info!(tx_id = %receipt.tx_id, "Quest reward claimed");
                notification.show("quest reward claimed");
            }
            LedgerOutcome::LifePurchased(receipt) => {
                info!(tx_id = %receipt.tx_id, "Life purchased on ledger");
                if matches!(*stage, GameStage::GameOver) {
                    *pending = PendingReset::Revive;
                    notification.show("revived!");
                }
            }
            LedgerOutcome::Stats(stats) => {
                notification.show(format!(
                    "ledger: {} runs, {} total, best {}, {} tokens, lvl {}, {} lives",
                    hud::format_stat(stats.games_played),
                    hud::format_stat(stats.total_score),
                    hud::format_stat(stats.high_score),
                    hud::format_stat(stats.tokens),
                    stats.level,
                    stats.lives,
                ));
            }
            LedgerOutcome::Failed { request, error } => {
                warn!(request, error = %error, "Ledger request failed");
                notification.show(format!("{request}: {error}"));
            }
        }
    }
}
