//! HUD text formatting.

use thousands::Separable;

/// Scores display floor-truncated and zero-padded to four digits.
pub fn format_score(score: f64) -> String {
    format!("{:04}", score.max(0.0).floor() as u64)
}

pub fn format_coins(coins: u32) -> String {
    format!("{coins:04}")
}

/// Large lifetime stats get digit separators for the game-over summary.
pub fn format_stat(n: u64) -> String {
    n.separate_with_commas()
}

/// The window-title HUD line rendered every frame.
pub fn title_line(score: f64, coins: u32, paused: bool) -> String {
    let base = format!(
        "corgi-run  |  score {}  coins {}",
        format_score(score),
        format_coins(coins)
    );
    if paused {
        format!("{base}  [paused]")
    } else {
        base
    }
}
