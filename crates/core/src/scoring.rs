//! Scoring module - flat line scoring and level progression
//!
//! - Every cleared line is worth the same; there is no multi-line multiplier.
//! - Levels advance every 10 lines, starting from level 1.
//! - Normal gravity speeds up by 40ms per level down to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORE,
};

/// Points for a lock that cleared `lines` rows.
pub fn calculate_line_score(lines: u32) -> u32 {
    lines.saturating_mul(LINE_SCORE)
}

/// Level reached after clearing `total_lines` in the session.
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Normal gravity interval for a level.
///
/// ```
/// use ultra_tetris_core::scoring::get_drop_interval_ms;
///
/// assert_eq!(get_drop_interval_ms(1), 500);
/// assert_eq!(get_drop_interval_ms(2), 460);
/// assert_eq!(get_drop_interval_ms(50), 100);
/// ```
pub fn get_drop_interval_ms(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    BASE_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}
