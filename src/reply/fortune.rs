//! Fortune draw.

use rand::Rng;

/// Outcome labels ranked best to worst.
pub const FORTUNES: [&str; 10] = [
    "大吉", "中吉", "小吉", "末吉", "吉", "凶", "末凶", "小凶", "中凶", "大凶",
];

/// Text substring that triggers a fortune draw.
pub const FORTUNE_KEYWORD: &str = "おみくじ";

/// Label for a drawn index.
///
/// # Panics
///
/// Panics if `draw` is outside `0..FORTUNES.len()`; the random source
/// must never produce such a value.
#[must_use]
pub fn fortune_label(draw: usize) -> &'static str {
    FORTUNES[draw]
}

/// Draw one fortune from `rng`.
#[must_use]
pub fn fortune<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    fortune_label(rng.gen_range(0..FORTUNES.len()))
}
