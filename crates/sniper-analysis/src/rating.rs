//! Discrete ratings derived from scores.

use crate::params::{MOMENTUM_RATING_CUTOFFS, QUALITY_RATING_CUTOFFS};
use crate::scoring::Scores;
use serde::{Deserialize, Serialize};

/// Quality, momentum and combined star ratings, each 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub quality_rating: u8,
    pub momentum_rating: u8,
    pub stars: u8,
}

impl Ratings {
    /// Rate a pair of scores.
    pub fn from_scores(scores: &Scores) -> Self {
        let quality_rating = quality_rating(scores.quality_score);
        let momentum_rating = momentum_rating(scores.momentum_score);
        Self {
            quality_rating,
            momentum_rating,
            stars: star_rating(quality_rating, momentum_rating),
        }
    }
}

fn rating_from_cutoffs(score: f64, cutoffs: &[f64; 4]) -> u8 {
    cutoffs
        .iter()
        .position(|&cutoff| score >= cutoff)
        .map_or(1, |i| 5 - i as u8)
}

/// Quality score to 1-5: >=16, >=12, >=8, >=5, else 1.
pub fn quality_rating(score: f64) -> u8 {
    rating_from_cutoffs(score, &QUALITY_RATING_CUTOFFS)
}

/// Momentum score to 1-5: >=10, >=7, >=4, >=2, else 1.
pub fn momentum_rating(score: f64) -> u8 {
    rating_from_cutoffs(score, &MOMENTUM_RATING_CUTOFFS)
}

/// Combined rating; the first matching row of the table wins.
pub fn star_rating(quality: u8, momentum: u8) -> u8 {
    match (quality, momentum) {
        (q, m) if q >= 4 && m >= 4 => 5,
        (q, m) if q >= 4 && m >= 3 => 4,
        (q, m) if q >= 3 && m >= 3 => 3,
        (q, m) if q >= 2 || m >= 2 => 2,
        _ => 1,
    }
}
