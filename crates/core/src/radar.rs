//! Radar chart geometry for the per-dimension scores.
//!
//! Produces the normalized polygon a renderer draws from; axis `i` sits at
//! angle `2*PI*i/10 - PI/2`, so the first dimension points straight up.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::model::DIMENSION_COUNT;
use crate::scoring::{DimensionScores, ScoringSettings};

/// A chart vertex on the unit circle, chart center at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPoint {
    pub x: f64,
    pub y: f64,
}

impl RadarPoint {
    /// Distance from the chart center.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Maps a dimension score onto `[0, 1]` across the score range, clamped.
#[must_use]
pub fn normalized(score: i32, settings: &ScoringSettings) -> f64 {
    let span = settings.max_score() - settings.min_score();
    if span <= 0 {
        return 0.0;
    }
    let fraction = f64::from(score - settings.min_score()) / f64::from(span);
    fraction.clamp(0.0, 1.0)
}

/// A score as a bar-width percentage, `[0, 100]`.
#[must_use]
pub fn percentage(score: i32, settings: &ScoringSettings) -> f64 {
    normalized(score, settings) * 100.0
}

/// Polygon vertices for all dimensions, in canonical axis order.
#[must_use]
pub fn chart_points(scores: &DimensionScores, settings: &ScoringSettings) -> Vec<RadarPoint> {
    scores
        .iter()
        .enumerate()
        .map(|(i, (_, score))| {
            let angle = TAU * i as f64 / DIMENSION_COUNT as f64 - FRAC_PI_2;
            let radius = normalized(score, settings);
            RadarPoint {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect()
}
