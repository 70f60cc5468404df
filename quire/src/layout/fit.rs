// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::BoundedLayout;
use crate::metrics::FontMetrics;
use crate::style::Brush;

/// Scale attempts are abandoned after this many halvings.
const MAX_ITERATIONS: usize = 20;

/// Precision of the search.
const SCALE_EPSILON: f64 = 0.05;

/// A fitting scale leaving less free height than this is accepted early.
const HEIGHT_SLACK: f64 = 1.0;

/// Result of [`BoundedLayout::scale_to_fit`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FitOutcome {
    /// The text fits at `scale`.
    Fitted {
        /// The font scale the layout was left at.
        scale: f64,
    },
    /// No scale tried made the text fit; the layout was left at the
    /// smallest.
    Failed {
        /// The font scale the layout was left at.
        scale: f64,
    },
}

impl FitOutcome {
    /// The font scale the layout was left at.
    pub fn scale(self) -> f64 {
        match self {
            Self::Fitted { scale } | Self::Failed { scale } => scale,
        }
    }

    /// Whether the text fits.
    pub fn is_fitted(self) -> bool {
        matches!(self, Self::Fitted { .. })
    }
}

impl<B: Brush, M: FontMetrics<B>> BoundedLayout<B, M> {
    /// Finds the largest font scale, at most 1, at which the text fits the
    /// layout box, and leaves the layout at that scale.
    ///
    /// Scales are bisected, so the result is within a few percent of the
    /// largest fitting scale.
    pub fn scale_to_fit(&mut self) -> FitOutcome {
        self.set_font_scale(1.0);
        if !self.is_out_of_bounds() {
            return FitOutcome::Fitted { scale: 1.0 };
        }

        let (mut low, mut high) = (0.0_f64, 1.0_f64);
        let mut fitted = None;
        let mut smallest = 1.0_f64;
        for _ in 0..MAX_ITERATIONS {
            if high - low < SCALE_EPSILON {
                break;
            }
            let scale = (low + high) * 0.5;
            self.set_font_scale(scale);
            smallest = smallest.min(scale);
            if self.is_out_of_bounds() {
                high = scale;
            } else {
                fitted = Some(scale);
                low = scale;
                if self.config.height() - self.pref_height() < HEIGHT_SLACK {
                    break;
                }
            }
        }

        match fitted {
            Some(scale) => {
                self.set_font_scale(scale);
                log::debug!("text fits at scale {scale}");
                FitOutcome::Fitted { scale }
            }
            None => {
                log::warn!("text does not fit at any scale, keeping {smallest}");
                self.set_font_scale(smallest);
                FitOutcome::Failed { scale: smallest }
            }
        }
    }
}
