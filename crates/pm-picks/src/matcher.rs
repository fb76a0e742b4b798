use pm_core::Point2i;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Column block width for the raw-tip scan, working pixels.
    pub block_width_px: i32,
    /// Pairs must be strictly closer than this.
    pub max_distance_px: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            block_width_px: 500,
            max_distance_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipMatch {
    pub raw: Point2i,
    pub reference: Point2i,
    /// Index of `reference` in the reference slice.
    pub reference_index: usize,
    pub distance: f64,
}

/// Greedy nearest-neighbor pairing of raw tips with a reference set.
///
/// Raw tips are visited in input order. Each takes the nearest reference
/// point not already taken whose distance is strictly below the cutoff;
/// among equally near references the first one wins. The outcome depends on
/// the raw-tip order and is not a minimum-cost assignment.
#[derive(Debug, Clone, Default)]
pub struct TipMatcher {
    config: MatchConfig,
}

impl TipMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn match_tips(&self, raw: &[Point2i], reference: &[Point2i]) -> Vec<TipMatch> {
        let mut used = vec![false; reference.len()];
        let mut out = Vec::new();

        for &tip in raw {
            let mut best: Option<(usize, f64)> = None;
            let mut best_dist = self.config.max_distance_px;
            for (i, &r) in reference.iter().enumerate() {
                if used[i] {
                    continue;
                }
                let d = tip.distance(r);
                if d < best_dist {
                    best_dist = d;
                    best = Some((i, d));
                }
            }

            if let Some((i, distance)) = best {
                used[i] = true;
                out.push(TipMatch {
                    raw: tip,
                    reference: reference[i],
                    reference_index: i,
                    distance,
                });
            }
        }

        out
    }
}
