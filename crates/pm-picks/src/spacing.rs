use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// A spacing survives when `|s - median| <= mad_factor * MAD`.
    pub mad_factor: i32,
    /// Lower bound on the acceptance band. `0` keeps the strict behavior
    /// where a zero MAD accepts only spacings equal to the median.
    pub min_mad_threshold: i32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            mad_factor: 2,
            min_mad_threshold: 0,
        }
    }
}

/// Why no lattice could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingShortfall {
    /// Fewer than two tip positions.
    TooFewPositions,
    /// Every spacing was rejected, or the surviving mean is zero.
    NoUsableSpacing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpacingEstimate {
    /// Truncated mean of the accepted spacings; `0` when degraded.
    pub average_spacing: i32,
    pub median: i32,
    pub mad: i32,
    /// Consecutive differences of the sorted positions.
    pub spacings: Vec<i32>,
    /// Spacings inside the MAD band, in input order.
    pub filtered_spacings: Vec<i32>,
    /// Cutting-line positions, ascending.
    pub lattice: Vec<i32>,
    pub shortfall: Option<SpacingShortfall>,
}

#[derive(Debug, Clone, Default)]
pub struct SpacingEstimator {
    config: SpacingConfig,
}

impl SpacingEstimator {
    pub fn new(config: SpacingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpacingConfig {
        &self.config
    }

    /// Robust spacing of `positions` and the lattice over `[0, width)`.
    ///
    /// The lattice is anchored at the sorted position with index `len / 2`
    /// and steps by the average spacing in both directions.
    pub fn estimate(&self, positions: &[i32], width: i32) -> SpacingEstimate {
        let mut xs = positions.to_vec();
        xs.sort_unstable();

        if xs.len() < 2 {
            tracing::warn!("insufficient spacing data: {} tip position(s)", xs.len());
            return SpacingEstimate {
                shortfall: Some(SpacingShortfall::TooFewPositions),
                ..SpacingEstimate::default()
            };
        }

        let spacings: Vec<i32> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let med = median(&spacings).unwrap_or(0);
        let deviations: Vec<i32> = spacings.iter().map(|s| (s - med).abs()).collect();
        let mad = median(&deviations).unwrap_or(0);

        let band = self
            .config
            .mad_factor
            .saturating_mul(mad)
            .max(self.config.min_mad_threshold);
        let filtered: Vec<i32> = spacings
            .iter()
            .copied()
            .filter(|s| (s - med).abs() <= band)
            .collect();

        let average = if filtered.is_empty() {
            0
        } else {
            let sum: i64 = filtered.iter().map(|&s| i64::from(s)).sum();
            (sum / filtered.len() as i64) as i32
        };

        let (lattice, shortfall) = if average > 0 {
            (build_lattice(xs[xs.len() / 2], average, width), None)
        } else {
            tracing::warn!("insufficient spacing data: no spacing survived the MAD filter");
            (Vec::new(), Some(SpacingShortfall::NoUsableSpacing))
        };

        tracing::debug!(
            "spacing: median {med}, MAD {mad}, kept {}/{}, average {average}",
            filtered.len(),
            spacings.len()
        );

        SpacingEstimate {
            average_spacing: average,
            median: med,
            mad,
            spacings,
            filtered_spacings: filtered,
            lattice,
            shortfall,
        }
    }
}

fn build_lattice(anchor: i32, step: i32, width: i32) -> Vec<i32> {
    let mut lattice = Vec::new();
    let mut x = anchor - step;
    while x >= 0 {
        lattice.push(x);
        x -= step;
    }
    lattice.reverse();

    let mut x = anchor;
    while x < width {
        lattice.push(x);
        let Some(next) = x.checked_add(step) else {
            break;
        };
        x = next;
    }
    lattice
}

/// Median with the truncated mean of the two middle values for even counts.
pub fn median(values: &[i32]) -> Option<i32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 0 {
        let sum = i64::from(sorted[n / 2 - 1]) + i64::from(sorted[n / 2]);
        Some((sum / 2) as i32)
    } else {
        Some(sorted[n / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::{SpacingConfig, SpacingEstimator, SpacingShortfall, median};

    #[test]
    fn median_conventions() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[7]), Some(7));
        assert_eq!(median(&[3, 1, 2]), Some(2));
        assert_eq!(median(&[1, 2, 4, 10]), Some(3));
        assert_eq!(median(&[10, 11]), Some(10));
    }

    #[test]
    fn uniform_positions_give_full_lattice() {
        let est = SpacingEstimator::default().estimate(&[40, 10, 30, 20], 50);

        assert_eq!(est.spacings, vec![10, 10, 10]);
        assert_eq!(est.median, 10);
        assert_eq!(est.mad, 0);
        assert_eq!(est.filtered_spacings, vec![10, 10, 10]);
        assert_eq!(est.average_spacing, 10);
        assert_eq!(est.lattice, vec![0, 10, 20, 30, 40]);
        assert_eq!(est.shortfall, None);
    }

    #[test]
    fn outlier_spacing_is_rejected() {
        let est = SpacingEstimator::default().estimate(&[0, 10, 20, 30, 130], 200);

        assert_eq!(est.spacings, vec![10, 10, 10, 100]);
        assert_eq!(est.filtered_spacings, vec![10, 10, 10]);
        assert_eq!(est.average_spacing, 10);
        // Anchor is the sorted element at index 2.
        assert!(est.lattice.contains(&20));
        assert_eq!(est.lattice.first(), Some(&0));
        assert_eq!(est.lattice.last(), Some(&190));
        assert!(est.lattice.windows(2).all(|w| w[1] - w[0] == 10));
    }

    #[test]
    fn too_few_positions_degrade_to_no_lattice() {
        for input in [&[][..], &[42][..]] {
            let est = SpacingEstimator::default().estimate(input, 1000);
            assert_eq!(est.average_spacing, 0);
            assert!(est.lattice.is_empty());
            assert_eq!(est.shortfall, Some(SpacingShortfall::TooFewPositions));
        }
    }

    #[test]
    fn duplicate_positions_give_zero_spacing_and_no_lattice() {
        let est = SpacingEstimator::default().estimate(&[5, 5, 5], 100);
        assert_eq!(est.average_spacing, 0);
        assert!(est.lattice.is_empty());
        assert_eq!(est.shortfall, Some(SpacingShortfall::NoUsableSpacing));
    }

    #[test]
    fn zero_mad_is_strict_unless_floored() {
        // Spacings [10, 10, 10, 11]: median 10, MAD 0.
        let xs = [0, 10, 20, 30, 41];
        let strict = SpacingEstimator::default().estimate(&xs, 100);
        assert_eq!(strict.filtered_spacings, vec![10, 10, 10]);

        let floored = SpacingEstimator::new(SpacingConfig {
            min_mad_threshold: 1,
            ..SpacingConfig::default()
        })
        .estimate(&xs, 100);
        assert_eq!(floored.filtered_spacings, vec![10, 10, 10, 11]);
        assert_eq!(floored.average_spacing, 10);
    }

    #[test]
    fn lattice_stays_inside_frame() {
        let est = SpacingEstimator::default().estimate(&[100, 400, 700], 1000);
        assert_eq!(est.average_spacing, 300);
        assert_eq!(est.lattice, vec![100, 400, 700]);
        assert!(est.lattice.iter().all(|&x| (0..1000).contains(&x)));
    }
}
