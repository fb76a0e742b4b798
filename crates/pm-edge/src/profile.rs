use core::ops::Range;

use pm_core::ImageView;

/// Per-row sum of absolute vertical-gradient magnitude.
///
/// Invariant: one entry per row of the source frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeEnergyProfile {
    energy: Vec<f32>,
}

impl EdgeEnergyProfile {
    pub fn from_vertical_gradient(gy: &ImageView<'_, f32>) -> Self {
        let energy = gy
            .rows()
            .map(|row| row.iter().map(|v| v.abs()).sum::<f32>())
            .collect();
        Self { energy }
    }

    pub fn from_energies(energy: Vec<f32>) -> Self {
        Self { energy }
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.energy
    }

    /// Row with the largest strictly positive energy inside `rows`; the first
    /// one wins on ties. `None` when every row in range is zero.
    pub fn strongest_row_in(&self, rows: Range<usize>) -> Option<usize> {
        let end = rows.end.min(self.energy.len());
        let mut best = None;
        let mut best_energy = 0.0f32;
        for y in rows.start.min(end)..end {
            let e = self.energy[y];
            if e > best_energy {
                best_energy = e;
                best = Some(y);
            }
        }
        best
    }
}
