use std::fmt;

use crate::measure::Measurement;

/// Plain-text measurement report, in the layout operators already parse.
///
/// ```text
/// [AZIMUTH] Pick Count, X-position and Height in Azimuth Contour:
///
///   Azimuth Pick Count in Video: 2
///   Azimuth Pick at x-position 120 px with Pick Height: 180 px
///   ...
/// ```
///
/// Each silhouette region gets a contour section listing every tip recorded
/// so far, followed by its aligned-pick section. The spacing line comes last.
pub struct ReportText<'a>(pub &'a Measurement);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let t = m.timestamp_sec();

        for (i, region) in m.regions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let recorded = &m.recorded[..region.recorded_count.min(m.recorded.len())];
            writeln!(
                f,
                "[AZIMUTH] Pick Count, X-position and Height in Azimuth Contour:"
            )?;
            writeln!(f)?;
            writeln!(f, "  Azimuth Pick Count in Video: {}", recorded.len())?;
            for tip in recorded {
                pick_line(f, tip.point.x, tip.height)?;
            }

            writeln!(f)?;
            if region.matched.is_empty() {
                writeln!(f, "[AZIMUTH] No picks aligned with azimuth at frame {t}s.")?;
            } else {
                writeln!(f, "[AZIMUTH] Pick(s) in Azimuth timeframe {t}s:")?;
                writeln!(f)?;
                writeln!(f, "  Azimuth Pick Count in this Frame: {}", region.matched.len())?;
                for tip in &region.matched {
                    pick_line(f, tip.pair.raw.x, tip.height)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Estimated Cutting Line Distance: {} px",
            m.spacing.average_spacing
        )?;

        if !m.has_baseline() {
            writeln!(f, "Baseline not available!")?;
        }
        Ok(())
    }
}

fn pick_line(f: &mut fmt::Formatter<'_>, x: i32, height: Option<i32>) -> fmt::Result {
    match height {
        Some(h) => writeln!(f, "  Azimuth Pick at x-position {x} px with Pick Height: {h} px"),
        None => writeln!(
            f,
            "  Azimuth Pick at x-position {x} px (height unavailable: baseline not available)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use pm_core::Point2i;
    use pm_edge::BaselineEstimate;
    use pm_picks::{SpacingEstimate, TipCandidate, TipMatch};

    use super::ReportText;
    use crate::measure::{MatchedTip, Measurement, RegionTips};

    fn matched(
        raw: Point2i,
        reference: Point2i,
        index: usize,
        baseline: Option<i32>,
    ) -> MatchedTip {
        MatchedTip {
            pair: TipMatch {
                raw,
                reference,
                reference_index: index,
                distance: raw.distance(reference),
            },
            height: baseline.map(|b| b - raw.y),
        }
    }

    fn measurement(baseline: Option<i32>) -> Measurement {
        let tip = |x, y| TipCandidate::new(Point2i::new(x, y), baseline);
        let first = matched(Point2i::new(42, 61), Point2i::new(40, 60), 0, baseline);
        let second = matched(Point2i::new(322, 91), Point2i::new(320, 90), 2, baseline);
        Measurement {
            timestamp_ms: 2750.0,
            frame_width: 100,
            frame_height: 50,
            scale: 4,
            baseline: baseline.map(|b| BaselineEstimate {
                row: (b / 4) as usize,
                y: b as f32 / 4.0,
            }),
            scaled_baseline: baseline,
            regions: vec![
                RegionTips {
                    outline: Vec::new(),
                    tips: vec![tip(40, 60), tip(200, 80)],
                    recorded_count: 2,
                    matched: vec![first],
                },
                RegionTips {
                    outline: Vec::new(),
                    tips: vec![tip(320, 90)],
                    recorded_count: 3,
                    matched: vec![first, second],
                },
            ],
            recorded: vec![tip(40, 60), tip(200, 80), tip(320, 90)],
            raw_tips: vec![Point2i::new(42, 61), Point2i::new(322, 91)],
            matched: vec![first, second],
            spacing: SpacingEstimate {
                average_spacing: 140,
                ..SpacingEstimate::default()
            },
            degradations: Vec::new(),
        }
    }

    #[test]
    fn each_region_lists_tips_so_far_and_its_aligned_picks() {
        let text = ReportText(&measurement(Some(160))).to_string();
        let expected = "\
[AZIMUTH] Pick Count, X-position and Height in Azimuth Contour:

  Azimuth Pick Count in Video: 2
  Azimuth Pick at x-position 40 px with Pick Height: 100 px
  Azimuth Pick at x-position 200 px with Pick Height: 80 px

[AZIMUTH] Pick(s) in Azimuth timeframe 2s:

  Azimuth Pick Count in this Frame: 1
  Azimuth Pick at x-position 42 px with Pick Height: 99 px

[AZIMUTH] Pick Count, X-position and Height in Azimuth Contour:

  Azimuth Pick Count in Video: 3
  Azimuth Pick at x-position 40 px with Pick Height: 100 px
  Azimuth Pick at x-position 200 px with Pick Height: 80 px
  Azimuth Pick at x-position 320 px with Pick Height: 70 px

[AZIMUTH] Pick(s) in Azimuth timeframe 2s:

  Azimuth Pick Count in this Frame: 2
  Azimuth Pick at x-position 42 px with Pick Height: 99 px
  Azimuth Pick at x-position 322 px with Pick Height: 69 px

Estimated Cutting Line Distance: 140 px
";
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_baseline_is_reported_instead_of_heights() {
        let text = ReportText(&measurement(None)).to_string();
        assert!(text.contains(
            "  Azimuth Pick at x-position 40 px (height unavailable: baseline not available)"
        ));
        assert!(!text.contains("Pick Height"));
        assert!(text.ends_with("Baseline not available!\n"));
    }

    #[test]
    fn no_alignment_and_no_regions() {
        let mut m = measurement(Some(160));
        m.regions[0].matched.clear();
        let text = ReportText(&m).to_string();
        assert_eq!(
            text.matches("[AZIMUTH] No picks aligned with azimuth at frame 2s.\n").count(),
            1
        );
        assert_eq!(text.matches("Azimuth Pick Count in this Frame: 2").count(), 1);

        m.regions.clear();
        let text = ReportText(&m).to_string();
        assert_eq!(text, "\nEstimated Cutting Line Distance: 140 px\n");
    }
}
