//! Scoring rendered pictures against the target image. Lower scores are better.

use crate::error::{Error, Result};
use crate::raster::ColorMatrix;
use serde::{Deserialize, Serialize};

/// How to compare a rendered picture with the target image.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FitnessMetric {
    /// Sum of absolute differences, over every pixel and channel.
    #[default]
    AbsoluteDifference,

    /// Sum of absolute differences between per-channel color histograms.
    /// Ignores where colors are, only counts how often they occur.
    Histogram,
}

impl FitnessMetric {
    pub fn score(self, rendered: &ColorMatrix, target: &ColorMatrix) -> Result<u64> {
        if rendered.side() != target.side() {
            return Err(Error::Invariant(format!(
                "cannot compare a {0}x{0} picture with a {1}x{1} target",
                rendered.side(),
                target.side()
            )));
        }
        Ok(match self {
            Self::AbsoluteDifference => absolute_difference(rendered, target),
            Self::Histogram => histogram_difference(rendered, target),
        })
    }
}

fn absolute_difference(rendered: &ColorMatrix, target: &ColorMatrix) -> u64 {
    rendered
        .pixels()
        .iter()
        .zip(target.pixels())
        .flat_map(|(a, b)| a.iter().zip(b))
        .map(|(&a, &b)| a.abs_diff(b) as u64)
        .sum()
}

fn histogram(image: &ColorMatrix) -> [[u64; 256]; 3] {
    let mut bins = [[0u64; 256]; 3];
    for pixel in image.pixels() {
        for (channel, &value) in pixel.iter().enumerate() {
            bins[channel][value as usize] += 1;
        }
    }
    bins
}

fn histogram_difference(rendered: &ColorMatrix, target: &ColorMatrix) -> u64 {
    let a = histogram(rendered);
    let b = histogram(target);
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .map(|(&x, &y)| x.abs_diff(y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_images_score_zero() {
        let image = ColorMatrix::filled(5, [10, 20, 30]);
        for metric in [FitnessMetric::AbsoluteDifference, FitnessMetric::Histogram] {
            assert_eq!(metric.score(&image, &image).unwrap(), 0);
        }
    }

    #[test]
    fn absolute_difference_sums_channels() {
        let black = ColorMatrix::filled(2, [0, 0, 0]);
        let image = ColorMatrix::new(2, vec![[1, 2, 3], [0, 0, 0], [255, 0, 0], [0, 0, 10]]).unwrap();
        let score = FitnessMetric::AbsoluteDifference.score(&image, &black).unwrap();
        assert_eq!(score, 1 + 2 + 3 + 255 + 10);
        // Symmetric.
        assert_eq!(FitnessMetric::AbsoluteDifference.score(&black, &image).unwrap(), score);
    }

    #[test]
    fn histogram_ignores_position() {
        let a = ColorMatrix::new(2, vec![[0; 3], [255; 3], [0; 3], [0; 3]]).unwrap();
        let b = ColorMatrix::new(2, vec![[0; 3], [0; 3], [0; 3], [255; 3]]).unwrap();
        assert_eq!(FitnessMetric::Histogram.score(&a, &b).unwrap(), 0);
        assert!(FitnessMetric::AbsoluteDifference.score(&a, &b).unwrap() > 0);
        // One pixel moved from bin 0 to bin 255 in each of three channels.
        let black = ColorMatrix::filled(2, [0, 0, 0]);
        assert_eq!(FitnessMetric::Histogram.score(&a, &black).unwrap(), 6);
    }

    #[test]
    fn size_mismatch() {
        let a = ColorMatrix::filled(2, [0, 0, 0]);
        let b = ColorMatrix::filled(3, [0, 0, 0]);
        assert!(matches!(FitnessMetric::AbsoluteDifference.score(&a, &b), Err(Error::Invariant(_))));
    }

    #[test]
    fn metric_json() {
        let metric: FitnessMetric = serde_json::from_str(r#""Histogram""#).unwrap();
        assert_eq!(metric, FitnessMetric::Histogram);
    }
}
