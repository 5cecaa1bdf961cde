//! Pixel model, the color generator behind each cell of a picture.

use rand::Rng;
use rand_distr::StandardNormal;

/// Largest change to a channel mean caused by one mutation.
pub const MEAN_STEP: i32 = 64;

/// Largest change to a channel spread caused by one mutation.
pub const SPREAD_STEP: i32 = 16;

/// Generates a random color by drawing each channel from its own gaussian.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RandRgb {
    pub r_mu: i32,
    pub r_sig: i32,
    pub g_mu: i32,
    pub g_sig: i32,
    pub b_mu: i32,
    pub b_sig: i32,
}

impl Default for RandRgb {
    fn default() -> Self {
        Self {
            r_mu: 128,
            r_sig: 16,
            g_mu: 128,
            g_sig: 16,
            b_mu: 128,
            b_sig: 16,
        }
    }
}

/// One gaussian draw, rounded and wrapped into a color channel.
fn sample_channel(rng: &mut impl Rng, mu: i32, sig: i32) -> u8 {
    let z: f64 = rng.sample(StandardNormal);
    let value = (mu as f64 + sig as f64 * z).round() as i64;
    // Wrap around, like a color wheel, instead of clamping.
    value.rem_euclid(256) as u8
}

impl RandRgb {
    /// Pixel model with randomly chosen parameters: means in [0, 256) and
    /// spreads in [1, 10].
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r_mu: rng.random_range(0..256),
            r_sig: rng.random_range(1..=10),
            g_mu: rng.random_range(0..256),
            g_sig: rng.random_range(1..=10),
            b_mu: rng.random_range(0..256),
            b_sig: rng.random_range(1..=10),
        }
    }

    /// Load the parameters from the vector form `(r_mu, r_sig, g_mu, g_sig, b_mu, b_sig)`.
    ///
    /// Negative spreads are raised to zero.
    pub fn from_params(params: [i32; 6]) -> Self {
        let [r_mu, r_sig, g_mu, g_sig, b_mu, b_sig] = params;
        Self {
            r_mu,
            r_sig: r_sig.max(0),
            g_mu,
            g_sig: g_sig.max(0),
            b_mu,
            b_sig: b_sig.max(0),
        }
    }

    /// Parameters in the vector form `(r_mu, r_sig, g_mu, g_sig, b_mu, b_sig)`.
    pub fn params(&self) -> [i32; 6] {
        [self.r_mu, self.r_sig, self.g_mu, self.g_sig, self.b_mu, self.b_sig]
    }

    /// Channel means, without the spreads.
    pub fn means(&self) -> [i32; 3] {
        [self.r_mu, self.g_mu, self.b_mu]
    }

    /// Draw a color. Every call makes a fresh draw.
    pub fn sample(&self, rng: &mut impl Rng) -> [u8; 3] {
        [
            sample_channel(rng, self.r_mu, self.r_sig),
            sample_channel(rng, self.g_mu, self.g_sig),
            sample_channel(rng, self.b_mu, self.b_sig),
        ]
    }

    /// Draw a color formatted as `#rrggbb`.
    pub fn hex(&self, rng: &mut impl Rng) -> String {
        let [r, g, b] = self.sample(rng);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Nudge every mean by up to [MEAN_STEP] and every spread by up to
    /// [SPREAD_STEP], in either direction. Spreads never go below zero.
    pub fn mutate(&mut self, rng: &mut impl Rng) {
        for mu in [&mut self.r_mu, &mut self.g_mu, &mut self.b_mu] {
            *mu += rng.random_range(-MEAN_STEP..=MEAN_STEP);
        }
        for sig in [&mut self.r_sig, &mut self.g_sig, &mut self.b_sig] {
            *sig = (*sig + rng.random_range(-SPREAD_STEP..=SPREAD_STEP)).max(0);
        }
    }
}
