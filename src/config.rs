//! Run configuration, loaded from a JSON file or built in code.

use crate::error::{Error, Result};
use crate::fitness::FitnessMetric;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_survival_size() -> usize {
    2
}

fn default_mutation_rate() -> f64 {
    0.1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Parameters of an evolution run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EvolverConfig {
    /// Number of pictures kept unchanged from one generation to the next.
    /// The population size is derived from this, see [Self::population_size].
    #[serde(default = "default_survival_size")]
    pub survival_size: usize,

    /// Probability that any one gene is mutated when a picture is mutated.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    #[serde(default)]
    pub fitness: FitnessMetric,

    /// Seed for the random number generator, or None for a fresh seed from
    /// the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Directory where survivor images and the fitness history are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Refuse target images whose side is not a multiple of 100, so that
    /// every gene size is an exact fraction of the picture.
    #[serde(default)]
    pub require_hundreds: bool,
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            survival_size: default_survival_size(),
            mutation_rate: default_mutation_rate(),
            fitness: FitnessMetric::default(),
            seed: None,
            output_dir: default_output_dir(),
            require_hundreds: false,
        }
    }
}

impl EvolverConfig {
    /// Load a configuration from a JSON file. Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|err| Error::Configuration(format!("{err}: {path:?}")))?;
        let this: Self = serde_json::from_str(&data)?;
        this.validate()?;
        Ok(this)
    }

    /// Total number of pictures in each generation: the survivors, plus one
    /// crossover child and one mutant child for every ordered pair of survivors.
    pub fn population_size(&self) -> usize {
        2 * self.survival_size * self.survival_size + self.survival_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.survival_size == 0 {
            return Err(Error::Configuration("survival size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::Configuration(format!(
                "mutation rate must be between 0 and 1, got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
