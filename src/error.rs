//! Error type shared by every part of the evolver.

/// Everything that can go wrong while setting up or running an evolution.
///
/// Stochastic non-convergence is not represented here: a run whose fitness
/// never improves is still a successful run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bad arguments, bad configuration values, or an unusable target image.
    /// Detected before the first generation runs.
    #[error("Configuration Error: {0}")]
    Configuration(String),

    /// A structural rule of the genetic representation was broken, such as a
    /// gene size which does not divide the grid size.
    #[error("Invariant Violation: {0}")]
    Invariant(String),

    #[error("File Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON Decode Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors which prevent an evolution from starting.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Image(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefix() {
        let err = Error::Invariant("gene size 3 does not divide grid size 10".into());
        assert_eq!(err.to_string(), "Invariant Violation: gene size 3 does not divide grid size 10");
        assert!(!err.is_configuration());
        assert!(Error::Configuration("missing target".into()).is_configuration());
    }
}
