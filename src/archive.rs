//! Where survivor images go at each checkpoint.

use crate::error::Result;
use crate::raster::ColorMatrix;
use std::path::{Path, PathBuf};

/// Receives rendered survivors at checkpoint generations.
pub trait Archive {
    fn store(&mut self, iteration: u64, id: &str, image: &ColorMatrix) -> Result<()>;
}

/// Writes each image to `<directory>/<id>.png`.
///
/// A survivor stored at several checkpoints keeps one file, holding its
/// latest render.
#[derive(Debug, Clone)]
pub struct ImageDirectory {
    path: PathBuf,
}

impl ImageDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().into(),
        }
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn file_for(&self, id: &str) -> PathBuf {
        self.path.join(format!("{id}.png"))
    }
}

impl Archive for ImageDirectory {
    fn store(&mut self, iteration: u64, id: &str, image: &ColorMatrix) -> Result<()> {
        // Make the directory in case this is the first image to be saved to it.
        if !self.path.exists() {
            std::fs::create_dir_all(&self.path)?;
        }
        let file = self.file_for(id);
        image.save_png(&file)?;
        log::debug!("generation {iteration}: saved {file:?}");
        Ok(())
    }
}

/// Drops every image.
#[derive(Debug, Default, Copy, Clone)]
pub struct Discard;

impl Archive for Discard {
    fn store(&mut self, _iteration: u64, _id: &str, _image: &ColorMatrix) -> Result<()> {
        Ok(())
    }
}
