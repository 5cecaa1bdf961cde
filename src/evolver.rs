//! The population of pictures and the generational loop which evolves it.

use crate::archive::Archive;
use crate::config::EvolverConfig;
use crate::error::{Error, Result};
use crate::gene::GeneFraction;
use crate::picture::Picture;
use crate::raster::ColorMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// First line of each run written to the fitness history file.
fn history_header(grid_size: usize, population_size: usize) -> String {
    use chrono::{SecondsFormat, Utc};
    let started = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!("# run {started} target {grid_size}x{grid_size} population {population_size}")
}

/// Evolves a population of pictures toward a target image.
///
/// Each generation is scored against the target, the best
/// [survival_size](EvolverConfig::survival_size) pictures survive unchanged,
/// and the rest of the next generation is bred from the survivors.
pub struct Evolver {
    target: ColorMatrix,

    config: EvolverConfig,

    rng: StdRng,

    /// Number of generations that have completely passed.
    iteration: u64,

    /// Current members, survivors first and then children in order of birth.
    population: Vec<Picture>,

    /// Scores of the survivors, which are carried into the next generation
    /// instead of being scored again.
    survivor_scores: HashMap<String, u64>,

    /// Best score of each generation, in order.
    history: Vec<(u64, u64)>,
}

impl Evolver {
    /// Create the initial population of random pictures.
    ///
    /// The target image sets the grid size for every picture in the run.
    pub fn new(target: ColorMatrix, config: EvolverConfig) -> Result<Self> {
        config.validate()?;
        let grid_size = target.side();
        if grid_size == 0 {
            return Err(Error::Configuration("target image is empty".into()));
        }
        if config.require_hundreds && grid_size % 100 != 0 {
            return Err(Error::Configuration(format!(
                "target image side {grid_size} is not a multiple of 100"
            )));
        }
        for fraction in GeneFraction::ALL {
            if !fraction.is_exact(grid_size) {
                log::warn!(
                    "{}% genes approximated as {} cells for a grid of {grid_size}",
                    fraction.percent(),
                    fraction.side_for(grid_size)
                );
            }
        }
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let population = (0..config.population_size())
            .map(|_| Picture::fresh(grid_size, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        log::info!(
            "created {} pictures of {grid_size}x{grid_size} cells",
            population.len()
        );
        Ok(Self {
            target,
            config,
            rng,
            iteration: 0,
            population,
            survivor_scores: HashMap::new(),
            history: Vec::new(),
        })
    }

    /// Load the target image from a file and create the initial population.
    pub fn open(target: impl AsRef<Path>, config: EvolverConfig) -> Result<Self> {
        let target = ColorMatrix::load(target)?;
        Self::new(target, config)
    }

    pub fn get_target(&self) -> &ColorMatrix {
        &self.target
    }

    pub fn get_config(&self) -> &EvolverConfig {
        &self.config
    }

    /// Number of cells on each side of every picture.
    pub fn grid_size(&self) -> usize {
        self.target.side()
    }

    /// Get the number of generations that have completely passed.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn pop_size(&self) -> usize {
        self.config.population_size()
    }

    /// Get the current members of the population.
    pub fn population(&self) -> &[Picture] {
        &self.population
    }

    /// Find a current member by its id.
    pub fn get(&self, id: &str) -> Option<&Picture> {
        self.population.iter().find(|picture| picture.id() == id)
    }

    /// The (generation, best score) pair of every generation evaluated so far.
    pub fn history(&self) -> &[(u64, u64)] {
        &self.history
    }

    /// Render a picture and compare it with the target. Lower is better.
    pub fn fitness(&mut self, picture: &Picture) -> Result<u64> {
        let rendered = picture.render(&mut self.rng);
        self.config.fitness.score(&rendered, &self.target)
    }

    /// Run one generation: score, select, and breed.
    ///
    /// Every `log_every` generations the survivors are rendered into the
    /// archive. Returns the best score of the generation just evaluated.
    pub fn step(&mut self, log_every: u64, archive: &mut impl Archive) -> Result<u64> {
        if log_every == 0 {
            return Err(Error::Configuration("log interval must be positive".into()));
        }
        if self.population.is_empty() {
            return Err(Error::Invariant("cannot step an empty population".into()));
        }
        // Score every member, reusing the scores that the survivors already earned.
        let mut ranking = Vec::with_capacity(self.population.len());
        for (index, picture) in self.population.iter().enumerate() {
            let score = match self.survivor_scores.get(picture.id()) {
                Some(&score) => score,
                None => {
                    let rendered = picture.render(&mut self.rng);
                    self.config.fitness.score(&rendered, &self.target)?
                }
            };
            ranking.push((score, index));
        }
        // Stable sort, so ties go to the older member.
        ranking.sort_by_key(|&(score, _)| score);
        let best = ranking[0].0;
        let survival_size = self.config.survival_size.min(ranking.len());

        let mut members: Vec<Option<Picture>> = self.population.drain(..).map(Some).collect();
        let mut survivors = Vec::with_capacity(self.config.population_size());
        let mut survivor_scores = HashMap::with_capacity(survival_size);
        for &(score, index) in &ranking[..survival_size] {
            if let Some(picture) = members[index].take() {
                survivor_scores.insert(picture.id().to_string(), score);
                survivors.push(picture);
            }
        }
        // Breed one crossover and one mutant for each ordered pair of survivors.
        let mut children = Vec::with_capacity(2 * survival_size * survival_size);
        for mother in &survivors {
            for father in &survivors {
                children.push(Picture::crossover(mother, father, &mut self.rng)?);
                children.push(Picture::mutate(mother, self.config.mutation_rate, &mut self.rng)?);
            }
        }
        let generation = self.iteration;
        self.history.push((generation, best));
        log::debug!(
            "generation {generation}: best {best}, worst {}",
            ranking[ranking.len() - 1].0
        );

        survivors.extend(children);
        self.population = survivors;
        self.survivor_scores = survivor_scores;
        self.iteration += 1;

        if self.iteration % log_every == 0 {
            log::info!("generation {}: best score {best}", self.iteration);
            for picture in &self.population[..survival_size] {
                let rendered = picture.render(&mut self.rng);
                archive.store(self.iteration, picture.id(), &rendered)?;
            }
        }
        Ok(best)
    }

    /// Run several generations and return the fitness history.
    pub fn run(&mut self, generations: u64, log_every: u64, archive: &mut impl Archive) -> Result<&[(u64, u64)]> {
        for _ in 0..generations {
            self.step(log_every, archive)?;
        }
        Ok(&self.history)
    }

    /// Append the fitness history to a text file, one `generation score`
    /// pair per line, after a header line for this run.
    pub fn save_history(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut buf = BufWriter::new(file);
        writeln!(buf, "{}", history_header(self.grid_size(), self.pop_size()))?;
        for (generation, score) in &self.history {
            writeln!(buf, "{generation} {score}")?;
        }
        buf.flush()?;
        Ok(())
    }
}
