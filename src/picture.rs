//! Pictures are square grids of pixel models, and the reproduction operators
//! which make new pictures out of old ones.

use crate::error::{Error, Result};
use crate::gene::{Gene, GeneFraction, GeneticCode};
use crate::pixel::RandRgb;
use crate::raster::ColorMatrix;
use rand::Rng;

/// Make a new random identifier, 32 hexadecimal characters long.
pub(crate) fn uuid4(rng: &mut impl Rng) -> String {
    let uuid = rng.random::<u128>();
    format!("{uuid:032X}")
}

/// A grid of pixel models which renders a random but consistent image.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    id: String,
    grid_size: usize,
    grid: Vec<RandRgb>,
}

impl Picture {
    /// Generate a picture from scratch, with randomly parameterized pixels.
    pub fn fresh(grid_size: usize, rng: &mut impl Rng) -> Result<Self> {
        if grid_size == 0 {
            return Err(Error::Configuration("grid size must be positive".into()));
        }
        let grid = (0..grid_size * grid_size).map(|_| RandRgb::random(rng)).collect();
        Ok(Self {
            id: uuid4(rng),
            grid_size,
            grid,
        })
    }

    /// Make a picture from existing pixel models, in row-major order.
    pub fn from_cells(grid_size: usize, grid: Vec<RandRgb>, rng: &mut impl Rng) -> Result<Self> {
        if grid_size == 0 || grid.len() != grid_size * grid_size {
            return Err(Error::Invariant(format!(
                "picture of size {grid_size} needs {} cells, got {}",
                grid_size * grid_size,
                grid.len()
            )));
        }
        Ok(Self {
            id: uuid4(rng),
            grid_size,
            grid,
        })
    }

    /// Mate two parents into a new picture.
    ///
    /// A gene size is chosen at random, then each gene of the child is copied
    /// from one of the two parents, picked independently with even odds.
    pub fn crossover(parent1: &Picture, parent2: &Picture, rng: &mut impl Rng) -> Result<Self> {
        if parent1.grid_size != parent2.grid_size {
            return Err(Error::Invariant(format!(
                "cannot cross pictures of size {} and {}",
                parent1.grid_size, parent2.grid_size
            )));
        }
        let gene_size = GeneFraction::choose(rng).side_for(parent1.grid_size);
        let p1_genes = parent1.genes(gene_size)?;
        let p2_genes = parent2.genes(gene_size)?;
        let mut child_genes: GeneticCode = Vec::with_capacity(p1_genes.len());
        for (row1, row2) in p1_genes.into_iter().zip(p2_genes) {
            let mut code_row = Vec::with_capacity(row1.len());
            for (gene1, gene2) in row1.into_iter().zip(row2) {
                code_row.push(if rng.random_bool(0.5) { gene1 } else { gene2 });
            }
            child_genes.push(code_row);
        }
        let mut child = Self {
            id: uuid4(rng),
            grid_size: parent1.grid_size,
            grid: Vec::new(),
        };
        child.build_from_genes(&child_genes)?;
        Ok(child)
    }

    /// Make a mutated copy of a parent.
    ///
    /// A gene size is chosen at random, then each gene is mutated with
    /// probability `mutation_rate`. The parent is not changed.
    pub fn mutate(parent: &Picture, mutation_rate: f64, rng: &mut impl Rng) -> Result<Self> {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(Error::Configuration(format!(
                "mutation rate must be between 0 and 1, got {mutation_rate}"
            )));
        }
        let gene_size = GeneFraction::choose(rng).side_for(parent.grid_size);
        let mut genes = parent.genes(gene_size)?;
        for gene in genes.iter_mut().flatten() {
            if rng.random_bool(mutation_rate) {
                gene.mutate(rng);
            }
        }
        let mut child = Self {
            id: uuid4(rng),
            grid_size: parent.grid_size,
            grid: Vec::new(),
        };
        child.build_from_genes(&genes)?;
        Ok(child)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of cells on each side of this picture.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Pixel model at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&RandRgb> {
        if row < self.grid_size && col < self.grid_size {
            Some(&self.grid[row * self.grid_size + col])
        } else {
            None
        }
    }

    /// Grid of channel means, without the spreads.
    pub fn means(&self) -> Vec<[i32; 3]> {
        self.grid.iter().map(RandRgb::means).collect()
    }

    /// Divide this picture into a matrix of square genes, each `gene_size`
    /// cells on a side. Every cell belongs to exactly one gene.
    pub fn genes(&self, gene_size: usize) -> Result<GeneticCode> {
        if gene_size == 0 || self.grid_size % gene_size != 0 {
            return Err(Error::Invariant(format!(
                "gene size {gene_size} does not divide grid size {}",
                self.grid_size
            )));
        }
        let gene_num = self.grid_size / gene_size;
        let mut genetic_code = Vec::with_capacity(gene_num);
        for gene_row in 0..gene_num {
            let mut code_row = Vec::with_capacity(gene_num);
            for gene_col in 0..gene_num {
                // Top-left corner of this gene.
                let top = gene_row * gene_size;
                let left = gene_col * gene_size;
                let mut cells = Vec::with_capacity(gene_size * gene_size);
                for y in top..top + gene_size {
                    let start = y * self.grid_size + left;
                    cells.extend_from_slice(&self.grid[start..start + gene_size]);
                }
                code_row.push(Gene::new(gene_size, cells)?);
            }
            genetic_code.push(code_row);
        }
        Ok(genetic_code)
    }

    /// Replace this picture's grid with the cells of a genetic code.
    ///
    /// The genetic code must be square, all of its genes must be the same size
    /// as the first one, and together they must cover exactly this picture's
    /// grid size.
    pub fn build_from_genes(&mut self, genes: &[Vec<Gene>]) -> Result<()> {
        let gene_size = genes
            .first()
            .and_then(|row| row.first())
            .map(Gene::side)
            .ok_or_else(|| Error::Invariant("genetic code is empty".into()))?;
        let gene_num = genes.len();
        if gene_num * gene_size != self.grid_size {
            return Err(Error::Invariant(format!(
                "{gene_num} genes of size {gene_size} do not cover grid size {}",
                self.grid_size
            )));
        }
        for (index, row) in genes.iter().enumerate() {
            if row.len() != gene_num {
                return Err(Error::Invariant(format!(
                    "genetic code row {index} has {} genes, expected {gene_num}",
                    row.len()
                )));
            }
            if let Some(gene) = row.iter().find(|gene| gene.side() != gene_size) {
                return Err(Error::Invariant(format!(
                    "gene of size {} in a genetic code of size {gene_size}",
                    gene.side()
                )));
            }
        }
        let mut grid = Vec::with_capacity(self.grid_size * self.grid_size);
        for code_row in genes {
            for y in 0..gene_size {
                for gene in code_row {
                    grid.extend_from_slice(gene.row(y));
                }
            }
        }
        self.grid = grid;
        Ok(())
    }

    /// Draw one color from every cell. Repeated renders differ.
    pub fn render(&self, rng: &mut impl Rng) -> ColorMatrix {
        let pixels = self.grid.iter().map(|cell| cell.sample(rng)).collect();
        ColorMatrix::square(self.grid_size, pixels)
    }

    /// Draw one color from every cell, formatted as `#rrggbb` strings.
    pub fn render_hex(&self, rng: &mut impl Rng) -> Vec<Vec<String>> {
        self.grid
            .chunks(self.grid_size)
            .map(|row| row.iter().map(|cell| cell.hex(rng)).collect())
            .collect()
    }
}
