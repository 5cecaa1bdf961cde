//! Genes are square blocks of pixel models, the unit of crossover and mutation.

use crate::error::{Error, Result};
use crate::pixel::RandRgb;
use rand::Rng;

/// A square block of pixel models cut out of a picture.
///
/// Genes own a copy of their cells. Changing a gene has no effect on the
/// picture it was cut from, only on pictures later built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    side: usize,
    cells: Vec<RandRgb>,
}

/// A picture's genes, indexed by `[gene_row][gene_col]`.
pub type GeneticCode = Vec<Vec<Gene>>;

impl Gene {
    /// Argument cells is in row-major order and must hold exactly `side * side` items.
    pub fn new(side: usize, cells: Vec<RandRgb>) -> Result<Self> {
        if side == 0 || cells.len() != side * side {
            return Err(Error::Invariant(format!(
                "gene of side {side} needs {} cells, got {}",
                side * side,
                cells.len()
            )));
        }
        Ok(Self { side, cells })
    }

    /// Length of one side of this gene, in cells.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell at the local offset `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Result<&RandRgb> {
        if row >= self.side || col >= self.side {
            return Err(Error::Invariant(format!(
                "gene index ({row}, {col}) out of range for side {}",
                self.side
            )));
        }
        Ok(&self.cells[row * self.side + col])
    }

    /// One row of cells.
    pub(crate) fn row(&self, row: usize) -> &[RandRgb] {
        &self.cells[row * self.side..(row + 1) * self.side]
    }

    /// Mutate every cell in this gene.
    pub fn mutate(&mut self, rng: &mut impl Rng) {
        for cell in &mut self.cells {
            cell.mutate(rng);
        }
    }
}

/// Size of a gene, relative to the size of the picture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeneFraction {
    OnePercent,
    TwoPercent,
    FivePercent,
    TenPercent,
}

impl GeneFraction {
    pub const ALL: [GeneFraction; 4] = [Self::OnePercent, Self::TwoPercent, Self::FivePercent, Self::TenPercent];

    /// Pick one of the fractions uniformly at random.
    pub fn choose(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn percent(self) -> usize {
        match self {
            Self::OnePercent => 1,
            Self::TwoPercent => 2,
            Self::FivePercent => 5,
            Self::TenPercent => 10,
        }
    }

    /// Gene side for a picture of the given size.
    ///
    /// Grid sizes which are multiples of 100 get the exact fraction. Other
    /// sizes get the divisor of `grid_size` nearest to the exact fraction,
    /// preferring the smaller divisor on ties, and never less than one.
    pub fn side_for(self, grid_size: usize) -> usize {
        let exact = (grid_size * self.percent()) as f64 / 100.0;
        let mut best = 1;
        for candidate in 1..=grid_size {
            if grid_size % candidate != 0 {
                continue;
            }
            if (candidate as f64 - exact).abs() < (best as f64 - exact).abs() {
                best = candidate;
            }
        }
        best
    }

    /// Returns true if [Self::side_for] is the exact fraction of `grid_size`.
    pub fn is_exact(self, grid_size: usize) -> bool {
        grid_size * self.percent() % 100 == 0 && grid_size * self.percent() / 100 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn numbered(side: usize) -> Gene {
        let cells = (0..side * side)
            .map(|i| RandRgb::from_params([i as i32, 0, 0, 0, 0, 0]))
            .collect();
        Gene::new(side, cells).unwrap()
    }

    #[test]
    fn at_indexes_row_major() {
        let gene = numbered(3);
        assert_eq!(gene.at(0, 0).unwrap().r_mu, 0);
        assert_eq!(gene.at(1, 2).unwrap().r_mu, 5);
        assert_eq!(gene.at(2, 2).unwrap().r_mu, 8);
        assert_eq!(gene.row(1).len(), 3);
    }

    #[test]
    fn at_out_of_range() {
        let gene = numbered(2);
        assert!(matches!(gene.at(2, 0), Err(Error::Invariant(_))));
        assert!(matches!(gene.at(0, 2), Err(Error::Invariant(_))));
    }

    #[test]
    fn new_rejects_wrong_cell_count() {
        assert!(Gene::new(2, vec![RandRgb::default(); 3]).is_err());
        assert!(Gene::new(0, vec![]).is_err());
    }

    #[test]
    fn mutate_touches_every_cell() {
        let rng = &mut StdRng::seed_from_u64(7);
        let original = Gene::new(4, vec![RandRgb::default(); 16]).unwrap();
        // With 16 cells and 6 parameters each, a no-op mutation is vanishingly unlikely.
        let mut gene = original.clone();
        gene.mutate(rng);
        assert_ne!(gene, original);
        assert_eq!(gene.side(), 4);
    }

    #[test]
    fn side_for_multiples_of_hundred() {
        assert_eq!(GeneFraction::OnePercent.side_for(400), 4);
        assert_eq!(GeneFraction::TwoPercent.side_for(400), 8);
        assert_eq!(GeneFraction::FivePercent.side_for(400), 20);
        assert_eq!(GeneFraction::TenPercent.side_for(400), 40);
        for fraction in GeneFraction::ALL {
            assert!(fraction.is_exact(100));
        }
    }

    #[test]
    fn side_for_snaps_to_divisor() {
        for grid_size in 1..=64 {
            for fraction in GeneFraction::ALL {
                let side = fraction.side_for(grid_size);
                assert!(side >= 1);
                assert_eq!(grid_size % side, 0);
            }
        }
        assert_eq!(GeneFraction::TenPercent.side_for(4), 1);
        assert_eq!(GeneFraction::TenPercent.side_for(30), 3);
        assert!(!GeneFraction::TenPercent.is_exact(4));
    }
}
