use cubesnake_common::Cell;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Seeded uniform choice among free cells.
#[derive(Debug, Clone)]
pub struct TargetPicker {
    rng: StdRng,
}

impl TargetPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `None` only when `free` is empty.
    pub fn pick(&mut self, free: &[Cell]) -> Option<Cell> {
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesnake_common::Coordinate;

    fn cells(n: i32) -> Vec<Cell> {
        (0..n).map(|x| Cell::new(0, Coordinate::new(x, 0))).collect()
    }

    #[test]
    fn empty_slice_yields_nothing() {
        let mut picker = TargetPicker::new(1);
        assert_eq!(picker.pick(&[]), None);
    }

    #[test]
    fn pick_comes_from_the_slice() {
        let mut picker = TargetPicker::new(9);
        let free = cells(10);
        for _ in 0..50 {
            let cell = picker.pick(&free).unwrap();
            assert!(free.contains(&cell));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let free = cells(100);
        let mut a = TargetPicker::new(42);
        let mut b = TargetPicker::new(42);
        for _ in 0..20 {
            assert_eq!(a.pick(&free), b.pick(&free));
        }
    }

    #[test]
    fn single_cell_is_always_chosen() {
        let mut picker = TargetPicker::new(3);
        let only = Cell::new(2, Coordinate::new(1, 1));
        assert_eq!(picker.pick(&[only]), Some(only));
    }
}
