//! Longest-common-subsequence length table.

/// LCS lengths for every prefix pair of two sequences.
///
/// Stored as one contiguous `Vec<u32>` of `(rows) * (cols)` cells where
/// `rows = m + 1` and `cols = n + 1`; cell `(i, j)` holds the LCS length of
/// the first `i` items of the old sequence and the first `j` of the new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Fill the table using `matches` as the equivalence test.
    pub fn build<T, U>(old: &[T], new: &[U], mut matches: impl FnMut(&T, &U) -> bool) -> Self {
        let rows = old.len() + 1;
        let cols = new.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            let row = i * cols;
            let prev_row = (i - 1) * cols;
            for j in 1..cols {
                cells[row + j] = if matches(&old[i - 1], &new[j - 1]) {
                    cells[prev_row + j - 1] + 1
                } else {
                    cells[prev_row + j].max(cells[row + j - 1])
                };
            }
        }

        Self { rows, cols, cells }
    }

    /// LCS length of `old[..i]` and `new[..j]`.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j]
    }

    /// LCS length of the full sequences.
    pub fn lcs_len(&self) -> u32 {
        self.cells[self.cells.len() - 1]
    }

    /// Number of items in the old sequence.
    pub fn old_len(&self) -> usize {
        self.rows - 1
    }

    /// Number of items in the new sequence.
    pub fn new_len(&self) -> usize {
        self.cols - 1
    }
}
