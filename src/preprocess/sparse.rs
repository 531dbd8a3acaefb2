//! Single-row sparse feature vector

/// One row in compressed form: total width plus sorted `(column, value)` pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseRow {
    width: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseRow {
    /// Empty row of the given width
    pub fn zeros(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    /// Convert a dense row, dropping explicit zeros
    pub fn from_dense(values: &[f64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect();
        Self {
            width: values.len(),
            entries,
        }
    }

    /// Set a column. Columns must be pushed in increasing order.
    pub(crate) fn push(&mut self, column: usize, value: f64) {
        debug_assert!(column < self.width);
        debug_assert!(self.entries.last().map_or(true, |(c, _)| *c < column));
        if value != 0.0 {
            self.entries.push((column, value));
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Stored (non-zero) entries
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Value at a column (zero when not stored)
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |(c, _)| *c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Concatenate rows column-wise, left to right
    pub fn hstack(blocks: &[SparseRow]) -> Self {
        let mut out = SparseRow::zeros(blocks.iter().map(|b| b.width).sum());
        let mut offset = 0;
        for block in blocks {
            out.entries
                .extend(block.entries.iter().map(|(c, v)| (c + offset, *v)));
            offset += block.width;
        }
        out
    }

    /// Dot product against dense weights of the same width
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries.iter().map(|(c, v)| v * weights[*c]).sum()
    }

    /// Expand back to a dense row
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.width];
        for (c, v) in &self.entries {
            dense[*c] = *v;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dense_drops_zeros() {
        let row = SparseRow::from_dense(&[0.0, 1.5, 0.0, -2.0]);
        assert_eq!(row.width(), 4);
        assert_eq!(row.entries(), &[(1, 1.5), (3, -2.0)]);
        assert_eq!(row.get(2), 0.0);
        assert_eq!(row.get(3), -2.0);
    }

    #[test]
    fn test_hstack_offsets_columns() {
        let dense = SparseRow::from_dense(&[0.5, -1.0]);
        let mut onehot = SparseRow::zeros(3);
        onehot.push(2, 1.0);

        let row = SparseRow::hstack(&[dense, onehot]);
        assert_eq!(row.width(), 5);
        assert_eq!(row.to_dense(), vec![0.5, -1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_dot() {
        let row = SparseRow::from_dense(&[2.0, 0.0, 3.0]);
        assert_eq!(row.dot(&[1.0, 100.0, 0.5]), 3.5);
    }
}
