use crate::cells::GridCoordinate;
use crate::units::{ColumnsCount, RowsCount};

/// Row-major iteration over every cell coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    columns: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(rows: RowsCount, columns: ColumnsCount) -> CellIter {
        CellIter {
            columns: columns.0,
            current_cell_number: 0,
            cells_count: rows.0 * columns.0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_coordinate(self.columns, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iteration over whole rows (west to east) or whole columns (north to south).
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: usize,
    columns: usize,
}

impl BatchIter {
    pub(crate) fn rows(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            rows: rows.0,
            columns: columns.0,
        }
    }

    pub(crate) fn columns(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            rows: rows.0,
            columns: columns.0,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows,
            BatchIterType::Column => self.columns,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.batches_count() {
            return None;
        }

        let fixed = self.current_index as u32;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.columns)
                    .map(|column| GridCoordinate::new(fixed, column as u32))
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.rows)
                    .map(|row| GridCoordinate::new(row as u32, fixed))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batches_count() - self.current_index;
        (remaining, Some(remaining))
    }
}

#[inline]
pub(crate) fn index_to_coordinate(columns: usize, index: usize) -> GridCoordinate {
    GridCoordinate::new((index / columns) as u32, (index % columns) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_in_row_major_order() {
        let cells = CellIter::new(RowsCount(2), ColumnsCount(3)).collect::<Vec<_>>();
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(cells,
                   vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)]);
    }

    #[test]
    fn cell_iter_is_exact_size() {
        let mut iter = CellIter::new(RowsCount(4), ColumnsCount(5));
        assert_eq!(iter.len(), 20);
        let _ = iter.next();
        assert_eq!(iter.len(), 19);
    }

    #[test]
    fn batches() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let rows = BatchIter::rows(RowsCount(2), ColumnsCount(3)).collect::<Vec<_>>();
        assert_eq!(rows,
                   vec![vec![gc(0, 0), gc(0, 1), gc(0, 2)], vec![gc(1, 0), gc(1, 1), gc(1, 2)]]);

        let columns = BatchIter::columns(RowsCount(2), ColumnsCount(3));
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.collect::<Vec<_>>(),
                   vec![vec![gc(0, 0), gc(1, 0)],
                        vec![gc(0, 1), gc(1, 1)],
                        vec![gc(0, 2), gc(1, 2)]]);
    }
}
