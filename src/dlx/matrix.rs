use crate::error::DlxError;

/// One cell of the arena: either a column header (`row == None`) or a row
/// cell living in the intersection of some row and `header`'s column.
///
/// `up`/`down`/`left`/`right` are indices into [`Matrix::nodes`], not
/// pointers — see the module docs for why.
#[derive(Debug, Clone, Copy)]
struct Node {
    up: usize,
    down: usize,
    left: usize,
    right: usize,
    header: usize,
    row: Option<usize>,
    size: usize,
}

impl Node {
    fn header(index: usize) -> Self {
        Node {
            up: index,
            down: index,
            left: index,
            right: index,
            header: index,
            row: None,
            size: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    first_cell: usize,
    covered: bool,
}

/// A sparse exact-cover matrix, encoded as a toroidal doubly-linked list
/// over a flat node arena.
///
/// Columns `0..primary` must be covered by exactly one selected row in any
/// solution; columns `primary..primary + optional` may be covered by at
/// most one. Rows are appended with [`Matrix::add_row`] and solutions are
/// produced by [`Matrix::for_each_solution`] or [`Matrix::first_solution`].
#[derive(Debug)]
pub struct Matrix {
    nodes: Vec<Node>,
    primary: usize,
    optional: usize,
    rows: Vec<Row>,
    solution: Vec<usize>,
    sol_len: usize,
}

impl Matrix {
    const ROOT: usize = 0;

    /// Creates an empty matrix with `primary` required columns and
    /// `optional` columns that participate in covers but need not be
    /// satisfied.
    ///
    /// `primary` must be positive; a matrix with no required columns has
    /// no useful exact-cover semantics.
    pub fn new(primary: usize, optional: usize) -> Result<Matrix, DlxError> {
        if primary == 0 {
            return Err(DlxError::InvalidArgument);
        }

        let col_count = primary + optional;
        let mut nodes = Vec::with_capacity(1 + col_count);
        nodes.push(Node::header(Self::ROOT));
        for col in 0..col_count {
            nodes.push(Node::header(Self::col_node(col)));
        }

        let mut matrix = Matrix {
            nodes,
            primary,
            optional,
            rows: Vec::new(),
            solution: Vec::new(),
            sol_len: 0,
        };

        // Only primary columns join the header ring; optional columns stay
        // self-looped horizontally so column selection (§4.4) never sees
        // them, while still taking part in the vertical cover/uncover walk.
        let mut prev = Self::ROOT;
        for col in 0..primary {
            let header = Self::col_node(col);
            matrix.splice_right(prev, header);
            prev = header;
        }

        Ok(matrix)
    }

    /// Number of columns (primary plus optional).
    pub fn column_count(&self) -> usize {
        self.primary + self.optional
    }

    /// Number of rows appended so far via [`Matrix::add_row`].
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_node(col: usize) -> usize {
        col + 1
    }

    /// Inserts `node` immediately to the right of `at` in a horizontal ring.
    fn splice_right(&mut self, at: usize, node: usize) {
        let right = self.nodes[at].right;
        self.nodes[node].right = right;
        self.nodes[right].left = node;
        self.nodes[node].left = at;
        self.nodes[at].right = node;
    }

    /// Appends a row covering the given columns.
    ///
    /// `indices` must be strictly ascending and within `0..column_count()`;
    /// an empty slice is a no-op. Both conditions are checked in full
    /// before any node is created, so a rejected call leaves the matrix
    /// untouched.
    pub fn add_row(&mut self, indices: &[usize]) -> Result<usize, DlxError> {
        if indices.is_empty() {
            return Ok(self.rows.len());
        }

        let col_count = self.column_count();
        let mut previous: Option<usize> = None;
        for &col in indices {
            if col >= col_count {
                return Err(DlxError::IndexOutOfRange {
                    index: col,
                    max: Some(col_count - 1),
                });
            }
            if let Some(prev) = previous {
                if col <= prev {
                    return Err(DlxError::NotAscending {
                        previous: prev,
                        index: col,
                    });
                }
            }
            previous = Some(col);
        }

        let row_index = self.rows.len();
        let base = self.nodes.len();
        let count = indices.len();

        for (i, &col) in indices.iter().enumerate() {
            let header = Self::col_node(col);
            let node_index = base + i;
            let left = if i == 0 { base + count - 1 } else { node_index - 1 };
            let right = if i == count - 1 { base } else { node_index + 1 };
            let up = self.nodes[header].up;

            self.nodes.push(Node {
                up,
                down: header,
                left,
                right,
                header,
                row: Some(row_index),
                size: 0,
            });

            // New cells are inserted at the bottom of the column, just
            // above its header, so header.down keeps pointing at the
            // oldest row and top-to-bottom traversal visits insertion
            // order.
            self.nodes[up].down = node_index;
            self.nodes[header].up = node_index;
            self.nodes[header].size += 1;
        }

        log::trace!("added row {row_index} with {count} cells");

        self.rows.push(Row {
            first_cell: base,
            covered: false,
        });
        Ok(row_index)
    }

    /// Excises every cell of the row containing `pivot`, except `pivot`
    /// itself, from their respective columns' vertical rings.
    ///
    /// `pivot` is left untouched here deliberately: the caller reaches
    /// `pivot` by walking a column's own vertical ring, and is responsible
    /// for dealing with that column as a whole (see [`Matrix::cover_column`]).
    fn cover_row(&mut self, pivot: usize) {
        let row = self.nodes[pivot].row.expect("cover_row pivot must be a row cell");
        self.rows[row].covered = true;

        let mut j = self.nodes[pivot].right;
        while j != pivot {
            let node = self.nodes[j];
            self.nodes[node.up].down = node.down;
            self.nodes[node.down].up = node.up;
            self.nodes[node.header].size -= 1;
            j = self.nodes[j].right;
        }
    }

    /// Exact inverse of [`Matrix::cover_row`]: restores every sibling of
    /// `pivot` into its column, walking in the reverse order cover used.
    fn uncover_row(&mut self, pivot: usize) {
        let row = self.nodes[pivot].row.expect("uncover_row pivot must be a row cell");

        let mut j = self.nodes[pivot].left;
        while j != pivot {
            let node = self.nodes[j];
            self.nodes[node.up].down = j;
            self.nodes[node.down].up = j;
            self.nodes[node.header].size += 1;
            j = self.nodes[j].left;
        }

        self.rows[row].covered = false;
    }

    /// Removes column `header` from the header ring and hides every row
    /// with a cell in it.
    ///
    /// Hiding a row here (via [`Matrix::cover_row`]) only excises that
    /// row's *other* cells; the cell in `header` itself needs no separate
    /// treatment because `header` is no longer reachable from the root.
    fn cover_column(&mut self, header: usize) {
        log::trace!("covering column {header}");
        let node = self.nodes[header];
        self.nodes[node.left].right = node.right;
        self.nodes[node.right].left = node.left;

        let mut i = self.nodes[header].down;
        while i != header {
            self.cover_row(i);
            i = self.nodes[i].down;
        }
    }

    /// Exact inverse of [`Matrix::cover_column`].
    fn uncover_column(&mut self, header: usize) {
        log::trace!("uncovering column {header}");
        let mut i = self.nodes[header].up;
        while i != header {
            self.uncover_row(i);
            i = self.nodes[i].up;
        }

        let node = self.nodes[header];
        self.nodes[node.left].right = header;
        self.nodes[node.right].left = header;
    }

    /// Covers every column `pivot` touches other than its own, i.e. the
    /// columns a candidate row would additionally consume if selected.
    fn cover_siblings(&mut self, pivot: usize) {
        let mut j = self.nodes[pivot].right;
        while j != pivot {
            self.cover_column(self.nodes[j].header);
            j = self.nodes[j].right;
        }
    }

    fn uncover_siblings(&mut self, pivot: usize) {
        let mut j = self.nodes[pivot].left;
        while j != pivot {
            self.uncover_column(self.nodes[j].header);
            j = self.nodes[j].left;
        }
    }

    /// Picks the live column with the fewest candidate rows (minimum
    /// remaining values). Only called when the header ring is non-empty.
    fn choose_column(&self) -> usize {
        let mut best = self.nodes[Self::ROOT].right;
        let mut best_size = self.nodes[best].size;

        let mut col = self.nodes[best].right;
        while col != Self::ROOT {
            let size = self.nodes[col].size;
            if size < best_size {
                best = col;
                best_size = size;
            }
            col = self.nodes[col].right;
        }

        best
    }

    fn push_solution_row(&mut self, row_index: usize) {
        if self.sol_len == self.solution.len() {
            self.solution.push(row_index);
        } else {
            self.solution[self.sol_len] = row_index;
        }
        self.sol_len += 1;
    }

    fn pop_solution(&mut self) {
        self.sol_len -= 1;
    }

    fn row_of(&self, cell: usize) -> usize {
        self.nodes[cell].row.expect("cell must belong to a row")
    }

    /// Visits every exact cover, calling `callback` with the solution's row
    /// indices (in the order they were chosen) each time one is found.
    ///
    /// The slice passed to `callback` is only valid for the duration of the
    /// call: it is backed by the matrix's own solution stack, which keeps
    /// being mutated as the search continues. On normal return the matrix
    /// is restored exactly to the state it had before the call (modulo any
    /// rows previously pinned with [`Matrix::add_to_solution`]).
    ///
    /// There is no way to stop an in-progress enumeration early short of
    /// letting it exhaust the search space; callers who only need one
    /// answer should use [`Matrix::first_solution`] instead.
    pub fn for_each_solution(&mut self, mut callback: impl FnMut(&[usize])) {
        self.search_all(&mut callback);
    }

    fn search_all(&mut self, callback: &mut dyn FnMut(&[usize])) {
        if self.nodes[Self::ROOT].right == Self::ROOT {
            log::debug!("solution found at depth {}", self.sol_len);
            callback(&self.solution[..self.sol_len]);
            return;
        }

        let col = self.choose_column();
        if self.nodes[col].size == 0 {
            log::debug!("dead branch, column {col} has no candidates");
            return;
        }

        self.cover_column(col);
        let mut r = self.nodes[col].down;
        while r != col {
            self.push_solution_row(self.row_of(r));
            self.cover_siblings(r);

            self.search_all(callback);

            self.uncover_siblings(r);
            self.pop_solution();
            r = self.nodes[r].down;
        }
        self.uncover_column(col);
    }

    /// Returns the first exact cover found, or `None` if the matrix has no
    /// solution, restoring the matrix to its pre-search state either way.
    pub fn first_solution(&mut self) -> Option<Vec<usize>> {
        self.search_first()
    }

    fn search_first(&mut self) -> Option<Vec<usize>> {
        if self.nodes[Self::ROOT].right == Self::ROOT {
            return Some(self.solution[..self.sol_len].to_vec());
        }

        let col = self.choose_column();
        if self.nodes[col].size == 0 {
            return None;
        }

        self.cover_column(col);
        let mut found = None;
        let mut r = self.nodes[col].down;
        while r != col {
            self.push_solution_row(self.row_of(r));
            self.cover_siblings(r);

            found = self.search_first();

            self.uncover_siblings(r);
            self.pop_solution();

            if found.is_some() {
                break;
            }
            r = self.nodes[r].down;
        }
        self.uncover_column(col);

        found
    }

    /// Forces `row_index` into the solution ahead of any search, covering
    /// its column and every sibling column exactly as choosing it during
    /// search would.
    ///
    /// Fails with [`DlxError::AlreadyCovered`] if the row (or a column it
    /// touches) has already been pinned by an earlier call.
    pub fn add_to_solution(&mut self, row_index: usize) -> Result<(), DlxError> {
        if row_index >= self.rows.len() {
            return Err(DlxError::IndexOutOfRange {
                index: row_index,
                max: self.rows.len().checked_sub(1),
            });
        }
        if self.rows[row_index].covered {
            return Err(DlxError::AlreadyCovered(row_index));
        }

        let first = self.rows[row_index].first_cell;
        self.push_solution_row(row_index);
        self.cover_column(self.nodes[first].header);
        self.cover_siblings(first);

        log::debug!("pinned row {row_index} ahead of search");
        Ok(())
    }

    /// Undoes every pinned row, in reverse order, restoring the matrix to
    /// the state it had before any [`Matrix::add_to_solution`] call.
    pub fn clear_solution(&mut self) {
        while self.sol_len > 0 {
            let row_index = self.solution[self.sol_len - 1];
            self.sol_len -= 1;

            let first = self.rows[row_index].first_cell;
            self.uncover_siblings(first);
            self.uncover_column(self.nodes[first].header);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn knuth_matrix() -> Matrix {
        // Knuth's TAOCP 7-column worked example.
        let rows: &[&[usize]] = &[
            &[2, 4],
            &[0, 3, 6],
            &[1, 2, 5],
            &[0, 3, 5],
            &[1, 6],
            &[3, 4, 6],
        ];
        let mut matrix = Matrix::new(7, 0).unwrap();
        for row in rows {
            matrix.add_row(row).unwrap();
        }
        matrix
    }

    #[test]
    fn add_row_rejects_non_ascending_indices_without_mutating() {
        let mut matrix = Matrix::new(3, 0).unwrap();
        let before = matrix.rows.len();
        let err = matrix.add_row(&[1, 0]).unwrap_err();
        assert_eq!(err, DlxError::NotAscending { previous: 1, index: 0 });
        assert_eq!(matrix.rows.len(), before);
    }

    #[test]
    fn add_row_rejects_out_of_range_indices() {
        let mut matrix = Matrix::new(3, 0).unwrap();
        assert_eq!(
            matrix.add_row(&[0, 5]),
            Err(DlxError::IndexOutOfRange { index: 5, max: Some(2) })
        );
    }

    #[test]
    fn new_rejects_zero_primary_columns() {
        assert_eq!(Matrix::new(0, 4), Err(DlxError::InvalidArgument));
    }

    proptest! {
        #[test]
        fn cover_uncover_column_is_an_exact_inverse(
            seed in 0u64..200,
        ) {
            let mut matrix = Matrix::new(4, 2).unwrap();
            let rows: &[&[usize]] = &[&[0, 1], &[1, 2, 4], &[0, 3], &[2, 3, 5], &[1, 3]];
            for row in rows {
                matrix.add_row(row).unwrap();
            }

            let before = snapshot(&matrix);
            let col = 1 + (seed as usize % matrix.column_count());
            matrix.cover_column(col);
            matrix.uncover_column(col);
            let after = snapshot(&matrix);
            prop_assert_eq!(before, after);
        }
    }

    proptest! {
        #[test]
        fn search_restores_matrix_to_its_pre_search_state(seed in 0u64..50) {
            let _ = seed;
            let mut matrix = knuth_matrix();
            let before = snapshot(&matrix);
            let mut count = 0;
            matrix.for_each_solution(|_| count += 1);
            prop_assert_eq!(count, 1);
            let after = snapshot(&matrix);
            prop_assert_eq!(before, after);
        }
    }

    /// A structural fingerprint of the whole arena, used by property tests
    /// to assert "nothing changed" without exposing internals publicly.
    fn snapshot(matrix: &Matrix) -> Vec<(usize, usize, usize, usize, usize)> {
        matrix
            .nodes
            .iter()
            .map(|n| (n.up, n.down, n.left, n.right, n.size))
            .collect()
    }
}
