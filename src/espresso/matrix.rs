//! Sparse covering matrix and the minimum-cover branch-and-bound
//!
//! The matrix is Boolean with explicit row and column index sets, supporting
//! deletion, row/column dominance and essential-column detection. It backs
//! the redundancy sub-problem inside IRREDUNDANT and the cyclic core of the
//! exact solver.
//!
//! Row and column sets are `BTreeSet`s: iteration order is the index order,
//! which keeps reductions and branching deterministic across platforms.

use std::collections::BTreeSet;
use std::time::Instant;

/// A Boolean covering matrix
///
/// Row `r` covers column `c` when the entry (r, c) is set. Solving finds a
/// minimum set of rows covering every column.
#[derive(Debug, Clone)]
pub struct CoverMatrix {
    rows: Vec<Option<BTreeSet<usize>>>,
    cols: Vec<Option<BTreeSet<usize>>>,
}

/// Result of a minimum-cover search
#[derive(Debug, Clone)]
pub struct MinCover {
    /// Selected row indices, ascending.
    pub rows: Vec<usize>,
    /// False when the deadline cut the search short; the selection is then
    /// feasible but possibly not minimum.
    pub complete: bool,
}

impl CoverMatrix {
    /// Empty matrix with the given dimensions
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        CoverMatrix {
            rows: (0..num_rows).map(|_| Some(BTreeSet::new())).collect(),
            cols: (0..num_cols).map(|_| Some(BTreeSet::new())).collect(),
        }
    }

    /// Set entry (row, col)
    pub fn insert(&mut self, row: usize, col: usize) {
        self.rows[row]
            .as_mut()
            .expect("insert into deleted row")
            .insert(col);
        self.cols[col]
            .as_mut()
            .expect("insert into deleted column")
            .insert(row);
    }

    /// Number of live columns
    pub fn live_cols(&self) -> usize {
        self.cols.iter().filter(|c| c.is_some()).count()
    }

    /// Number of live rows
    pub fn live_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    fn delete_row(&mut self, row: usize) {
        if let Some(cols) = self.rows[row].take() {
            for c in cols {
                if let Some(rows) = self.cols[c].as_mut() {
                    rows.remove(&row);
                }
            }
        }
    }

    fn delete_col(&mut self, col: usize) {
        if let Some(rows) = self.cols[col].take() {
            for r in rows {
                if let Some(cols) = self.rows[r].as_mut() {
                    cols.remove(&col);
                }
            }
        }
    }

    /// Select `row` into the partial solution: its columns are satisfied and
    /// removed, then the row itself
    fn select_row(&mut self, row: usize) {
        let cols: Vec<usize> = self.rows[row]
            .as_ref()
            .expect("select of deleted row")
            .iter()
            .copied()
            .collect();
        for c in cols {
            self.delete_col(c);
        }
        self.delete_row(row);
    }

    /// Dominance and essential-column reduction to fixpoint
    ///
    /// Selected essential rows are appended to `partial`. Returns false when
    /// some column became uncoverable (the branch is infeasible).
    fn reduce(&mut self, partial: &mut Vec<usize>) -> bool {
        loop {
            let mut changed = false;

            // Uncoverable or essential columns.
            for c in 0..self.cols.len() {
                let Some(rows) = self.cols[c].as_ref() else {
                    continue;
                };
                match rows.len() {
                    0 => return false,
                    1 => {
                        let r = *rows.iter().next().expect("nonempty set");
                        partial.push(r);
                        self.select_row(r);
                        changed = true;
                    }
                    _ => {}
                }
            }

            // Row dominance: a row whose column set is contained in another
            // row's contributes nothing the other cannot.
            let live: Vec<usize> = (0..self.rows.len())
                .filter(|&r| self.rows[r].is_some())
                .collect();
            for &a in &live {
                if self.rows[a].is_none() {
                    continue;
                }
                for &b in &live {
                    if a == b || self.rows[a].is_none() || self.rows[b].is_none() {
                        continue;
                    }
                    let ca = self.rows[a].as_ref().expect("checked live");
                    let cb = self.rows[b].as_ref().expect("checked live");
                    let drop_b = if ca.len() > cb.len() {
                        cb.is_subset(ca)
                    } else {
                        // Equal sets: keep the lower index.
                        a < b && ca == cb
                    };
                    if drop_b {
                        self.delete_row(b);
                        changed = true;
                    }
                }
            }

            // Column dominance: if every row covering X also covers Y, then
            // Y is satisfied for free once X is — drop Y.
            let live: Vec<usize> = (0..self.cols.len())
                .filter(|&c| self.cols[c].is_some())
                .collect();
            for &x in &live {
                if self.cols[x].is_none() {
                    continue;
                }
                for &y in &live {
                    if x == y || self.cols[x].is_none() || self.cols[y].is_none() {
                        continue;
                    }
                    let rx = self.cols[x].as_ref().expect("checked live");
                    let ry = self.cols[y].as_ref().expect("checked live");
                    let drop_y = if rx.len() < ry.len() {
                        rx.is_subset(ry)
                    } else {
                        x < y && rx == ry
                    };
                    if drop_y {
                        self.delete_col(y);
                        changed = true;
                    }
                }
            }

            if !changed {
                return true;
            }
        }
    }

    /// Greedy maximal independent set of columns: a lower bound on the rows
    /// any solution still needs
    fn independent_columns(&self) -> usize {
        let mut used: BTreeSet<usize> = BTreeSet::new();
        let mut count = 0;
        for c in 0..self.cols.len() {
            let Some(rows) = self.cols[c].as_ref() else {
                continue;
            };
            if rows.iter().all(|r| !used.contains(r)) {
                used.extend(rows.iter().copied());
                count += 1;
            }
        }
        count
    }

    /// The live row covering the most columns, ties to the lowest index
    fn hardest_row(&self) -> Option<usize> {
        (0..self.rows.len())
            .filter(|&r| self.rows[r].is_some())
            .max_by_key(|&r| {
                (
                    self.rows[r].as_ref().expect("filtered live").len(),
                    std::cmp::Reverse(r),
                )
            })
    }

    /// Minimum cover by branch-and-bound
    ///
    /// Explores inclusion before exclusion of the hardest row, pruning
    /// subtrees whose partial size plus the independent-column bound cannot
    /// beat the incumbent. With no deadline the result is a true minimum.
    pub fn solve(self, deadline: Option<Instant>) -> MinCover {
        let all_rows: Vec<usize> = (0..self.rows.len())
            .filter(|&r| self.rows[r].is_some())
            .collect();
        let mut best: Option<Vec<usize>> = None;
        let mut expired = false;
        branch(self, Vec::new(), &mut best, deadline, &mut expired);
        match best {
            Some(mut rows) => {
                rows.sort_unstable();
                MinCover {
                    rows,
                    complete: !expired,
                }
            }
            // Only reachable on immediate timeout; fall back to everything.
            None => MinCover {
                rows: all_rows,
                complete: false,
            },
        }
    }
}

fn branch(
    mut m: CoverMatrix,
    mut partial: Vec<usize>,
    best: &mut Option<Vec<usize>>,
    deadline: Option<Instant>,
    expired: &mut bool,
) {
    if *expired {
        return;
    }
    if let Some(limit) = deadline {
        if Instant::now() >= limit {
            *expired = true;
            return;
        }
    }

    if !m.reduce(&mut partial) {
        return;
    }

    if m.live_cols() == 0 {
        let better = match best {
            None => true,
            Some(b) => {
                partial.len() < b.len() || (partial.len() == b.len() && sorted(&partial) < sorted(b))
            }
        };
        if better {
            *best = Some(partial);
        }
        return;
    }

    if let Some(b) = best {
        if partial.len() + m.independent_columns() >= b.len() {
            return;
        }
    }

    let row = m.hardest_row().expect("live columns imply live rows");

    // Include the hardest row first: it satisfies the most columns and
    // tightens the incumbent quickly.
    let mut with = m.clone();
    let mut partial_with = partial.clone();
    partial_with.push(row);
    with.select_row(row);
    branch(with, partial_with, best, deadline, expired);

    m.delete_row(row);
    branch(m, partial, best, deadline, expired);
}

fn sorted(v: &[usize]) -> Vec<usize> {
    let mut s = v.to_vec();
    s.sort_unstable();
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(num_rows: usize, num_cols: usize, entries: &[(usize, usize)]) -> CoverMatrix {
        let mut m = CoverMatrix::new(num_rows, num_cols);
        for &(r, c) in entries {
            m.insert(r, c);
        }
        m
    }

    #[test]
    fn essential_column_forces_row() {
        // Column 0 is only covered by row 1.
        let m = matrix(2, 2, &[(0, 1), (1, 0), (1, 1)]);
        let sol = m.solve(None);
        assert_eq!(sol.rows, vec![1]);
        assert!(sol.complete);
    }

    #[test]
    fn dominated_rows_are_dropped() {
        // Row 0 covers a superset of row 1's columns.
        let m = matrix(2, 2, &[(0, 0), (0, 1), (1, 0)]);
        let sol = m.solve(None);
        assert_eq!(sol.rows, vec![0]);
    }

    #[test]
    fn solves_a_cyclic_core() {
        // 3 columns, each coverable by 2 of 3 rows; minimum is 2 rows.
        let m = matrix(3, 3, &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 0)]);
        let sol = m.solve(None);
        assert_eq!(sol.rows.len(), 2);
        assert!(sol.complete);
    }

    #[test]
    fn five_cycle_needs_three_rows() {
        // The classic odd cycle: row i covers columns i and i+1 (mod 5).
        let mut entries = Vec::new();
        for i in 0..5 {
            entries.push((i, i));
            entries.push((i, (i + 1) % 5));
        }
        let m = matrix(5, 5, &entries);
        let sol = m.solve(None);
        assert_eq!(sol.rows.len(), 3);
    }

    #[test]
    fn empty_matrix_selects_nothing() {
        let m = CoverMatrix::new(3, 0);
        let sol = m.solve(None);
        assert!(sol.rows.is_empty());
        assert!(sol.complete);
    }

    #[test]
    fn deterministic_selection() {
        let build = || matrix(3, 3, &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 0)]);
        let a = build().solve(None);
        let b = build().solve(None);
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn expired_deadline_still_feasible() {
        let m = matrix(2, 2, &[(0, 0), (1, 1)]);
        let past = Instant::now() - std::time::Duration::from_millis(1);
        let sol = m.solve(Some(past));
        assert!(!sol.complete);
        // Fallback keeps every live row, which certainly covers.
        assert_eq!(sol.rows, vec![0, 1]);
    }
}
