//! Suspension engine - connected clusters fall as rigid groups
//!
//! A cluster is a maximal 4-connected set of occupied cells. Clusters that do
//! not reach the floor drop by the largest uniform distance that keeps every
//! cell in bounds and off cells belonging to other clusters. Dropping whole
//! clusters (instead of single cells) keeps shapes intact.

use std::collections::VecDeque;

use crate::board::Board;
use crate::types::Color;

/// A connected group of occupied cells, found by BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// `(row, col, color)` of every member
    pub cells: Vec<(usize, usize, Color)>,
}

impl Cluster {
    pub fn touches_floor(&self, rows: usize) -> bool {
        self.cells.iter().any(|&(row, _, _)| row + 1 == rows)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Summary of a [`drop_floating_blocks`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropReport {
    pub clusters_moved: usize,
    pub cells_moved: usize,
}

impl DropReport {
    pub fn moved(&self) -> bool {
        self.clusters_moved > 0
    }
}

/// All clusters on the board, discovered scanning from the floor upward.
pub fn find_clusters(board: &Board) -> Vec<Cluster> {
    let (rows, cols) = (board.rows(), board.cols());
    let mut visited = vec![false; rows * cols];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for row in (0..rows).rev() {
        for col in 0..cols {
            if visited[row * cols + col] || !board.is_occupied(row, col) {
                continue;
            }

            let mut cells = Vec::new();
            visited[row * cols + col] = true;
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                if let Some(color) = board.color(r, c) {
                    cells.push((r, c, color));
                }

                let neighbors = [
                    (r.wrapping_sub(1), c, r > 0),
                    (r + 1, c, r + 1 < rows),
                    (r, c.wrapping_sub(1), c > 0),
                    (r, c + 1, c + 1 < cols),
                ];
                for (nr, nc, in_bounds) in neighbors {
                    if !in_bounds || visited[nr * cols + nc] || !board.is_occupied(nr, nc) {
                        continue;
                    }
                    visited[nr * cols + nc] = true;
                    queue.push_back((nr, nc));
                }
            }

            clusters.push(Cluster { cells });
        }
    }

    clusters
}

/// Largest uniform drop for `cluster`: keep increasing `d` while, for every
/// member `(r, c)`, row `r + d + 1` is inside the board and either empty or
/// part of the cluster itself, and not `blocked`.
pub fn drop_distance(
    board: &Board,
    cluster: &Cluster,
    blocked: &impl Fn(usize, usize) -> bool,
) -> usize {
    let cols = board.cols();
    let mut member = vec![false; board.rows() * cols];
    for &(row, col, _) in &cluster.cells {
        member[row * cols + col] = true;
    }

    let mut distance = 0;
    loop {
        let fits = cluster.cells.iter().all(|&(row, col, _)| {
            let target = row + distance + 1;
            if target >= board.rows() {
                return false;
            }
            let free = !board.is_occupied(target, col) || member[target * cols + col];
            free && !blocked(target, col)
        });
        if !fits {
            return distance;
        }
        distance += 1;
    }
}

/// Clusters that do not touch the floor, paired with how far each could fall
/// right now.
pub fn suspended_clusters(board: &Board) -> Vec<(Cluster, usize)> {
    let no_obstacles = |_: usize, _: usize| false;
    find_clusters(board)
        .into_iter()
        .filter(|cluster| !cluster.touches_floor(board.rows()))
        .map(|cluster| {
            let distance = drop_distance(board, &cluster, &no_obstacles);
            (cluster, distance)
        })
        .collect()
}

/// Let every suspended cluster fall as far as it can.
pub fn drop_floating_blocks(board: &mut Board) -> DropReport {
    drop_floating_blocks_with(board, |_, _| false)
}

/// [`drop_floating_blocks`] with extra obstacles, such as the cells of the
/// falling piece, that clusters must not fall into.
///
/// Clusters are processed floor-first and passes repeat until nothing moves,
/// so a cluster resting on another suspended cluster follows it all the way
/// down within a single call.
pub fn drop_floating_blocks_with(
    board: &mut Board,
    blocked: impl Fn(usize, usize) -> bool,
) -> DropReport {
    let mut report = DropReport::default();

    loop {
        let mut moved_this_pass = false;

        for cluster in find_clusters(board) {
            if cluster.touches_floor(board.rows()) {
                continue;
            }
            let distance = drop_distance(board, &cluster, &blocked);
            if distance == 0 {
                continue;
            }

            for &(row, col, _) in &cluster.cells {
                board.clear_cell(row, col);
            }
            for &(row, col, color) in &cluster.cells {
                board.set_cell(row + distance, col, color);
            }

            report.clusters_moved += 1;
            report.cells_moved += cluster.len();
            moved_this_pass = true;
        }

        if !moved_this_pass {
            return report;
        }
    }
}
