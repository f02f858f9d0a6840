//! Suspension gravity and booster flood-destroy tests

use booster_tetris::core::gravity::suspended_clusters;
use booster_tetris::core::{drop_floating_blocks, find_clusters, flood_destroy, Board};
use booster_tetris::types::Color;

#[test]
fn test_clusters_are_four_connected() {
    let board = Board::from_pattern(&[
        "R.G",
        ".R.",
        "GG.",
    ]);
    // The top cells only touch the center diagonally.
    let clusters = find_clusters(&board);
    assert_eq!(clusters.len(), 3);
    let mut sizes: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 1, 3]);
}

#[test]
fn test_clusters_ignore_color() {
    let board = Board::from_pattern(&["RGYP", "...."]);
    assert_eq!(find_clusters(&board).len(), 1);
}

#[test]
fn test_floor_cluster_is_not_suspended() {
    let board = Board::from_pattern(&[
        ".Y.",
        ".Y.",
        ".Y.",
    ]);
    assert!(suspended_clusters(&board).is_empty());
}

#[test]
fn test_cluster_falls_as_rigid_group() {
    let mut board = Board::from_pattern(&[
        "GG...",
        ".G...",
        ".....",
        ".....",
        "....R",
    ]);
    let report = drop_floating_blocks(&mut board);
    assert_eq!(report.clusters_moved, 1);
    assert_eq!(report.cells_moved, 3);
    assert_eq!(
        board.to_pattern(),
        vec![".....", ".....", ".....", "GG...", ".G..R"]
    );
}

#[test]
fn test_cluster_stops_on_ledge() {
    let mut board = Board::from_pattern(&[
        ".PP",
        "...",
        "...",
        "..O",
        "..O",
    ]);
    drop_floating_blocks(&mut board);
    assert_eq!(board.to_pattern(), vec!["...", "...", ".PP", "..O", "..O"]);
}

#[test]
fn test_settled_board_has_nothing_to_drop() {
    let mut board = Board::from_pattern(&[
        "...",
        "R..",
        "RGG",
    ]);
    let before = board.clone();
    assert!(!drop_floating_blocks(&mut board).moved());
    assert_eq!(board, before);
    assert!(suspended_clusters(&board).is_empty());
}

#[test]
fn test_two_by_two_drops_to_floor() {
    let mut board = Board::new(20, 10);
    for (row, col) in [(5, 0), (5, 1), (6, 0), (6, 1)] {
        board.set_cell(row, col, Color::YELLOW);
    }
    drop_floating_blocks(&mut board);
    for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
        assert_eq!(board.color(row, col), Some(Color::YELLOW));
    }
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_flood_destroys_only_matching_region() {
    let mut board = Board::from_pattern(&[
        "RRG",
        "GRG",
        "RRR",
        "G.R",
    ]);
    let destroyed = flood_destroy(&mut board, 0, 0, Color::RED);
    assert_eq!(destroyed.len(), 7);
    assert_eq!(board.to_pattern(), vec!["..G", "G.G", "...", "G.."]);
}

#[test]
fn test_flood_does_not_cross_diagonals() {
    let mut board = Board::from_pattern(&["R.", ".R"]);
    let destroyed = flood_destroy(&mut board, 1, 1, Color::RED);
    assert_eq!(destroyed, vec![(1, 1)]);
    assert!(board.is_occupied(0, 0));
}

#[test]
fn test_flood_start_mismatch_is_noop() {
    let mut board = Board::from_pattern(&["RG", ".."]);
    assert!(flood_destroy(&mut board, 0, 1, Color::RED).is_empty());
    assert!(flood_destroy(&mut board, 1, 0, Color::RED).is_empty());
    assert!(flood_destroy(&mut board, 9, 9, Color::RED).is_empty());
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_flood_then_gravity() {
    // Removing the green support leaves the yellow pair hanging.
    let mut board = Board::from_pattern(&[
        "YY..",
        "G...",
        "G...",
        "G..R",
    ]);
    flood_destroy(&mut board, 3, 0, Color::GREEN);
    drop_floating_blocks(&mut board);
    assert_eq!(board.to_pattern(), vec!["....", "....", "....", "YY.R"]);
}
