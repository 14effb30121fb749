use connect_four_mcts::{board::Board, config::SearchConfig, Mcts};

#[test]
fn test_tree_visualization() {
    let config = SearchConfig::default().with_max_iterations(40).with_seed(6);
    let mut mcts = Mcts::new(Board::new(), config).unwrap();

    let _ = mcts.search();

    let tree_vis = mcts.visualize_tree(2);

    assert!(tree_vis.starts_with("Root"));
    assert!(tree_vis.contains("visits: 40"));
    assert!(tree_vis.contains("value:"));
    // Children are indented below the root
    assert!(tree_vis.contains("\n  Column "));
}

#[test]
fn test_visualization_depth_limit() {
    let config = SearchConfig::default().with_max_iterations(200).with_seed(6);
    let mut mcts = Mcts::new(Board::new(), config).unwrap();
    mcts.search().unwrap();

    let shallow = mcts.visualize_tree(0);
    assert_eq!(shallow.lines().count(), 1);

    let one_level = mcts.visualize_tree(1);
    assert_eq!(one_level.lines().count(), 8);
    assert!(!one_level.contains("\n    Column "));
}
