use connect_four_mcts::{
    board::Board,
    config::{RolloutKind, SearchConfig},
    tree::{NodeId, SearchTree},
    Mcts,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_backpropagation_alternates_sign() {
    let mut tree = SearchTree::new(Board::new());
    let root = tree.root();
    let child = tree.expand(root, 0).unwrap();
    let grandchild = tree.expand(child, 0).unwrap();

    // The player to move at the grandchild won its playout
    tree.backpropagate(grandchild, 1.0);

    assert_eq!(tree.get(grandchild).visits, 1);
    assert_eq!(tree.get(grandchild).reward_sum, -1.0);
    assert_eq!(tree.get(child).visits, 1);
    assert_eq!(tree.get(child).reward_sum, 1.0);
    assert_eq!(tree.get(root).visits, 1);
    assert_eq!(tree.get(root).reward_sum, -1.0);
}

#[test]
fn test_draws_add_visits_only() {
    let mut tree = SearchTree::new(Board::new());
    let root = tree.root();
    let child = tree.expand(root, 3).unwrap();

    tree.backpropagate(child, 0.0);
    tree.backpropagate(child, 0.0);

    assert_eq!(tree.get(child).visits, 2);
    assert_eq!(tree.get(child).reward_sum, 0.0);
    assert_eq!(tree.get(root).visits, 2);
}

#[test]
fn test_expansion_links_parent_and_child() {
    let mut tree = SearchTree::new(Board::new());
    let root = tree.root();
    let mut rng = StdRng::seed_from_u64(4);

    let child = tree.expand_random(root, &mut rng).unwrap().unwrap();
    let node = tree.get(child);
    let column = node.action.unwrap();

    assert_eq!(node.parent, Some(root));
    assert_eq!(node.depth, 1);
    assert_eq!(node.state, Board::new().apply_move(column).unwrap());
    assert_eq!(tree.get(root).children, vec![child]);
    assert!(!tree.get(root).untried_moves.contains(&column));
    assert_eq!(tree.get(root).untried_moves.len(), 6);
    assert_eq!(tree.path_to_root(child), vec![child, root]);
}

#[test]
fn test_root_becomes_fully_expanded() {
    let mut tree = SearchTree::new(Board::new());
    let root = tree.root();
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..7 {
        assert!(!tree.get(root).is_fully_expanded());
        assert!(tree.expand_random(root, &mut rng).unwrap().is_some());
    }

    assert!(tree.get(root).is_fully_expanded());
    assert!(tree.expand_random(root, &mut rng).unwrap().is_none());

    let mut columns: Vec<usize> = tree.children(root).filter_map(|c| c.action).collect();
    columns.sort_unstable();
    assert_eq!(columns, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_terminal_nodes_have_nothing_to_expand() {
    let board = Board::from_moves(&[3, 3, 4, 4, 5, 5]).unwrap();
    let mut tree = SearchTree::new(board);
    let root = tree.root();
    let untried = tree.get(root).untried_moves.clone();
    let winning = untried.iter().position(|&c| c == 6).unwrap();

    let child = tree.expand(root, winning).unwrap();

    assert!(tree.get(child).is_terminal());
    assert!(tree.get(child).is_leaf());
    assert!(tree.get(child).untried_moves.is_empty());
}

fn check_visit_counts(tree: &SearchTree, id: NodeId) {
    let node = tree.get(id);
    let through_children: u64 = tree.children(id).map(|child| child.visits).sum();
    assert!(
        node.visits >= through_children,
        "node {:?} has {} visits but its children have {}",
        id,
        node.visits,
        through_children
    );
    for &child in &node.children {
        check_visit_counts(tree, child);
    }
}

#[test]
fn test_visit_counts_after_search() {
    for (kind, seed) in [(RolloutKind::Random, 1), (RolloutKind::HeuristicGreedy, 2)] {
        let config = SearchConfig::default()
            .with_max_iterations(500)
            .with_rollout_policy(kind)
            .with_seed(seed);
        let mut mcts = Mcts::new(Board::from_moves(&[3, 3]).unwrap(), config).unwrap();
        mcts.search().unwrap();

        let tree = mcts.tree();
        assert_eq!(tree.get(tree.root()).visits, 500);
        assert_eq!(mcts.get_statistics().iterations, 500);
        check_visit_counts(tree, tree.root());

        // Every iteration ends in one expansion until the tree runs out of moves
        assert!(tree.len() <= 501);
        assert_eq!(mcts.get_statistics().tree_size, tree.len());
    }
}

#[test]
fn test_random_expansion_can_pick_any_untried_column() {
    let mut seen = [false; 7];

    for seed in 0..200 {
        let mut tree = SearchTree::new(Board::new());
        let root = tree.root();
        let mut rng = StdRng::seed_from_u64(seed);

        let child = tree.expand_random(root, &mut rng).unwrap().unwrap();
        let column = tree.get(child).action.unwrap();
        seen[column] = true;
    }

    assert!(seen.iter().all(|&s| s), "columns picked: {:?}", seen);
}
