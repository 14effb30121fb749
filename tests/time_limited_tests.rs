use connect_four_mcts::{
    board::Board,
    config::{Budget, SearchConfig},
    Mcts,
};
use std::time::{Duration, Instant};

#[test]
fn test_time_limited_search() {
    let time_limit = Duration::from_millis(150);
    let config = SearchConfig::default().with_max_time(time_limit).with_seed(3);
    assert_eq!(config.budget, Budget::Time(time_limit));

    let mut mcts = Mcts::new(Board::new(), config).unwrap();

    let start = Instant::now();
    let column = mcts.search().unwrap();
    let elapsed = start.elapsed();

    assert!(column < 7);
    assert!(elapsed >= time_limit, "search returned after {:?}", elapsed);

    let stats = mcts.get_statistics();
    println!("Time limit: {:?}, actual time: {:?}", time_limit, elapsed);
    println!("{}", stats.summary());

    assert!(stats.stopped_by_time);
    assert!(stats.iterations > 0);
    assert!(!stats.used_fallback);
    assert_eq!(mcts.tree().get(mcts.tree().root()).visits as usize, stats.iterations);
}

#[test]
fn test_search_for_time() {
    let board = Board::from_moves(&[3, 3]).unwrap();
    let mut mcts = Mcts::new(board.clone(), SearchConfig::default()).unwrap();

    let column = mcts.search_for_time(Duration::from_millis(50)).unwrap();

    assert!(board.legal_moves().contains(&column));
    assert!(mcts.get_statistics().stopped_by_time);
    assert!(mcts.get_statistics().total_time >= Duration::from_millis(50));
}

#[test]
fn test_expired_budget_falls_back_to_random_move() {
    let board = Board::from_moves(&[3, 3]).unwrap();
    let config = SearchConfig::default().with_max_time(Duration::ZERO);
    let mut mcts = Mcts::new(board.clone(), config).unwrap();

    let column = mcts.search().unwrap();

    assert!(board.legal_moves().contains(&column));
    assert_eq!(mcts.get_statistics().iterations, 0);
    assert!(mcts.get_statistics().used_fallback);
}

#[test]
fn test_iteration_budget_overrides_time_for_one_search() {
    let config = SearchConfig::default().with_max_time(Duration::from_secs(60));
    let mut mcts = Mcts::new(Board::new(), config).unwrap();

    mcts.search_for_iterations(25).unwrap();

    assert_eq!(mcts.get_statistics().iterations, 25);
    assert!(!mcts.get_statistics().stopped_by_time);
}
