use connect_four_mcts::{
    board::Board,
    config::{Budget, RolloutKind, SearchConfig},
    Error, Mcts,
};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    let config = SearchConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_rollout_policy(RolloutKind::HeuristicGreedy)
        .with_seed(77);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.budget, Budget::Iterations(5000));
    assert_eq!(config.rollout_policy, RolloutKind::HeuristicGreedy);
    assert_eq!(config.seed, Some(77));
}

#[test]
fn test_budget_setters_replace_each_other() {
    let config = SearchConfig::default()
        .with_max_iterations(10)
        .with_max_time(Duration::from_secs(2));
    assert_eq!(config.budget, Budget::Time(Duration::from_secs(2)));

    let config = config.with_budget(Budget::Iterations(3));
    assert_eq!(config.budget, Budget::Iterations(3));
}

#[test]
fn test_config_default_values() {
    let config = SearchConfig::default();

    assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert_eq!(config.budget, Budget::Iterations(10_000));
    assert_eq!(config.rollout_policy, RolloutKind::Random);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_exploration_constant_is_rejected() {
    for constant in [-1.0, f64::NAN, f64::INFINITY] {
        let config = SearchConfig::default().with_exploration_constant(constant);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Mcts::new(Board::new(), config),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    // Pure exploitation is allowed
    assert!(SearchConfig::default()
        .with_exploration_constant(0.0)
        .validate()
        .is_ok());
}
