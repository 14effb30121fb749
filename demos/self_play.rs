//! Plays a search-driven player against a random one
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --example self_play
//! ```

use std::time::Duration;

use connect_four_mcts::{
    config::{RolloutKind, SearchConfig},
    Board, Mark, MoveSelector, Player, Strategy, TerminalResult,
};

fn main() -> Result<(), connect_four_mcts::Error> {
    // Initialize logging
    env_logger::init();

    println!("Connect Four: search (O) against random (X)");
    println!("===========================================");
    println!();

    let search = SearchConfig::default()
        .with_max_time(Duration::from_millis(500))
        .with_rollout_policy(RolloutKind::HeuristicGreedy);

    let mut players = [
        MoveSelector::new(Strategy::Search(search)),
        MoveSelector::new(Strategy::UniformRandom),
    ];

    let mut board = Board::new();
    while !board.is_terminal() {
        let selector = match board.to_move() {
            Player::A => &mut players[0],
            Player::B => &mut players[1],
        };

        let column = selector.choose_move(&board)?;
        println!(
            "{:?} ({}) plays column {}",
            board.to_move(),
            selector.strategy(),
            column
        );

        board = board.apply_move(column)?;
        println!("{}", board);
    }

    match board.terminal_status() {
        TerminalResult::Win(player) => {
            println!("{:?} wins!", player);
            print_highlight(&board);
        }
        TerminalResult::Draw => println!("The game is a draw!"),
        TerminalResult::InProgress => unreachable!("loop exits on a finished game"),
    }

    Ok(())
}

/// Shows the winning line in capitals and every other piece in lower case
fn print_highlight(board: &Board) {
    for row in board.highlight() {
        let line: String = row
            .iter()
            .map(|mark| match mark {
                Mark::Empty => '.',
                Mark::Winning(player) => player.symbol(),
                Mark::Faded(player) => player.symbol().to_ascii_lowercase(),
            })
            .collect();
        println!("{}", line);
    }
}
