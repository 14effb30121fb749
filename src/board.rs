//! Connect Four board representation and rules.
//!
//! A [`Board`] is a value type holding one position: the 6x7 grid, the player to
//! move, the number of pieces played and the column of the last move. Row 0 is the
//! top of the board and row 5 the bottom, so pieces fall towards higher row indices.
//!
//! The terminal status of a board is computed when a piece is placed and cached on
//! the value, so [`Board::terminal_status`] is a cheap, side-effect free query.

use std::fmt;
use std::str::FromStr;

/// Number of rows on the board
pub const ROWS: usize = 6;

/// Number of columns on the board
pub const COLS: usize = 7;

/// Total number of cells, which is also the maximum number of plies in a game
pub const CELLS: usize = ROWS * COLS;

/// Score reported by [`Board::evaluate`] for a decided game
pub const WIN_SCORE: i32 = 512;

/// Number of pieces in a row needed to win
const CONNECT: usize = 4;

/// The two sides. `A` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Character used for this player's pieces in the text format
    pub fn symbol(self) -> char {
        match self {
            Player::A => 'O',
            Player::B => 'X',
        }
    }
}

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    /// Returns the owner of the piece in this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Piece(player) => Some(player),
        }
    }
}

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalResult {
    InProgress,
    Win(Player),
    Draw,
}

impl TerminalResult {
    /// Returns true once the game is decided
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalResult::InProgress)
    }

    /// Returns the winner, if the game was won
    pub fn winner(self) -> Option<Player> {
        match self {
            TerminalResult::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Presentation of a cell once the game has a winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Empty,
    /// Piece belonging to the winning line
    Winning(Player),
    /// Any other piece
    Faded(Player),
}

/// Errors returned when a move cannot be played
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// The column index is outside the board
    #[error("column {column} is out of range (expected 0..7)")]
    OutOfRange { column: usize },

    /// The column has no empty cell left
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    /// The game is already won or drawn
    #[error("the game is already over")]
    GameOver,
}

/// Errors returned when parsing a board from text
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {width} cells, expected 7")]
    RowWidth { row: usize, width: usize },

    #[error("unrecognised cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("piece at row {row}, column {col} is not supported from below")]
    FloatingPiece { row: usize, col: usize },

    #[error("piece counts A={a}, B={b} cannot arise from alternating play")]
    PieceCount { a: usize, b: usize },

    #[error("both players have four in a row")]
    MultipleWinners,

    #[error("{winner:?} has four in a row but {last:?} moved last")]
    MoveAfterWin { winner: Player, last: Player },
}

/// A Connect Four position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    to_move: Player,
    played_moves: usize,
    last_move: Option<usize>,
    status: TerminalResult,
    winning_line: Option<[(usize, usize); CONNECT]>,
}

impl Board {
    /// Creates an empty board with player A to move
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            to_move: Player::A,
            played_moves: 0,
            last_move: None,
            status: TerminalResult::InProgress,
            winning_line: None,
        }
    }

    /// Replays a sequence of columns from the empty board
    pub fn from_moves(columns: &[usize]) -> Result<Self, IllegalMoveError> {
        let mut board = Board::new();
        for &column in columns {
            board.play(column)?;
        }
        Ok(board)
    }

    /// Returns the cell at `(row, col)`, row 0 being the top
    ///
    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Returns the full grid
    pub fn cells(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Returns the player whose turn it is
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the number of pieces on the board
    pub fn played_moves(&self) -> usize {
        self.played_moves
    }

    /// Returns the column of the last piece played
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Returns true if `column` has no empty cell left (or does not exist)
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= COLS || self.cells[0][column] != Cell::Empty
    }

    /// Columns whose top cell is empty, in ascending order
    ///
    /// This only reflects the geometry of the grid. A decided game may still have
    /// open columns; [`Board::play`] refuses them with [`IllegalMoveError::GameOver`].
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Columns that can actually be played: open columns of an undecided game
    pub fn playable_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.legal_moves()
    }

    /// Returns a new board with the current player's piece dropped in `column`
    pub fn apply_move(&self, column: usize) -> Result<Board, IllegalMoveError> {
        let mut next = self.clone();
        next.play(column)?;
        Ok(next)
    }

    /// Drops the current player's piece in `column` in place
    ///
    /// Returns the row the piece landed in. On error the board is unchanged.
    pub fn play(&mut self, column: usize) -> Result<usize, IllegalMoveError> {
        if self.status.is_terminal() {
            return Err(IllegalMoveError::GameOver);
        }
        if column >= COLS {
            return Err(IllegalMoveError::OutOfRange { column });
        }
        let row = self
            .landing_row(column)
            .ok_or(IllegalMoveError::ColumnFull { column })?;

        self.cells[row][column] = Cell::Piece(self.to_move);
        self.played_moves += 1;
        self.last_move = Some(column);
        self.to_move = self.to_move.opponent();
        self.refresh_status();

        Ok(row)
    }

    /// Returns the cached outcome of this position
    pub fn terminal_status(&self) -> TerminalResult {
        self.status
    }

    /// Returns true if the game is won or drawn
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Coordinates `(row, col)` of the reported winning line
    pub fn winning_line(&self) -> Option<[(usize, usize); CONNECT]> {
        self.winning_line
    }

    /// Returns true if `player` dropping a piece in `column` would complete four
    ///
    /// The board is not modified and the turn order is ignored, so this answers the
    /// question for either side.
    pub fn would_win(&self, column: usize, player: Player) -> bool {
        if column >= COLS {
            return false;
        }
        let Some(row) = self.landing_row(column) else {
            return false;
        };
        let piece = Cell::Piece(player);

        [(0, 1), (1, 0), (1, 1), (1, -1)].iter().any(|&(dr, dc)| {
            1 + self.run_length(row, column, dr, dc, piece)
                + self.run_length(row, column, -dr, -dc, piece)
                >= CONNECT
        })
    }

    /// Presentation transform highlighting the winning line
    ///
    /// Every piece on the winning line is reported as [`Mark::Winning`], all other
    /// pieces as [`Mark::Faded`]. Without a winner every piece is faded.
    pub fn highlight(&self) -> [[Mark; COLS]; ROWS] {
        let mut marks = [[Mark::Empty; COLS]; ROWS];

        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                marks[row][col] = match cell.owner() {
                    None => Mark::Empty,
                    Some(player) if self.on_winning_line(row, col) => Mark::Winning(player),
                    Some(player) => Mark::Faded(player),
                };
            }
        }

        marks
    }

    /// Static positional score from `perspective`'s point of view
    ///
    /// Each window of four cells holding pieces of one player only is worth 1, 10
    /// or 50 for one, two or three pieces. A won game scores [`WIN_SCORE`] outright.
    pub fn evaluate(&self, perspective: Player) -> i32 {
        match self.status {
            TerminalResult::Win(winner) if winner == perspective => return WIN_SCORE,
            TerminalResult::Win(_) => return -WIN_SCORE,
            TerminalResult::Draw => return 0,
            TerminalResult::InProgress => {}
        }

        windows()
            .map(|window| {
                let mut own = 0;
                let mut other = 0;
                for (row, col) in window {
                    match self.cells[row][col].owner() {
                        Some(p) if p == perspective => own += 1,
                        Some(_) => other += 1,
                        None => {}
                    }
                }
                match (own, other) {
                    (n, 0) => window_score(n),
                    (0, n) => -window_score(n),
                    _ => 0,
                }
            })
            .sum()
    }

    fn on_winning_line(&self, row: usize, col: usize) -> bool {
        self.winning_line
            .map_or(false, |line| line.contains(&(row, col)))
    }

    fn has_line(&self, player: Player) -> bool {
        let piece = Cell::Piece(player);
        windows().any(|window| window.iter().all(|&(r, c)| self.cells[r][c] == piece))
    }

    fn landing_row(&self, column: usize) -> Option<usize> {
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][column] == Cell::Empty)
    }

    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, piece: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == piece
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn refresh_status(&mut self) {
        if let Some((winner, line)) = self.find_winning_line() {
            self.status = TerminalResult::Win(winner);
            self.winning_line = Some(line);
        } else if self.played_moves == CELLS {
            self.status = TerminalResult::Draw;
        } else {
            self.status = TerminalResult::InProgress;
        }
    }

    fn find_winning_line(&self) -> Option<(Player, [(usize, usize); CONNECT])> {
        windows().find_map(|window| {
            let (r0, c0) = window[0];
            let owner = self.cells[r0][c0].owner()?;
            window[1..]
                .iter()
                .all(|&(r, c)| self.cells[r][c] == Cell::Piece(owner))
                .then_some((owner, window))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn window_score(pieces: usize) -> i32 {
    match pieces {
        1 => 1,
        2 => 10,
        3 => 50,
        _ => 0,
    }
}

/// Every line of four cells, in scan order: horizontal (rows top to bottom, then
/// columns left to right), vertical, down-right diagonals, up-right diagonals.
fn windows() -> impl Iterator<Item = [(usize, usize); CONNECT]> {
    let horizontal = (0..ROWS).flat_map(|r| (0..=COLS - CONNECT).map(move |c| line(r, c, 0, 1)));
    let vertical = (0..=ROWS - CONNECT).flat_map(|r| (0..COLS).map(move |c| line(r, c, 1, 0)));
    let diagonal =
        (0..=ROWS - CONNECT).flat_map(|r| (0..=COLS - CONNECT).map(move |c| line(r, c, 1, 1)));
    let anti_diagonal =
        (CONNECT - 1..ROWS).flat_map(|r| (0..=COLS - CONNECT).map(move |c| line(r, c, -1, 1)));

    horizontal
        .chain(vertical)
        .chain(diagonal)
        .chain(anti_diagonal)
}

fn line(row: usize, col: usize, dr: isize, dc: isize) -> [(usize, usize); CONNECT] {
    std::array::from_fn(|k| {
        (
            (row as isize + dr * k as isize) as usize,
            (col as isize + dc * k as isize) as usize,
        )
    })
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Piece(player) => player.symbol(),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses six lines of seven cells. `.` or `-` is empty, `O`/`A` is player A and
/// `X`/`B` is player B. Blank lines and surrounding whitespace are ignored.
///
/// Gravity, piece counts and the winner are checked: at most one player may have
/// four in a row, and that player must have placed the last piece. Full move
/// history reachability is not checked.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        let (mut a, mut b) = (0, 0);

        for (row, text) in rows.iter().enumerate() {
            let width = text.chars().count();
            if width != COLS {
                return Err(ParseBoardError::RowWidth { row, width });
            }
            for (col, ch) in text.chars().enumerate() {
                board.cells[row][col] = match ch.to_ascii_uppercase() {
                    '.' | '-' => Cell::Empty,
                    'O' | 'A' => {
                        a += 1;
                        Cell::Piece(Player::A)
                    }
                    'X' | 'B' => {
                        b += 1;
                        Cell::Piece(Player::B)
                    }
                    _ => return Err(ParseBoardError::InvalidCell { row, col, ch }),
                };
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(ParseBoardError::FloatingPiece { row, col });
                }
            }
        }

        board.to_move = if a == b {
            Player::A
        } else if a == b + 1 {
            Player::B
        } else {
            return Err(ParseBoardError::PieceCount { a, b });
        };
        board.played_moves = a + b;

        let last = board.to_move.opponent();
        match (board.has_line(Player::A), board.has_line(Player::B)) {
            (true, true) => return Err(ParseBoardError::MultipleWinners),
            (true, false) if last != Player::A => {
                return Err(ParseBoardError::MoveAfterWin { winner: Player::A, last })
            }
            (false, true) if last != Player::B => {
                return Err(ParseBoardError::MoveAfterWin { winner: Player::B, last })
            }
            _ => {}
        }
        board.refresh_status();

        Ok(board)
    }
}
