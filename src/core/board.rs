use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::utils::{GameError, GameResult};

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    pub kind: LineKind,
    pub player: Player,
    pub cells: Vec<(usize, usize)>,
}

impl WinningLine {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

// Row-major: cells[row * size + col]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize) -> GameResult<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::invalid_configuration(format!(
                "board size must be between {} and {}, got {}",
                MIN_SIZE, MAX_SIZE, size
            )));
        }

        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|index| self.cells[index])
    }

    pub fn place(&mut self, row: usize, col: usize, player: Player) -> GameResult<()> {
        let index = self.index(row, col).ok_or(GameError::OutOfBounds {
            row,
            col,
            size: self.size,
        })?;

        if !self.cells[index].is_empty() {
            return Err(GameError::CellOccupied { row, col });
        }

        self.cells[index] = player.to_cell();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winning_line().map(|line| line.player)
    }

    // Rows, then columns, then the main and anti diagonals
    pub fn winning_line(&self) -> Option<WinningLine> {
        let n = self.size;

        (0..n)
            .map(LineKind::Row)
            .chain((0..n).map(LineKind::Column))
            .chain([LineKind::MainDiagonal, LineKind::AntiDiagonal])
            .find_map(|kind| {
                let cells = self.line_cells(kind);
                self.line_owner(&cells).map(|player| WinningLine { kind, player, cells })
            })
    }

    fn line_cells(&self, kind: LineKind) -> Vec<(usize, usize)> {
        let n = self.size;
        match kind {
            LineKind::Row(row) => (0..n).map(|col| (row, col)).collect(),
            LineKind::Column(col) => (0..n).map(|row| (row, col)).collect(),
            LineKind::MainDiagonal => (0..n).map(|i| (i, i)).collect(),
            LineKind::AntiDiagonal => (0..n).map(|i| (i, n - 1 - i)).collect(),
        }
    }

    fn line_owner(&self, cells: &[(usize, usize)]) -> Option<Player> {
        let (&(row, col), rest) = cells.split_first()?;
        let first = self.cells[row * self.size + col];
        let player = first.player()?;

        rest.iter()
            .all(|&(r, c)| self.cells[r * self.size + c] == first)
            .then_some(player)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }
}
