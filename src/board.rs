//! Board geometry and board states reconstructed from move paths.
//!
//! Moves identify cells by a single [MoveIndex] in `[0, n^d)`.
//! [BoardGeometry] maps between move indices and cell coordinates, and
//! [BoardState] holds the cells occupied by each player after a sequence
//! of moves.
//!
//! # Coordinate convention
//! The first coordinate is the least significant:
//! * 2D: cell `(i, j)` (column, row) is move `j*n + i`
//! * 3D: cell `(i, j, k)` (column, row, layer) is move `k*n*n + j*n + i`
//!
//! The same convention is used in both directions, see
//! [cell_index](BoardGeometry::cell_index) and
//! [coordinates](BoardGeometry::coordinates).

use crate::model::MoveIndex;
use std::collections::BTreeSet;
use std::fmt;

// =#========================================================================#=
// PLAYER
// =#========================================================================#=
/// One of the two players; X moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the player making the move at the given ply (0-based):
    /// X on even plies, O on odd plies.
    pub fn for_ply(ply: usize) -> Self {
        if ply % 2 == 0 { Player::X } else { Player::O }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

// =#========================================================================#=
// BOARD GEOMETRY
// =#========================================================================$=
/// Shape of the board: `extent` cells per edge in `dimension` axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    extent: usize,
    dimension: usize,
}

impl BoardGeometry {
    pub fn new(extent: usize, dimension: usize) -> Self {
        BoardGeometry { extent, dimension }
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the number of cells, `n^d` (saturating).
    pub fn num_cells(&self) -> usize {
        u32::try_from(self.dimension)
            .map(|d| self.extent.saturating_pow(d))
            .unwrap_or(usize::MAX)
    }

    /// Returns whether `mv` identifies a cell of this board.
    pub fn contains(&self, mv: MoveIndex) -> bool {
        mv < self.num_cells()
    }

    /// Returns the move index of the cell at `coords`.
    ///
    /// # Returns
    /// `None` if the number of coordinates differs from the dimension
    /// or a coordinate is not below the extent.
    pub fn cell_index(&self, coords: &[usize]) -> Option<MoveIndex> {
        if coords.len() != self.dimension {
            return None;
        }
        let mut index: MoveIndex = 0;
        for &coord in coords.iter().rev() {
            if coord >= self.extent {
                return None;
            }
            index = index.checked_mul(self.extent)?.checked_add(coord)?;
        }
        Some(index)
    }

    /// Returns the coordinates of the cell identified by `mv`,
    /// or `None` if `mv` lies outside the board.
    pub fn coordinates(&self, mv: MoveIndex) -> Option<Vec<usize>> {
        if !self.contains(mv) {
            return None;
        }
        let mut rest = mv;
        let coords = (0..self.dimension)
            .map(|_| {
                let coord = rest % self.extent;
                rest /= self.extent;
                coord
            })
            .collect();
        Some(coords)
    }
}

// =#========================================================================#=
// BOARD STATE
// =#========================================================================$=
/// Cells occupied after playing a move path from the empty board.
///
/// Moves at even positions of the path are X's, moves at odd positions are
/// O's. Any cell in neither set is empty. The two sets are disjoint for
/// every path of legal play; a path reusing a cell is not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    moves: Vec<MoveIndex>,
    x_cells: BTreeSet<MoveIndex>,
    o_cells: BTreeSet<MoveIndex>,
}

impl BoardState {
    /// Creates the empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays `path` from the empty board.
    pub fn from_path(path: &[MoveIndex]) -> Self {
        let mut state = Self::new();
        for &mv in path {
            state.play(mv);
        }
        state
    }

    /// Marks `mv` for the player to move.
    pub fn play(&mut self, mv: MoveIndex) {
        match self.to_move() {
            Player::X => self.x_cells.insert(mv),
            Player::O => self.o_cells.insert(mv),
        };
        self.moves.push(mv);
    }

    /// Returns the moves played so far, in order.
    pub fn moves(&self) -> &[MoveIndex] {
        &self.moves
    }

    /// Returns the number of moves played so far.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        Player::for_ply(self.moves.len())
    }

    pub fn x_cells(&self) -> &BTreeSet<MoveIndex> {
        &self.x_cells
    }

    pub fn o_cells(&self) -> &BTreeSet<MoveIndex> {
        &self.o_cells
    }

    /// Returns the player occupying `cell`, if any.
    pub fn occupant(&self, cell: MoveIndex) -> Option<Player> {
        if self.x_cells.contains(&cell) {
            Some(Player::X)
        } else if self.o_cells.contains(&cell) {
            Some(Player::O)
        } else {
            None
        }
    }

    pub fn is_empty(&self, cell: MoveIndex) -> bool {
        self.occupant(cell).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2d_index_is_row_major() {
        let board = BoardGeometry::new(3, 2);
        assert_eq!(board.num_cells(), 9);
        assert_eq!(board.cell_index(&[1, 2]), Some(7));
        assert_eq!(board.coordinates(7), Some(vec![1, 2]));
        assert_eq!(board.cell_index(&[3, 0]), None);
        assert_eq!(board.cell_index(&[0, 0, 0]), None);
        assert_eq!(board.coordinates(9), None);
    }

    #[test]
    fn test_3d_layer_is_most_significant() {
        let board = BoardGeometry::new(4, 3);
        assert_eq!(board.num_cells(), 64);
        assert_eq!(board.cell_index(&[1, 2, 3]), Some(3 * 16 + 2 * 4 + 1));
        for mv in 0..board.num_cells() {
            let coords = board.coordinates(mv).unwrap();
            assert_eq!(board.cell_index(&coords), Some(mv));
        }
    }

    #[test]
    fn test_state_alternates_players() {
        let state = BoardState::from_path(&[4, 0, 8]);
        assert_eq!(state.occupant(4), Some(Player::X));
        assert_eq!(state.occupant(0), Some(Player::O));
        assert_eq!(state.occupant(8), Some(Player::X));
        assert!(state.is_empty(1));
        assert_eq!(state.to_move(), Player::O);
        assert_eq!(state.ply(), 3);

        let empty = BoardState::new();
        assert_eq!(empty.to_move(), Player::X);
        assert!(empty.x_cells().is_empty() && empty.o_cells().is_empty());
    }
}
