//! Check and checkmate inference for kings.
//!
//! A king is mated by a single attacker when it cannot flee, no allied piece
//! can capture the attacker, and no allied piece can step between the two.
//! Knights jump, so a knight check cannot be blocked.

use log::trace;

use crate::board::Board;
use crate::pieces::{Piece, PieceKind};
use crate::position::Position;

impl Piece {
    /// Returns true if `attacker` standing on `attacker_pos` may legally
    /// capture this king on `king_pos`.
    pub fn is_in_check(
        &self,
        king_pos: Position,
        attacker_pos: Position,
        attacker: &Piece,
        board: &Board,
    ) -> bool {
        attacker.can_move(attacker_pos, king_pos, board, Some(self))
    }

    /// Returns true if this king on `king_pos` has no way out of the attack
    /// of `attacker` on `attacker_pos`.
    pub fn is_in_checkmate(
        &self,
        king_pos: Position,
        attacker_pos: Position,
        attacker: &Piece,
        board: &Board,
    ) -> bool {
        if self.can_flee(king_pos, board) {
            trace!("{self} on {king_pos} can flee");
            return false;
        }
        if self.can_capture_attacker(attacker_pos, attacker, board) {
            trace!("{attacker} on {attacker_pos} can be captured");
            return false;
        }
        if attacker.kind() != PieceKind::Knight && self.can_block_attack(king_pos, attacker_pos, board)
        {
            trace!("attack of {attacker} on {attacker_pos} can be blocked");
            return false;
        }
        true
    }

    fn can_flee(&self, king_pos: Position, board: &Board) -> bool {
        let directions = board
            .get_possible_directions(king_pos, self)
            .unwrap_or_default();

        directions
            .iter()
            .filter_map(|direction| king_pos.offset(direction.vector()).ok())
            .any(|end| self.can_move(king_pos, end, board, board.piece_at(end)))
    }

    fn can_capture_attacker(&self, attacker_pos: Position, attacker: &Piece, board: &Board) -> bool {
        board
            .pieces_of(self.color())
            .any(|(ally_pos, ally)| ally.can_move(ally_pos, attacker_pos, board, Some(attacker)))
    }

    fn can_block_attack(&self, king_pos: Position, attacker_pos: Position, board: &Board) -> bool {
        let Ok(between) = king_pos.range_between(attacker_pos) else {
            return false;
        };

        between.into_iter().any(|square| {
            board
                .pieces_of(self.color())
                .any(|(ally_pos, ally)| ally.can_move(ally_pos, square, board, None))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Color::*;
    use PieceKind::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn place(board: &mut Board, color: crate::coretypes::Color, kind: PieceKind, at: Position) -> Piece {
        let piece = Piece::new(color, kind);
        board.add_piece(piece.clone(), at).unwrap();
        piece
    }

    #[test]
    fn king_in_check_from_rook() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(4, 4));
        let rook = place(&mut board, Black, Rook, pos(4, 0));
        assert!(king.is_in_check(pos(4, 4), pos(4, 0), &rook, &board));

        place(&mut board, White, Pawn, pos(4, 2));
        assert!(!king.is_in_check(pos(4, 4), pos(4, 0), &rook, &board));
    }

    /// ```text
    ///    0   1   2   3
    /// 0 [ ] [r] [q] [r]
    /// 1 [ ] [ ] [ ] [ ]
    /// 2 [ ] [ ] [K] [ ]
    /// ```
    #[test]
    fn queen_and_rooks_mate() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(2, 2));
        let queen = place(&mut board, Black, Queen, pos(2, 0));
        place(&mut board, Black, Rook, pos(1, 0));
        place(&mut board, Black, Rook, pos(3, 0));

        assert!(king.is_in_check(pos(2, 2), pos(2, 0), &queen, &board));
        assert!(king.is_in_checkmate(pos(2, 2), pos(2, 0), &queen, &board));
    }

    #[test]
    fn open_flank_lets_king_flee() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(2, 2));
        let queen = place(&mut board, Black, Queen, pos(2, 0));
        place(&mut board, Black, Rook, pos(1, 0));

        assert!(!king.is_in_checkmate(pos(2, 2), pos(2, 0), &queen, &board));
    }

    #[test]
    fn attacker_can_be_captured() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(2, 2));
        let queen = place(&mut board, Black, Queen, pos(2, 0));
        place(&mut board, Black, Rook, pos(1, 0));
        place(&mut board, Black, Rook, pos(3, 0));
        place(&mut board, White, Bishop, pos(4, 2));

        assert!(!king.is_in_checkmate(pos(2, 2), pos(2, 0), &queen, &board));
    }

    #[test]
    fn attack_can_be_blocked() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(2, 2));
        let queen = place(&mut board, Black, Queen, pos(2, 0));
        place(&mut board, Black, Rook, pos(1, 0));
        place(&mut board, Black, Rook, pos(3, 0));
        place(&mut board, White, Rook, pos(7, 1));

        assert!(!king.is_in_checkmate(pos(2, 2), pos(2, 0), &queen, &board));
    }

    /// ```text
    ///    0   1   2
    /// 0 [K] [R] [ ]
    /// 1 [P] [P] [n]
    /// ```
    #[test]
    fn smothered_king_cannot_block_knight() {
        let mut board = Board::new();
        let king = place(&mut board, White, King, pos(0, 0));
        place(&mut board, White, Rook, pos(1, 0));
        place(&mut board, White, Pawn, pos(0, 1));
        place(&mut board, White, Pawn, pos(1, 1));
        let knight = place(&mut board, Black, Knight, pos(2, 1));

        assert!(king.is_in_check(pos(0, 0), pos(2, 1), &knight, &board));
        assert!(king.is_in_checkmate(pos(0, 0), pos(2, 1), &knight, &board));
    }
}
