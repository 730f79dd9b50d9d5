//! Full legal move generation.
//!
//! Dispatches to the per-piece generators for the side to move and pairs
//! every move with the position it produces. Enumeration order is fixed
//! (attacker king steps, then rook moves, each by ascending target square)
//! so seeded tie-breaking downstream is reproducible.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_king::{
    generate_attacker_king_moves, generate_defender_king_moves,
};
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// A single piece relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub side: Side,
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captures_rook: bool,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} -> {}",
            self.piece.letter(),
            self.side.letter(),
            square_label(self.from),
            square_label(self.to)
        )?;
        if self.captures_rook {
            write!(f, " takes RX")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after: Position,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl LegalMoveGenerator {
    /// Every legal move for the side to move in `position`.
    pub fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        let mut moves = Vec::with_capacity(24);
        match position.side_to_move() {
            Side::Attacker => {
                generate_attacker_king_moves(position, &mut moves);
                generate_rook_moves(position, &mut moves);
            }
            Side::Defender => generate_defender_king_moves(position, &mut moves),
        }
        moves
    }

    /// Successor positions only, in generation order.
    pub fn legal_successors(&self, position: &Position) -> Vec<Position> {
        self.generate_legal_moves(position)
            .into_iter()
            .map(|generated| generated.position_after)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LegalMoveGenerator;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_checks::is_defender_in_check;

    fn sq(file: i32, rank: i32) -> Square {
        square_from_coords(file, rank).expect("test square should be on the board")
    }

    fn every_position() -> impl Iterator<Item = Position> {
        (0u8..64).flat_map(|attacker_king| {
            (0u8..64).flat_map(move |defender_king| {
                (0u8..=64).flat_map(move |rook| {
                    let rook = (rook < 64).then_some(rook);
                    [Side::Attacker, Side::Defender].into_iter().map(move |side| {
                        Position::new(attacker_king, rook, defender_king, side)
                    })
                })
            })
        })
    }

    #[test]
    fn every_successor_of_a_legal_position_is_legal() {
        let gen = LegalMoveGenerator;
        let mut checked = 0usize;
        for position in every_position().filter(Position::is_legal) {
            for generated in gen.generate_legal_moves(&position) {
                let next = generated.position_after;
                assert!(next.is_legal(), "{position} produced illegal {next}");
                assert_eq!(next.side_to_move(), position.side_to_move().opposite());
                checked += 1;
            }
        }
        assert!(checked > 1_000_000, "only {checked} successors inspected");
    }

    #[test]
    fn generation_order_is_stable() {
        let gen = LegalMoveGenerator;
        let position = Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Attacker);
        let first = gen.generate_legal_moves(&position);
        let second = gen.generate_legal_moves(&position);
        assert_eq!(first, second);
        assert_eq!(first[0].mv.piece, PieceKind::King);
        assert_eq!(first.last().map(|m| m.mv.piece), Some(PieceKind::Rook));
    }

    #[test]
    fn lone_rook_and_centre_king_branching() {
        let gen = LegalMoveGenerator;
        // King on h1 out of the way, rook on d4 with an empty cross.
        let position = Position::new(sq(7, 0), Some(sq(3, 3)), sq(7, 7), Side::Attacker);
        let moves = gen.generate_legal_moves(&position);
        let rook_moves = moves
            .iter()
            .filter(|m| m.mv.piece == PieceKind::Rook)
            .count();
        let king_moves = moves.len() - rook_moves;
        assert_eq!(rook_moves, 14);
        assert_eq!(king_moves, 3);
    }

    #[test]
    fn rook_stops_at_its_own_king() {
        let gen = LegalMoveGenerator;
        // Rook a1, attacker king c1 shielding the defender king on e1.
        let position = Position::new(sq(2, 0), Some(sq(0, 0)), sq(4, 0), Side::Attacker);
        assert!(position.is_legal());
        let rook_targets: Vec<Square> = gen
            .generate_legal_moves(&position)
            .into_iter()
            .filter(|m| m.mv.piece == PieceKind::Rook)
            .map(|m| m.mv.to)
            .collect();
        let mut expected = vec![sq(1, 0)];
        expected.extend((1..8).map(|rank| sq(0, rank)));
        assert_eq!(rook_targets, expected);
    }

    #[test]
    fn rook_is_not_offered_to_the_defender() {
        let gen = LegalMoveGenerator;
        let position = Position::new(sq(0, 0), Some(sq(7, 3)), sq(4, 4), Side::Attacker);
        for generated in gen.generate_legal_moves(&position) {
            if generated.mv.piece == PieceKind::Rook {
                let next = generated.position_after;
                assert!(
                    chebyshev_distance(generated.mv.to, next.defender_king()) > 1,
                    "rook left hanging by {}",
                    generated.mv
                );
            }
        }
    }

    #[test]
    fn defender_captures_exposed_rook() {
        let gen = LegalMoveGenerator;
        let position = Position::new(sq(0, 0), Some(sq(5, 5)), sq(4, 4), Side::Defender);
        let capture = gen
            .generate_legal_moves(&position)
            .into_iter()
            .find(|m| m.mv.captures_rook)
            .expect("capturing the rook should be legal");
        assert_eq!(capture.mv.to, sq(5, 5));
        assert_eq!(capture.position_after.attacker_rook(), None);
        assert!(capture.position_after.is_legal());
    }

    #[test]
    fn defender_never_steps_into_check() {
        let gen = LegalMoveGenerator;
        let position = Position::new(sq(2, 5), Some(sq(7, 1)), sq(4, 4), Side::Defender);
        for next in gen.legal_successors(&position) {
            assert!(!is_defender_in_check(&next));
            assert!(chebyshev_distance(next.attacker_king(), next.defender_king()) > 1);
        }
    }
}
