//! Scenario file parsing.
//!
//! One scenario per line:
//!
//! ```text
//! # comment
//! corner: x.K(1,1) x.R(1,8) y.K(5,5)
//! x.k(a,1) x.r(h,2) y.k(e,5)
//! ```
//!
//! The optional leading `name:` token labels the case; unnamed lines are
//! called `case <line>`. Placements are `<side>.<piece>(<file>,<rank>)` with
//! case-insensitive letters and 1-based coordinates. The parser only checks
//! syntax and piece counts; the position itself is validated by the caller.
//! A malformed line yields an error for that line only, so the remaining
//! cases can still be played.

use std::fs;
use std::path::Path;

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;
use crate::utils::notation::parse_square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    /// 1-based line number in the source text.
    pub line: usize,
    /// Attacker to move, as every game starts.
    pub position: Position,
}

/// Read `path` and parse every case in it. Only failing to read the file is
/// an error here; per-line failures are in the returned list.
pub fn load_scenarios(path: &Path) -> EndgameResult<Vec<EndgameResult<Scenario>>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_scenarios(&text))
}

/// One entry per non-blank, non-comment line, in file order.
pub fn parse_scenarios(text: &str) -> Vec<EndgameResult<Scenario>> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| parse_scenario_line(line, line_no))
        .collect()
}

pub fn parse_scenario_line(line: &str, line_no: usize) -> EndgameResult<Scenario> {
    let syntax = |reason: String| EndgameError::ScenarioSyntax {
        line: line_no,
        reason,
    };

    let mut tokens = line.split_whitespace().peekable();
    let name = match tokens.peek() {
        Some(first) if first.ends_with(':') => {
            let name = first.trim_end_matches(':').to_owned();
            tokens.next();
            name
        }
        _ => format!("case {line_no}"),
    };

    let mut attacker_king = None;
    let mut attacker_rook = None;
    let mut defender_king = None;

    for token in tokens {
        let (side, piece, square) = parse_placement(token).map_err(&syntax)?;
        let slot = match (side, piece) {
            (Side::Attacker, PieceKind::King) => &mut attacker_king,
            (Side::Attacker, PieceKind::Rook) => &mut attacker_rook,
            (Side::Defender, PieceKind::King) => &mut defender_king,
            (Side::Defender, PieceKind::Rook) => {
                return Err(syntax(format!(
                    "player Y can only be assigned a king, got '{token}'"
                )))
            }
        };
        if slot.replace(square).is_some() {
            return Err(syntax(format!("'{token}' places a piece twice")));
        }
    }

    match (attacker_king, attacker_rook, defender_king) {
        (Some(ak), Some(rook), Some(dk)) => Ok(Scenario {
            name,
            line: line_no,
            position: Position::new(ak, Some(rook), dk, Side::Attacker),
        }),
        _ => Err(syntax(
            "expected one each of x.K, x.R and y.K".to_owned(),
        )),
    }
}

/// `x.K(1,2)` into its parts.
fn parse_placement(token: &str) -> Result<(Side, PieceKind, Square), String> {
    let usage = || format!("incorrect syntax '{token}', expected e.g. x.K(2,4)");

    let (owner, rest) = token.split_once('.').ok_or_else(usage)?;
    let side = match owner.to_ascii_uppercase().as_str() {
        "X" => Side::Attacker,
        "Y" => Side::Defender,
        _ => return Err(usage()),
    };

    let mut chars = rest.chars();
    let piece = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('K') => PieceKind::King,
        Some('R') => PieceKind::Rook,
        _ => return Err(usage()),
    };

    let coords = chars.as_str();
    if !coords.starts_with('(') {
        return Err(usage());
    }
    let square = parse_square(coords).map_err(|err| err.to_string())?;
    Ok((side, piece, square))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i32, rank: i32) -> Square {
        square_from_coords(file, rank).expect("test square should be on the board")
    }

    #[test]
    fn parses_named_and_unnamed_cases() {
        let text = "\
# opening cases
corner: x.K(1,1) x.R(1,8) y.K(5,5)

X.k(a,2) y.K(e,5) x.r(h,1)
";
        let scenarios = parse_scenarios(text)
            .into_iter()
            .collect::<EndgameResult<Vec<_>>>()
            .expect("file should parse");
        assert_eq!(scenarios.len(), 2);

        assert_eq!(scenarios[0].name, "corner");
        assert_eq!(scenarios[0].line, 2);
        assert_eq!(
            scenarios[0].position,
            Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Attacker)
        );

        assert_eq!(scenarios[1].name, "case 4");
        assert_eq!(
            scenarios[1].position,
            Position::new(sq(0, 1), Some(sq(7, 0)), sq(4, 4), Side::Attacker)
        );
    }

    #[test]
    fn errors_carry_the_line_number() {
        let text = "ok: x.K(1,1) x.R(1,8) y.K(5,5)\n\nbad: x.K(1,1) y.R(1,8) y.K(5,5)\n";
        let mut results = parse_scenarios(text);
        assert_eq!(results.len(), 2);
        let err = results
            .pop()
            .expect("second case should be present")
            .expect_err("defender rook is not allowed");
        match err {
            EndgameError::ScenarioSyntax { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("only be assigned a king"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bad_line_does_not_hide_later_cases() {
        let text = "bad: x.K(1,1) x.Q(2,2) y.K(5,5)\ngood: x.K(1,1) x.R(1,8) y.K(5,5)\n";
        let results = parse_scenarios(text);
        assert_eq!(results.len(), 2);

        assert!(matches!(
            results[0],
            Err(EndgameError::ScenarioSyntax { line: 1, .. })
        ));
        let good = results[1].as_ref().expect("valid case should still load");
        assert_eq!(good.name, "good");
        assert_eq!(good.line, 2);
        assert_eq!(
            good.position,
            Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Attacker)
        );
    }

    #[test]
    fn rejects_malformed_placements() {
        for line in [
            "x.K(1,1) x.R(1,8)",
            "x.K(1,1) x.R(1,8) y.K(5,5) x.K(2,2)",
            "x.K(1,1) x.R(1,9) y.K(5,5)",
            "x.Q(1,1) x.R(1,8) y.K(5,5)",
            "z.K(1,1) x.R(1,8) y.K(5,5)",
            "x.K11 x.R(1,8) y.K(5,5)",
        ] {
            assert!(
                matches!(
                    parse_scenario_line(line, 7),
                    Err(EndgameError::ScenarioSyntax { line: 7, .. })
                ),
                "{line}"
            );
        }
    }
}
