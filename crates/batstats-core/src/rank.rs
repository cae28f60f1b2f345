// Top-N ranking of players by a scoring formula.

use crate::config::{FieldMap, Role};
use crate::error::StatsResult;
use crate::table::{cell, Row};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// A player id paired with its computed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlayer {
    pub player_id: String,
    pub score: f64,
}

/// Score every row with `formula` and return the `num_players` best,
/// highest score first.
///
/// The sort is stable: rows with equal scores keep their input order.
/// Ineligible players score 0.0 and can still fill the tail of the list when
/// fewer than `num_players` rows are eligible.
pub fn top_player_ids<'a, I, F>(
    info: &FieldMap,
    rows: I,
    formula: F,
    num_players: usize,
) -> StatsResult<Vec<ScoredPlayer>>
where
    I: IntoIterator<Item = &'a Row>,
    F: Fn(&FieldMap, &Row) -> StatsResult<f64>,
{
    let pid_column = info.column(Role::PlayerId)?;

    let mut scored = Vec::new();
    for row in rows {
        let score = formula(info, row)?;
        scored.push(ScoredPlayer {
            player_id: cell(row, pid_column)?.to_string(),
            score,
        });
    }
    let candidates = scored.len();

    // `sort_by` is stable, which keeps ties in input order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(num_players);

    debug!("ranked {} of {} candidates", scored.len(), candidates);
    let zero_scored = scored.iter().filter(|p| p.score == 0.0).count();
    if zero_scored > 0 {
        warn!(
            "{} of the top {} players scored 0 (likely below the at-bat threshold)",
            zero_scored,
            scored.len()
        );
    }

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::metrics::batting_average;

    fn info() -> FieldMap {
        FieldMap::lahman("data")
    }

    fn row(id: &str, ab: u32, h: u32) -> Row {
        [
            ("playerID", id.to_string()),
            ("AB", ab.to_string()),
            ("H", h.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn ids(ranked: &[ScoredPlayer]) -> Vec<&str> {
        ranked.iter().map(|p| p.player_id.as_str()).collect()
    }

    #[test]
    fn sorted_descending_and_truncated() {
        let rows = vec![
            row("low", 600, 150),
            row("high", 600, 210),
            row("mid", 600, 180),
        ];
        let ranked = top_player_ids(&info(), &rows, batting_average, 2).unwrap();
        assert_eq!(ids(&ranked), vec!["high", "mid"]);
        assert!((ranked[0].score - 0.35).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            row("a", 600, 180),
            row("b", 500, 150),
            row("top", 600, 200),
            row("c", 1000, 300),
        ];
        let ranked = top_player_ids(&info(), &rows, batting_average, 10).unwrap();
        assert_eq!(ids(&ranked), vec!["top", "a", "b", "c"]);
    }

    #[test]
    fn ineligible_players_rank_with_zero() {
        let rows = vec![
            row("short1", 100, 60),
            row("qualified", 600, 120),
            row("short2", 200, 90),
        ];
        let ranked = top_player_ids(&info(), &rows, batting_average, 3).unwrap();
        assert_eq!(ids(&ranked), vec!["qualified", "short1", "short2"]);
        assert_eq!(ranked[1].score, 0.0);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn n_larger_than_input_returns_all() {
        let rows = vec![row("a", 600, 180), row("b", 600, 190)];
        let ranked = top_player_ids(&info(), &rows, batting_average, 50).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn n_zero_returns_empty() {
        let rows = vec![row("a", 600, 180)];
        let ranked = top_player_ids(&info(), &rows, batting_average, 0).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn custom_formula_closure() {
        let rows = vec![row("a", 600, 180), row("b", 400, 190)];
        let by_hits = |info: &FieldMap, r: &Row| {
            crate::table::parse_float(r, info.column(Role::Hits)?)
        };
        let ranked = top_player_ids(&info(), &rows, by_hits, 1).unwrap();
        assert_eq!(ids(&ranked), vec!["b"]);
        assert!((ranked[0].score - 190.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_player_id_role() {
        let info = FieldMap::new()
            .with_column(Role::Hits, "H")
            .with_column(Role::AtBats, "AB");
        let rows = vec![row("a", 600, 180)];
        let err = top_player_ids(&info, &rows, batting_average, 1).unwrap_err();
        assert!(matches!(err, StatsError::Configuration { role: "playerid" }));
    }

    #[test]
    fn formula_error_aborts_ranking() {
        let mut bad = row("bad", 600, 180);
        bad.insert("H".into(), "n/a".into());
        let rows = vec![row("a", 600, 180), bad];
        let err = top_player_ids(&info(), &rows, batting_average, 1).unwrap_err();
        assert!(matches!(err, StatsError::Parse { .. }));
    }
}
