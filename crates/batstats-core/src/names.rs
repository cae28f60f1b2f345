// Resolve ranked player ids to display names from the master table.

use crate::config::{FieldMap, Role};
use crate::error::{StatsError, StatsResult};
use crate::rank::ScoredPlayer;
use crate::table::{cell, CsvTable, TableError, TableSource};
use serde::Serialize;
use std::fmt;

/// A ranked player with a resolved name.
///
/// Displays as `"<score to 3 places> --- <First> <Last>"`. The score is
/// rounded half-to-even on its exact binary value, so 0.0625 renders as
/// `0.062` and 0.3005 (stored slightly below) as `0.300`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub player_id: String,
    pub first: String,
    pub last: String,
    pub score: f64,
}

impl fmt::Display for RankedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} --- {} {}", self.score, self.first, self.last)
    }
}

/// Attach first and last names from `master` to each ranked entry,
/// preserving rank order.
pub fn resolve_players_in<M: TableSource + ?Sized>(
    info: &FieldMap,
    master: &M,
    ranked: &[ScoredPlayer],
) -> StatsResult<Vec<RankedPlayer>> {
    info.require(&[Role::PlayerId, Role::FirstName, Role::LastName])?;
    let first_column = info.column(Role::FirstName)?;
    let last_column = info.column(Role::LastName)?;

    // A master row without the id column is a lookup failure, not a source one.
    let lookup = master
        .keyed_by(info.column(Role::PlayerId)?)
        .map_err(|e| match e {
            TableError::MissingKey { key, .. } => StatsError::MissingColumn { column: key },
            other => StatsError::Source(other),
        })?;

    ranked
        .iter()
        .map(|entry| -> StatsResult<RankedPlayer> {
            let person = lookup
                .get(&entry.player_id)
                .ok_or_else(|| StatsError::UnknownPlayer {
                    player_id: entry.player_id.clone(),
                })?;
            Ok(RankedPlayer {
                player_id: entry.player_id.clone(),
                first: cell(person, first_column)?.to_string(),
                last: cell(person, last_column)?.to_string(),
                score: entry.score,
            })
        })
        .collect()
}

/// [`resolve_players_in`] against the master file named by the field map.
pub fn resolve_players(info: &FieldMap, ranked: &[ScoredPlayer]) -> StatsResult<Vec<RankedPlayer>> {
    let master = CsvTable::master(info)?;
    resolve_players_in(info, &master, ranked)
}

/// Format ranked entries as `"x.xxx --- First Last"` lines using the master
/// file named by the field map.
pub fn lookup_player_names(info: &FieldMap, ranked: &[ScoredPlayer]) -> StatsResult<Vec<String>> {
    Ok(resolve_players(info, ranked)?
        .iter()
        .map(ToString::to_string)
        .collect())
}
