// Season and career leaderboards: load, filter or aggregate, rank, resolve names.

use crate::aggregate::aggregate_by_player_id;
use crate::config::{FieldMap, Role};
use crate::error::StatsResult;
use crate::filter::filter_by_year;
use crate::metrics::Metric;
use crate::names::{resolve_players_in, RankedPlayer};
use crate::rank::top_player_ids;
use crate::table::{CsvTable, TableSource};
use tracing::{debug, info};

const NAME_ROLES: [Role; 3] = [Role::PlayerId, Role::FirstName, Role::LastName];

/// Top `num_players` for a single season, read from the field map's files.
pub fn compute_top_stats_year(
    info: &FieldMap,
    metric: Metric,
    num_players: usize,
    year: i64,
) -> StatsResult<Vec<String>> {
    let batting = CsvTable::batting(info)?;
    let master = CsvTable::master(info)?;
    let players = top_stats_year_from(info, &batting, &master, metric, num_players, year)?;
    Ok(players.iter().map(ToString::to_string).collect())
}

/// Top `num_players` by career totals, read from the field map's files.
pub fn compute_top_stats_career(
    info: &FieldMap,
    metric: Metric,
    num_players: usize,
) -> StatsResult<Vec<String>> {
    let batting = CsvTable::batting(info)?;
    let master = CsvTable::master(info)?;
    let players = top_stats_career_from(info, &batting, &master, metric, num_players)?;
    Ok(players.iter().map(ToString::to_string).collect())
}

/// Season leaderboard over explicit batting and master tables.
pub fn top_stats_year_from<B, M>(
    info: &FieldMap,
    batting: &B,
    master: &M,
    metric: Metric,
    num_players: usize,
    year: i64,
) -> StatsResult<Vec<RankedPlayer>>
where
    B: TableSource + ?Sized,
    M: TableSource + ?Sized,
{
    info.require(metric.required_roles())?;
    info.require(&NAME_ROLES)?;
    info.require(&[Role::YearId])?;

    let stats = batting.rows()?;
    let yearly = filter_by_year(&stats, year, info.column(Role::YearId)?)?;
    debug!("{} of {} rows are from {}", yearly.len(), stats.len(), year);

    let top = top_player_ids(info, yearly, |i, r| metric.score(i, r), num_players)?;
    let players = resolve_players_in(info, master, &top)?;
    info!("{} leaders for {}: {} players", metric, year, players.len());
    Ok(players)
}

/// Career leaderboard over explicit batting and master tables. Seasons are
/// summed over the field map's `batting_fields` before scoring.
pub fn top_stats_career_from<B, M>(
    info: &FieldMap,
    batting: &B,
    master: &M,
    metric: Metric,
    num_players: usize,
) -> StatsResult<Vec<RankedPlayer>>
where
    B: TableSource + ?Sized,
    M: TableSource + ?Sized,
{
    info.require(metric.required_roles())?;
    info.require(&NAME_ROLES)?;
    let fields = info.batting_fields()?;

    let stats = batting.rows()?;
    let careers = aggregate_by_player_id(&stats, info.column(Role::PlayerId)?, fields)?;
    debug!("{} season rows folded into {} careers", stats.len(), careers.len());

    let top = top_player_ids(info, &careers, |i, r| metric.score(i, r), num_players)?;
    let players = resolve_players_in(info, master, &top)?;
    info!("career {} leaders: {} players", metric, players.len());
    Ok(players)
}
