// Rate statistics computed from a batting row or career aggregate.
//
// Every formula is gated on the at-bat threshold of the field map: a player
// below it scores exactly 0.0 rather than being dropped.

use crate::config::{FieldMap, Role};
use crate::error::StatsResult;
use crate::table::{parse_float, Row};
use std::fmt;
use std::str::FromStr;

/// Batting average: `H / AB`.
pub fn batting_average(info: &FieldMap, row: &Row) -> StatsResult<f64> {
    let hits = parse_float(row, info.column(Role::Hits)?)?;
    let at_bats = parse_float(row, info.column(Role::AtBats)?)?;
    if at_bats >= info.min_at_bats {
        return Ok(hits / at_bats);
    }
    Ok(0.0)
}

/// On-base percentage: `(H + BB) / (AB + BB)`.
pub fn onbase_percentage(info: &FieldMap, row: &Row) -> StatsResult<f64> {
    let hits = parse_float(row, info.column(Role::Hits)?)?;
    let at_bats = parse_float(row, info.column(Role::AtBats)?)?;
    let walks = parse_float(row, info.column(Role::Walks)?)?;
    if at_bats >= info.min_at_bats {
        return Ok((hits + walks) / (at_bats + walks));
    }
    Ok(0.0)
}

/// Slugging percentage: `(1B + 2*2B + 3*3B + 4*HR) / AB`.
///
/// Singles are derived as `H - 2B - 3B - HR` and are not checked; inconsistent
/// input can make them negative.
pub fn slugging_percentage(info: &FieldMap, row: &Row) -> StatsResult<f64> {
    let hits = parse_float(row, info.column(Role::Hits)?)?;
    let doubles = parse_float(row, info.column(Role::Doubles)?)?;
    let triples = parse_float(row, info.column(Role::Triples)?)?;
    let home_runs = parse_float(row, info.column(Role::HomeRuns)?)?;
    let singles = hits - doubles - triples - home_runs;
    let at_bats = parse_float(row, info.column(Role::AtBats)?)?;
    if at_bats >= info.min_at_bats {
        let total_bases = singles + 2.0 * doubles + 3.0 * triples + 4.0 * home_runs;
        return Ok(total_bases / at_bats);
    }
    Ok(0.0)
}

// ---------------------------------------------------------------------------
// Metric selector
// ---------------------------------------------------------------------------

/// One of the supported rate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    BattingAverage,
    OnBasePercentage,
    SluggingPercentage,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::BattingAverage,
        Metric::OnBasePercentage,
        Metric::SluggingPercentage,
    ];

    /// Field map roles the formula reads.
    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Metric::BattingAverage => &[Role::Hits, Role::AtBats],
            Metric::OnBasePercentage => &[Role::Hits, Role::AtBats, Role::Walks],
            Metric::SluggingPercentage => &[
                Role::Hits,
                Role::Doubles,
                Role::Triples,
                Role::HomeRuns,
                Role::AtBats,
            ],
        }
    }

    pub fn score(self, info: &FieldMap, row: &Row) -> StatsResult<f64> {
        match self {
            Metric::BattingAverage => batting_average(info, row),
            Metric::OnBasePercentage => onbase_percentage(info, row),
            Metric::SluggingPercentage => slugging_percentage(info, row),
        }
    }

    /// Short name accepted by [`Metric::from_str`].
    pub fn label(self) -> &'static str {
        match self {
            Metric::BattingAverage => "avg",
            Metric::OnBasePercentage => "obp",
            Metric::SluggingPercentage => "slg",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}' (expected avg, obp or slg)")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avg" => Ok(Metric::BattingAverage),
            "obp" => Ok(Metric::OnBasePercentage),
            "slg" => Ok(Metric::SluggingPercentage),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
