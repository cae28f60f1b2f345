// Season filtering.

use crate::error::StatsResult;
use crate::table::{parse_int, Row};

/// Rows whose `year_column` equals `year`, in their original order.
///
/// The year column of every row is parsed, so a non-numeric year anywhere in
/// the input fails the whole call.
pub fn filter_by_year<'a, I>(rows: I, year: i64, year_column: &str) -> StatsResult<Vec<&'a Row>>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut matching = Vec::new();
    for row in rows {
        if parse_int(row, year_column)? == year {
            matching.push(row);
        }
    }
    Ok(matching)
}
