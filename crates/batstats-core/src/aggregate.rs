// Career aggregation: one summed record per player.

use crate::error::{StatsError, StatsResult};
use crate::table::{cell, parse_int, Row};
use std::collections::HashMap;
use tracing::debug;

/// Sum `fields` across all rows of each player.
///
/// Each output record holds the player id under `player_column` plus one
/// entry per summed field, rendered back to text so it reads like any other
/// row. Players appear in order of first appearance.
pub fn aggregate_by_player_id<'a, I, S>(
    rows: I,
    player_column: &str,
    fields: &[S],
) -> StatsResult<Vec<Row>>
where
    I: IntoIterator<Item = &'a Row>,
    S: AsRef<str>,
{
    let mut order: Vec<(String, Vec<i64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let pid = cell(row, player_column)?;
        let slot = match index.get(pid) {
            Some(&slot) => slot,
            None => {
                index.insert(pid.to_string(), order.len());
                order.push((pid.to_string(), vec![0; fields.len()]));
                order.len() - 1
            }
        };
        let totals = &mut order[slot].1;
        for (total, field) in totals.iter_mut().zip(fields) {
            let field = field.as_ref();
            let value = parse_int(row, field)?;
            *total = total.checked_add(value).ok_or_else(|| StatsError::Parse {
                column: field.to_string(),
                raw: value.to_string(),
                message: "career total overflows a 64-bit integer".to_string(),
            })?;
        }
    }

    debug!("aggregated {} players", order.len());

    Ok(order
        .into_iter()
        .map(|(pid, totals)| {
            let mut record = Row::with_capacity(fields.len() + 1);
            record.insert(player_column.to_string(), pid);
            for (field, total) in fields.iter().zip(totals) {
                record.insert(field.as_ref().to_string(), total.to_string());
            }
            record
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(id: &str, ab: &str, h: &str, team: &str) -> Row {
        [("playerID", id), ("AB", ab), ("H", h), ("teamID", team)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sums_per_player_in_first_appearance_order() {
        let rows = vec![
            season("p2", "100", "30", "NYA"),
            season("p1", "300", "90", "BOS"),
            season("p2", "200", "70", "NYA"),
            season("p1", "250", "80", "CHA"),
            season("p3", "10", "1", "SEA"),
        ];
        let agg = aggregate_by_player_id(&rows, "playerID", &["AB", "H"]).unwrap();
        assert_eq!(agg.len(), 3);

        assert_eq!(agg[0]["playerID"], "p2");
        assert_eq!(agg[0]["AB"], "300");
        assert_eq!(agg[0]["H"], "100");

        assert_eq!(agg[1]["playerID"], "p1");
        assert_eq!(agg[1]["AB"], "550");
        assert_eq!(agg[1]["H"], "170");

        assert_eq!(agg[2]["playerID"], "p3");
    }

    #[test]
    fn only_id_and_summed_fields_are_kept() {
        let rows = vec![season("p1", "300", "90", "BOS")];
        let agg = aggregate_by_player_id(&rows, "playerID", &["AB"]).unwrap();
        assert_eq!(agg[0].len(), 2);
        assert!(!agg[0].contains_key("teamID"));
        assert!(!agg[0].contains_key("H"));
    }

    #[test]
    fn empty_input_and_empty_fields() {
        let rows: Vec<Row> = Vec::new();
        let fields: [&str; 0] = [];
        assert!(aggregate_by_player_id(&rows, "playerID", &["AB"]).unwrap().is_empty());

        let rows = vec![season("p1", "300", "90", "BOS")];
        let agg = aggregate_by_player_id(&rows, "playerID", &fields).unwrap();
        assert_eq!(agg[0].len(), 1);
    }

    #[test]
    fn non_integer_field_is_parse_error() {
        let rows = vec![season("p1", "300.5", "90", "BOS")];
        let err = aggregate_by_player_id(&rows, "playerID", &["AB"]).unwrap_err();
        assert!(matches!(err, StatsError::Parse { .. }));
    }

    #[test]
    fn missing_player_column_is_lookup_error() {
        let rows = vec![season("p1", "300", "90", "BOS")];
        let err = aggregate_by_player_id(&rows, "player", &["AB"]).unwrap_err();
        assert!(err.is_lookup());
    }
}
