use chrono::{Local, TimeZone};

use crate::{engine::Group, state::HistoryRecord};

/// One CSV row: column name and value, in column order.
pub type CsvRow = Vec<(String, String)>;

const BOM: &str = "\u{FEFF}";

/// Writes `rows` as CSV prefixed with a UTF-8 byte-order mark. The header
/// comes from the first row's column names. No rows gives an empty file.
pub fn write_csv(rows: &[CsvRow]) -> Result<Vec<u8>, csv::Error> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(BOM.as_bytes().to_vec());
    writer.write_record(first.iter().map(|(column, _)| column))?;
    for row in rows {
        writer.write_record(row.iter().map(|(_, value)| value))?;
    }
    writer.into_inner().map_err(|error| error.into_error().into())
}

/// Rows for the winner list, oldest draw numbered 1.
pub fn history_rows(history: &[HistoryRecord]) -> Vec<CsvRow> {
    history
        .iter()
        .enumerate()
        .map(|(index, record)| {
            vec![
                ("Order".to_string(), (history.len() - index).to_string()),
                ("Winner".to_string(), record.participant.name.clone()),
                ("Prize".to_string(), record.prize.name.clone()),
                ("Time".to_string(), format_timestamp(record.timestamp)),
            ]
        })
        .collect()
}

pub fn group_rows(groups: &[Group]) -> Vec<CsvRow> {
    groups
        .iter()
        .flat_map(|group| {
            group.members.iter().map(|member| {
                vec![
                    ("Group".to_string(), group.name.clone()),
                    ("Name".to_string(), member.name.clone()),
                ]
            })
        })
        .collect()
}

fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
