use crate::engine::roster::tokenize;

/// Names for a quick demonstration roster.
pub const SAMPLE_NAMES: [&str; 20] = [
    "Avery", "Blake", "Casey", "Devon", "Emery", "Finley", "Gray", "Harper", "Indigo", "Jules",
    "Kai", "Logan", "Morgan", "Noel", "Oakley", "Parker", "Quinn", "Riley", "Sage", "Taylor",
];

/// Prize sequence a new draw opens with.
pub const DEFAULT_PRIZES: [(&str, u32); 2] = [("特等獎", 1), ("頭獎", 3)];

/// Names from pasted text, split on newlines and commas.
pub fn names_from_text(text: &str) -> Vec<String> {
    tokenize(text)
}

/// Names from a CSV file: every cell of every row, trimmed, empties dropped.
pub fn names_from_table(bytes: &[u8]) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(strip_bom(bytes));

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        names.extend(
            record
                .iter()
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string),
        );
    }
    Ok(names)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
