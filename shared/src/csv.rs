//! CSV export and import for the batch table
//!
//! The format is nine fixed columns, comma-joined with no quoting, so
//! notes containing commas do not survive a round trip. Import reads only
//! the drop weight, Agtron, DT, and notes columns by position and
//! renumbers ids from 1. Decoding is lenient: malformed lines are kept and
//! reported as warnings, never rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calc::{to_number, ComputedRow};
use crate::models::BatchRow;

/// Prepended to exports so spreadsheet tools detect UTF-8
pub const BOM: &str = "\u{feff}";

/// Fixed nine-column header
pub const CSV_HEADER: &str =
    "배치,투입(g),생산(g),손실(g),손실률(%),아그트론,DT(%),로스팅포인트,노트 및 설명";

const COLUMN_COUNT: usize = 9;
const COL_DROP: usize = 2;
const COL_AGTRON: usize = 5;
const COL_DEV_TIME: usize = 6;
const COL_NOTES: usize = 8;

/// Serialize computed rows to the nine-column CSV blob, BOM included.
///
/// The batch column is the row's 1-based position at export time, not its
/// stored id. Newlines in notes are flattened to spaces.
pub fn encode(items: &[ComputedRow], charge: f64) -> String {
    let mut out = String::from(BOM);
    out.push_str(CSV_HEADER);
    for (idx, item) in items.iter().enumerate() {
        let notes = item
            .source
            .notes
            .as_deref()
            .unwrap_or("")
            .replace('\n', " ");
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{:.2},{},{},{},{}",
            idx + 1,
            charge,
            item.drop_grams,
            item.loss,
            item.loss_percent,
            item.source.agtron.as_deref().unwrap_or(""),
            item.source.dev_time.as_deref().unwrap_or(""),
            item.level.label_ko(),
            notes,
        ));
    }
    out
}

/// Default export filename for a date, e.g. `roast_loss_2024-05-18.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("roast_loss_{}.csv", date.format("%Y-%m-%d"))
}

/// Result of a lenient CSV import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvImport {
    pub rows: Vec<BatchRow>,
    pub warnings: Vec<String>,
}

/// Parse an exported CSV blob back into rows.
///
/// Never fails: short lines and non-numeric drop fields are kept as-is
/// with a warning recorded, and downstream parsing degrades bad numeric
/// text to zero. An empty body yields an empty row list; replacing the
/// current table with it is the caller's decision (the session layer
/// treats it as a no-op).
pub fn decode(text: &str) -> CsvImport {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut import = CsvImport::default();

    let lines = text.lines().filter(|line| !line.is_empty());
    for (idx, line) in lines.skip(1).enumerate() {
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() != COLUMN_COUNT {
            import.warnings.push(format!(
                "row {}: expected {} columns, found {}",
                idx + 1,
                COLUMN_COUNT,
                cols.len()
            ));
        }

        let field = |i: usize| cols.get(i).copied().unwrap_or("");
        let drop_weight = field(COL_DROP).to_string();
        if !drop_weight.trim().is_empty() && to_number(&drop_weight) == 0.0 {
            let looks_like_zero = drop_weight.trim().replace(',', ".").parse::<f64>().is_ok();
            if !looks_like_zero {
                import.warnings.push(format!(
                    "row {}: drop weight {:?} is not numeric, will read as zero",
                    idx + 1,
                    drop_weight
                ));
            }
        }

        let optional = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        import.rows.push(BatchRow {
            id: (idx + 1) as u32,
            drop_weight,
            agtron: optional(field(COL_AGTRON)),
            dev_time: optional(field(COL_DEV_TIME)),
            notes: optional(field(COL_NOTES)),
        });
    }
    import
}
