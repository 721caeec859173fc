//! CSV upload decoding.
//!
//! The header row names the columns; each later row is one measurement for
//! the entity in its `id` column. Columns may appear in any order and extra
//! columns are ignored.

use ccm_core::entities::Measurement;
use ccm_core::timestamp::parse_timestamp;
use csv::StringRecord;

use crate::IngestError;
use crate::batch::ParsedFile;

const ID_COLUMNS: &[&str] = &["id", "reportingEntity", "reporting_entity"];
const START_COLUMNS: &[&str] = &["periodStart", "period_start"];
const END_COLUMNS: &[&str] = &["periodEnd", "period_end"];
const MEASURE_COLUMNS: &[&str] = &["measure"];
const UNIT_COLUMNS: &[&str] = &["unit"];
const VALUE_COLUMNS: &[&str] = &["value"];

/// Positions of the required columns in the header.
struct ColumnMap {
    id: usize,
    start: usize,
    end: usize,
    measure: usize,
    unit: usize,
    value: usize,
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| names.contains(&h))
        .ok_or_else(|| IngestError::Parse(format!("missing column '{}'", names[0])))
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        Ok(Self {
            id: find_column(headers, ID_COLUMNS)?,
            start: find_column(headers, START_COLUMNS)?,
            end: find_column(headers, END_COLUMNS)?,
            measure: find_column(headers, MEASURE_COLUMNS)?,
            unit: find_column(headers, UNIT_COLUMNS)?,
            value: find_column(headers, VALUE_COLUMNS)?,
        })
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, line: u64) -> Result<&'r str, IngestError> {
    record
        .get(idx)
        .ok_or_else(|| IngestError::Parse(format!("line {line}: missing field {idx}")))
}

fn parse_measurement(
    record: &StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> Result<Measurement, IngestError> {
    let at_line = |e: &dyn std::fmt::Display| IngestError::Parse(format!("line {line}: {e}"));

    let raw = field(record, columns.value, line)?;
    let value = raw
        .parse::<f64>()
        .map_err(|e| at_line(&format!("invalid value '{raw}': {e}")))?;
    if !value.is_finite() {
        return Err(at_line(&format!("value '{raw}' is not a finite number")));
    }
    Ok(Measurement {
        period_start: parse_timestamp(field(record, columns.start, line)?).map_err(|e| at_line(&e))?,
        period_end: parse_timestamp(field(record, columns.end, line)?).map_err(|e| at_line(&e))?,
        measure: field(record, columns.measure, line)?.to_string(),
        unit: field(record, columns.unit, line)?.to_string(),
        value,
    })
}

/// Decode a tabular upload.
///
/// # Errors
///
/// Returns `IngestError::Parse` for a missing required column, a short row,
/// an unparsable timestamp, or a value that is not a finite number.
pub fn parse_tabular(bytes: &[u8]) -> Result<ParsedFile, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Parse(format!("failed to read CSV header: {e}")))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut parsed = ParsedFile::default();
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| IngestError::Parse(format!("failed to read CSV record: {e}")))?
    {
        let line = record.position().map_or(0, csv::Position::line);
        let entity_id = record.get(columns.id).unwrap_or_default();
        if entity_id.is_empty() {
            tracing::warn!(line, "tabular row without entity id skipped");
            parsed.skipped += 1;
            continue;
        }
        let measurement = parse_measurement(&record, &columns, line)?;
        parsed.push(entity_id, measurement);
    }

    Ok(parsed)
}
