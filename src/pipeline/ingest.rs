// src/pipeline/ingest.rs

//! Tabular ingestion: untrusted CSV text into validated site records.
//!
//! The format is deliberately minimal: comma-delimited, no quoting and no
//! escaping. A field that contains a comma cannot be represented.

use std::collections::HashMap;
use std::fmt;

use crate::error::{AppError, Result};
use crate::models::{Names, SiteRecord};

const DELIMITER: char = ',';

/// Outcome of a successful parse: at least one accepted record.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Accepted records in file order
    pub records: Vec<SiteRecord>,
    /// Rows dropped for missing or non-numeric coordinates
    pub dropped: Vec<DroppedRow>,
    /// Ids that appeared more than once; the last row won
    pub duplicate_ids: Vec<String>,
    /// Ids whose prefecture is not part of their region
    pub orphan_ids: Vec<String>,
}

/// A data row that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// 1-based line number in the input text
    pub line: usize,
    pub reason: DropReason,
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    MissingCoordinate(&'static str),
    InvalidCoordinate { field: &'static str, value: String },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingCoordinate(field) => write!(f, "missing {field}"),
            DropReason::InvalidCoordinate { field, value } => {
                write!(f, "{field} is not a finite number: {value:?}")
            }
        }
    }
}

/// Column positions resolved from the header row.
struct Columns {
    id: Option<usize>,
    name_ja: Option<usize>,
    name_en: Option<usize>,
    name_zh: Option<usize>,
    prefecture: Option<usize>,
    region: Option<usize>,
    lat: Option<usize>,
    lng: Option<usize>,
    url: Option<usize>,
    gojoin_url: Option<usize>,
}

impl Columns {
    fn from_header(header: &str) -> Self {
        let names: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
        // A repeated header name maps to its last column.
        let find = |name: &str| names.iter().rposition(|h| *h == name);

        Self {
            id: find("id"),
            name_ja: find("name_ja"),
            name_en: find("name_en"),
            name_zh: find("name_zh"),
            prefecture: find("prefecture"),
            region: find("region"),
            lat: find("lat"),
            lng: find("lng"),
            url: find("url"),
            gojoin_url: find("gojoin_url"),
        }
    }
}

/// One split data row.
struct Row<'a> {
    cells: Vec<&'a str>,
}

impl<'a> Row<'a> {
    fn parse(line: &'a str) -> Self {
        Self {
            cells: line.split(DELIMITER).map(str::trim).collect(),
        }
    }

    fn get(&self, column: Option<usize>) -> Option<&'a str> {
        column.and_then(|i| self.cells.get(i).copied())
    }

    fn text(&self, column: Option<usize>) -> String {
        self.get(column).unwrap_or_default().to_string()
    }
}

/// Parse raw CSV text into records.
///
/// Fails with [`AppError::EmptyInput`] when no non-blank line exists and with
/// [`AppError::NoValidRows`] when every data row was dropped.
pub fn ingest(raw: &str) -> Result<Ingested> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = normalized
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(AppError::EmptyInput)?;
    let columns = Columns::from_header(header);

    let mut out = Ingested::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line_no, line) in lines {
        let row = Row::parse(line);
        let record = match build_record(&row, &columns) {
            Ok(record) => record,
            Err(reason) => {
                log::debug!("Dropping line {}: {}", line_no, reason);
                out.dropped.push(DroppedRow {
                    line: line_no,
                    reason,
                });
                continue;
            }
        };

        match positions.get(&record.id).copied() {
            Some(pos) => {
                log::debug!("Line {} overrides earlier row for id {:?}", line_no, record.id);
                out.duplicate_ids.push(record.id.clone());
                out.records[pos] = record;
            }
            None => {
                positions.insert(record.id.clone(), out.records.len());
                out.records.push(record);
            }
        }
    }

    if out.records.is_empty() {
        log::warn!("No valid rows ({} dropped)", out.dropped.len());
        return Err(AppError::NoValidRows {
            dropped: out.dropped.len(),
        });
    }

    out.orphan_ids = out
        .records
        .iter()
        .filter(|r| !r.is_in_taxonomy())
        .map(|r| r.id.clone())
        .collect();
    for id in &out.orphan_ids {
        log::warn!("Site {:?} has a region/prefecture pair outside the taxonomy", id);
    }

    log::info!(
        "Parsed {} record(s), dropped {} row(s)",
        out.records.len(),
        out.dropped.len()
    );
    Ok(out)
}

fn build_record(row: &Row<'_>, columns: &Columns) -> std::result::Result<SiteRecord, DropReason> {
    let latitude = parse_coordinate(row.get(columns.lat), "lat")?;
    let longitude = parse_coordinate(row.get(columns.lng), "lng")?;

    Ok(SiteRecord {
        id: row.text(columns.id),
        name: Names::new(
            row.text(columns.name_ja),
            row.text(columns.name_en),
            row.text(columns.name_zh),
        ),
        prefecture: row.text(columns.prefecture),
        region: row.text(columns.region),
        latitude,
        longitude,
        url: row.text(columns.url),
        gojoin_url: row.text(columns.gojoin_url),
    })
}

fn parse_coordinate(
    value: Option<&str>,
    field: &'static str,
) -> std::result::Result<f64, DropReason> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(DropReason::MissingCoordinate(field)),
    };
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| DropReason::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}
