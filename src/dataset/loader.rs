//! CSV Loader
//!
//! Reads the resort table, validates every row and hands the parsed rows to
//! [`Dataset::from_resorts`] for ranking and indexing.
//!
//! Cells are read as raw bytes and decoded with the configured [`Encoding`].
//! The reference resort file is ISO-8859-1, so Latin-1 is the default.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use super::error::{DataLoadError, DataLoadResult};
use super::store::Dataset;
use super::types::{CountryRanks, Flag, Metric, Resort};

const ID: &str = "ID";
const RESORT: &str = "Resort";
const COUNTRY: &str = "Country";
const CONTINENT: &str = "Continent";
const LATITUDE: &str = "Latitude";
const LONGITUDE: &str = "Longitude";
const SEASON: &str = "Season";
const NIGHT_SKIING: &str = "Nightskiing";
const SUMMER_SKIING: &str = "Summer skiing";
const SNOWPARKS: &str = "Snowparks";
const CHILD_FRIENDLY: &str = "Child friendly";

/// Non-metric columns every source must provide
const REQUIRED_COLUMNS: &[&str] = &[
    RESORT,
    COUNTRY,
    CONTINENT,
    LATITUDE,
    LONGITUDE,
    NIGHT_SKIING,
    SUMMER_SKIING,
    SNOWPARKS,
];

/// Text encoding of the source file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// ISO-8859-1: every byte maps to the code point of the same value
    #[default]
    Latin1,
    Utf8,
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            other => Err(format!("Unknown encoding: {}. Use latin1 or utf8", other)),
        }
    }
}

impl Encoding {
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
        }
    }
}

/// Loads the resort table from CSV
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    encoding: Encoding,
}

impl DatasetLoader {
    /// Create a loader with the default (Latin-1) encoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source encoding
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Load and preprocess a dataset file
    pub fn load_path(&self, path: &Path) -> DataLoadResult<Dataset> {
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from(file, path.display().to_string())
    }

    /// Load and preprocess a dataset from any reader (useful for testing)
    pub fn load_reader<R: Read>(&self, reader: R) -> DataLoadResult<Dataset> {
        self.load_from(reader, "<reader>".to_string())
    }

    fn load_from<R: Read>(&self, mut reader: R, source: String) -> DataLoadResult<Dataset> {
        let start = Instant::now();

        // Kept whole so record lines can be resolved past skipped blank lines
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|e| DataLoadError::Io {
                path: source.clone().into(),
                source: e,
            })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_slice());

        let headers = reader.byte_headers()?.clone();
        let columns = Columns::resolve(&headers, self.encoding)?;

        let mut resorts = Vec::new();
        let mut lines = Vec::new();
        let mut record = csv::ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            let line = record
                .position()
                .map(|p| record_line(&input, p))
                .unwrap_or(0);
            let row = RowParser {
                record: &record,
                columns: &columns,
                encoding: self.encoding,
                line,
            };
            resorts.push(row.parse()?);
            lines.push(line);
        }

        let dataset = Dataset::from_source_rows(resorts, lines, columns.metrics(), source)?;

        tracing::info!(
            source = %dataset.source(),
            resorts = dataset.len(),
            countries = dataset.country_count(),
            continents = dataset.continents().len(),
            metrics = dataset.metrics().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset loaded"
        );

        Ok(dataset)
    }
}

/// Header name → column position
struct Columns {
    positions: HashMap<String, usize>,
}

impl Columns {
    fn resolve(headers: &csv::ByteRecord, encoding: Encoding) -> DataLoadResult<Self> {
        let mut positions = HashMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            let name = encoding.decode(raw).ok_or_else(|| DataLoadError::InvalidEncoding {
                line: 1,
                column: format!("#{}", idx + 1),
            })?;
            // Spreadsheet exports sometimes prefix the first header with a BOM
            let name = name.trim_start_matches('\u{feff}').trim().to_string();
            positions.entry(name).or_insert(idx);
        }

        let required_metrics = Metric::all()
            .iter()
            .filter(|m| m.is_required())
            .map(|m| m.column());

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .chain(required_metrics)
            .filter(|name| !positions.contains_key(*name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        Ok(Self { positions })
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Metrics whose column is present in the header
    fn metrics(&self) -> Vec<Metric> {
        Metric::all()
            .iter()
            .copied()
            .filter(|m| self.positions.contains_key(m.column()))
            .collect()
    }
}

/// Parses one data row
struct RowParser<'a> {
    record: &'a csv::ByteRecord,
    columns: &'a Columns,
    encoding: Encoding,
    line: u64,
}

impl RowParser<'_> {
    fn parse(&self) -> DataLoadResult<Resort> {
        let mut extra = BTreeMap::new();
        for metric in Metric::all().iter().filter(|m| !m.is_required()) {
            if let Some(value) = self.optional_number(metric.column())? {
                extra.insert(*metric, value);
            }
        }

        let id = match self.optional_text(ID)? {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| self.invalid_number(ID, &raw))?),
            None => None,
        };

        let child_friendly = match self.optional_text(CHILD_FRIENDLY)? {
            Some(raw) => Some(self.parse_flag(CHILD_FRIENDLY, &raw)?),
            None => None,
        };

        Ok(Resort {
            row: 0,
            id,
            name: self.required_text(RESORT)?,
            country: self.required_text(COUNTRY)?,
            continent: self.required_text(CONTINENT)?,
            latitude: self.required_number(LATITUDE)?,
            longitude: self.required_number(LONGITUDE)?,
            price: self.required_number(Metric::Price.column())?,
            highest_point: self.required_number(Metric::HighestPoint.column())?,
            total_slopes: self.required_number(Metric::TotalSlopes.column())?,
            snow_cannons: self.required_number(Metric::SnowCannons.column())?,
            night_skiing: self.required_flag(NIGHT_SKIING)?,
            summer_skiing: self.required_flag(SUMMER_SKIING)?,
            snowpark: self.required_flag(SNOWPARKS)?,
            season: self.optional_text(SEASON)?,
            child_friendly,
            extra,
            ranks: CountryRanks::default(),
        })
    }

    /// Trimmed cell text; `None` when the column is absent or the cell is empty
    fn optional_text(&self, column: &str) -> DataLoadResult<Option<String>> {
        let Some(raw) = self
            .columns
            .position(column)
            .and_then(|idx| self.record.get(idx))
        else {
            return Ok(None);
        };

        let text = self
            .encoding
            .decode(raw)
            .ok_or_else(|| DataLoadError::InvalidEncoding {
                line: self.line,
                column: column.to_string(),
            })?;

        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }

    fn required_text(&self, column: &str) -> DataLoadResult<String> {
        self.optional_text(column)?
            .ok_or_else(|| DataLoadError::MissingValue {
                line: self.line,
                column: column.to_string(),
            })
    }

    fn optional_number(&self, column: &str) -> DataLoadResult<Option<f64>> {
        match self.optional_text(column)? {
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => Err(self.invalid_number(column, &raw)),
            },
            None => Ok(None),
        }
    }

    fn required_number(&self, column: &str) -> DataLoadResult<f64> {
        self.optional_number(column)?
            .ok_or_else(|| DataLoadError::MissingValue {
                line: self.line,
                column: column.to_string(),
            })
    }

    fn required_flag(&self, column: &str) -> DataLoadResult<Flag> {
        let raw = self.required_text(column)?;
        self.parse_flag(column, &raw)
    }

    fn parse_flag(&self, column: &str, raw: &str) -> DataLoadResult<Flag> {
        raw.parse::<Flag>().map_err(|_| DataLoadError::InvalidFlag {
            line: self.line,
            column: column.to_string(),
            value: raw.to_string(),
        })
    }

    fn invalid_number(&self, column: &str, raw: &str) -> DataLoadError {
        DataLoadError::InvalidNumber {
            line: self.line,
            column: column.to_string(),
            value: raw.to_string(),
        }
    }
}

/// Line of a record's first byte
///
/// A record's position is taken before the reader skips blank lines, so those
/// are counted here.
fn record_line(input: &[u8], position: &csv::Position) -> u64 {
    let skipped = input
        .get(position.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    position.line() + skipped as u64
}
