use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Observation};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Rows are numbered from 1, header excluded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: '{value}' is not a date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: region is empty")]
    EmptyRegion { row: usize },

    #[error("row {row}: column '{column}' is not a finite number")]
    NonFinite { row: usize, column: &'static str },

    #[error("row {row} ({region}): mean {mean} is negative")]
    NegativeMean { row: usize, region: String, mean: f64 },

    #[error(
        "row {row} ({region}): expected lower_90 <= mean <= upper_90, \
         got {lower_90} / {mean} / {upper_90}"
    )]
    BoundsOutOfOrder {
        row: usize,
        region: String,
        mean: f64,
        lower_90: f64,
        upper_90: f64,
    },

    #[error("row {row}: duplicate observation for {region} on {date}")]
    Duplicate {
        row: usize,
        region: String,
        date: NaiveDate,
    },

    #[error("dataset contains no observations")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an Rt dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with at least `date,region,mean,lower_90,upper_90`
/// * `.json` – `[{ "date": "...", "region": "...", "mean": ..., ... }, ...]`
///
/// Extra columns are ignored.
pub fn load_file(path: &Path) -> Result<Dataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        std::fs::File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => read_csv(open()?),
        "json" => read_json(open()?),
        other => Err(DatasetError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// Date cell: text, or epoch milliseconds as pandas writes by default.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    EpochMillis(i64),
    Text(String),
}

impl RawDate {
    fn to_date(&self) -> Option<NaiveDate> {
        match self {
            RawDate::EpochMillis(ms) => {
                DateTime::from_timestamp_millis(*ms).map(|dt| dt.date_naive())
            }
            RawDate::Text(s) => parse_date(s),
        }
    }
}

impl std::fmt::Display for RawDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawDate::EpochMillis(ms) => write!(f, "{ms}"),
            RawDate::Text(s) => f.write_str(s),
        }
    }
}

/// A row as it appears in the file, before date parsing and validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: RawDate,
    region: String,
    mean: f64,
    lower_90: f64,
    upper_90: f64,
}

/// Parse `YYYY-MM-DD`, or a timestamp whose time-of-day is dropped.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn validate(row: usize, raw: RawRow) -> Result<Observation, DatasetError> {
    let date = raw.date.to_date().ok_or_else(|| DatasetError::InvalidDate {
        row,
        value: raw.date.to_string(),
    })?;

    let region = raw.region.trim();
    if region.is_empty() {
        return Err(DatasetError::EmptyRegion { row });
    }

    for (column, value) in [
        ("mean", raw.mean),
        ("lower_90", raw.lower_90),
        ("upper_90", raw.upper_90),
    ] {
        if !value.is_finite() {
            return Err(DatasetError::NonFinite { row, column });
        }
    }

    if raw.mean < 0.0 {
        return Err(DatasetError::NegativeMean {
            row,
            region: region.to_string(),
            mean: raw.mean,
        });
    }
    if !(raw.lower_90 <= raw.mean && raw.mean <= raw.upper_90) {
        return Err(DatasetError::BoundsOutOfOrder {
            row,
            region: region.to_string(),
            mean: raw.mean,
            lower_90: raw.lower_90,
            upper_90: raw.upper_90,
        });
    }

    Ok(Observation::new(date, region, raw.mean, raw.lower_90, raw.upper_90))
}

/// Validate every row and reject duplicated `(date, region)` pairs.
fn build_dataset(
    rows: impl IntoIterator<Item = (usize, RawRow)>,
) -> Result<Dataset, DatasetError> {
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut observations = Vec::new();

    for (row, raw) in rows {
        let obs = validate(row, raw)?;
        if !seen.insert((obs.date, obs.region.clone())) {
            return Err(DatasetError::Duplicate {
                row,
                region: obs.region,
                date: obs.date,
            });
        }
        observations.push(obs);
    }

    if observations.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(Dataset::new(observations))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a headed CSV table. Columns are matched by header name.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|source| DatasetError::Csv { row, source })?;
        rows.push((row, raw));
    }

    let dataset = build_dataset(rows)?;
    log::debug!("parsed {} CSV observations", dataset.len());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Read a records-oriented JSON array (`df.to_json(orient="records")`).
///
/// Dates may be ISO strings or integer epoch milliseconds.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let records: Vec<RawRow> = serde_json::from_reader(reader)?;
    build_dataset(records.into_iter().enumerate().map(|(i, raw)| (i + 1, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,region,mean,lower_90,upper_90\n";

    fn csv(body: &str) -> Result<Dataset, DatasetError> {
        read_csv(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn reads_rows_in_file_order() {
        let ds = csv("2020-06-01,A,1.2,0.9,1.6\n2020-06-01,B,0.8,0.5,1.1\n").unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.observations()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
        assert_eq!(first.region, "A");
        assert_eq!(first.upper_90, 1.6);
    }

    #[test]
    fn ignores_extra_columns_and_reordered_headers() {
        let text = "region,median,date,upper_90,mean,lower_90\n\
                    Sweden,1.01,2020-05-30,1.3,1.0,0.8\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.observations()[0].region, "Sweden");
        assert_eq!(ds.observations()[0].mean, 1.0);
    }

    #[test]
    fn accepts_timestamps_and_drops_time() {
        let ds = csv("2020-06-01 00:00:00,A,1.0,0.9,1.1\n2020-06-02T12:30:00,A,1.0,0.9,1.1\n")
            .unwrap();
        let dates = ds.dates();
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2020, 6, 2).unwrap());
    }

    #[test]
    fn rejects_bad_date() {
        let err = csv("06/01/2020,A,1.0,0.9,1.1\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn rejects_non_numeric_mean() {
        let err = csv("2020-06-01,A,high,0.9,1.1\n").unwrap_err();
        assert!(matches!(err, DatasetError::Csv { row: 1, .. }));
    }

    #[test]
    fn rejects_bounds_out_of_order() {
        let err = csv("2020-06-01,A,1.0,0.9,1.1\n2020-06-01,B,1.0,1.2,1.1\n").unwrap_err();
        match err {
            DatasetError::BoundsOutOfOrder { row, region, .. } => {
                assert_eq!(row, 2);
                assert_eq!(region, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_negative_mean_and_nan() {
        assert!(matches!(
            csv("2020-06-01,A,-0.1,-0.2,0.1\n").unwrap_err(),
            DatasetError::NegativeMean { .. }
        ));
        assert!(matches!(
            csv("2020-06-01,A,NaN,0.9,1.1\n").unwrap_err(),
            DatasetError::NonFinite { column: "mean", .. }
        ));
    }

    #[test]
    fn rejects_empty_region_and_duplicates() {
        assert!(matches!(
            csv("2020-06-01, ,1.0,0.9,1.1\n").unwrap_err(),
            DatasetError::EmptyRegion { row: 1 }
        ));
        assert!(matches!(
            csv("2020-06-01,A,1.0,0.9,1.1\n2020-06-01,A,1.1,0.9,1.2\n").unwrap_err(),
            DatasetError::Duplicate { row: 2, .. }
        ));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(csv("").unwrap_err(), DatasetError::Empty));
    }

    #[test]
    fn reads_json_records() {
        let text = r#"[
            {"date": "2020-06-01T00:00:00.000", "region": "A",
             "mean": 1.2, "lower_90": 0.9, "upper_90": 1.6},
            {"date": "2020-06-01", "region": "B",
             "mean": 0.8, "lower_90": 0.5, "upper_90": 1.1, "median": 0.8}
        ]"#;
        let ds = read_json(text.as_bytes()).unwrap();
        assert_eq!(ds.regions(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ds.dates().len(), 1);
    }

    #[test]
    fn reads_json_epoch_millisecond_dates() {
        // 2020-06-01T00:00:00Z
        let text = r#"[{"date": 1590969600000, "region": "A",
                        "mean": 1.2, "lower_90": 0.9, "upper_90": 1.6}]"#;
        let ds = read_json(text.as_bytes()).unwrap();
        assert_eq!(ds.max_date(), NaiveDate::from_ymd_opt(2020, 6, 1));
    }

    #[test]
    fn loads_csv_and_json_files_by_extension() {
        let dir = std::env::temp_dir().join(format!("rt_dashboard_load_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let csv_path = dir.join("rt.csv");
        std::fs::write(&csv_path, format!("{HEADER}2020-06-01,A,1.2,0.9,1.6\n")).unwrap();
        let json_path = dir.join("rt.JSON");
        std::fs::write(
            &json_path,
            r#"[{"date": "2020-06-01", "region": "B",
                 "mean": 0.8, "lower_90": 0.5, "upper_90": 1.1}]"#,
        )
        .unwrap();

        let from_csv = load_file(&csv_path);
        let from_json = load_file(&json_path);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(from_csv.unwrap().regions(), vec!["A".to_string()]);
        assert_eq!(from_json.unwrap().regions(), vec!["B".to_string()]);
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let err = load_file(Path::new("data/rt.parquet")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedExtension(ref e) if e == "parquet"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }
}
