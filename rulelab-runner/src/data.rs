//! Bar loading and synthetic data generation.
//!
//! Real bars come from CSV files (`date,close[,high,low,volume]` with
//! ISO dates). When no file is configured the runner can fall back to a
//! deterministic synthetic random walk, seeded from the symbol name so
//! the same symbol always produces the same series. Synthetic runs are
//! tagged as such in the report.

use chrono::{Datelike, NaiveDate};
use rulelab_core::domain::Bar;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read bar file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bar file: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row. Serde-mapped so headers name the columns directly.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct BarRecord {
    pub(crate) date: NaiveDate,
    pub(crate) close: f64,
    // Options stay in the record (empty CSV fields) so every row has the
    // same column count.
    #[serde(default)]
    pub(crate) high: Option<f64>,
    #[serde(default)]
    pub(crate) low: Option<f64>,
    #[serde(default)]
    pub(crate) volume: Option<u64>,
}

impl From<&Bar> for BarRecord {
    fn from(bar: &Bar) -> Self {
        Self {
            date: bar.date,
            close: bar.close,
            high: bar.high,
            low: bar.low,
            volume: bar.volume,
        }
    }
}

impl From<BarRecord> for Bar {
    fn from(record: BarRecord) -> Self {
        Bar {
            date: record.date,
            close: record.close,
            high: record.high,
            low: record.low,
            volume: record.volume,
        }
    }
}

/// Load bars from a CSV file, in file order.
///
/// Ordering and price validity are the engine's concern — it rejects
/// unsorted dates and non-positive closes with a precise error, so the
/// loader does not pre-clean.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut bars = Vec::new();
    for record in reader.deserialize::<BarRecord>() {
        bars.push(record?.into());
    }
    Ok(bars)
}

/// Generate deterministic synthetic bars: a weekday-only random walk
/// from 100.0, seeded from the symbol name.
pub fn generate_synthetic_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.02..0.02);
        let close = price * (1.0 + daily_return);
        let high = price.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = price.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(1_000..10_000u64);

        bars.push(Bar {
            date: current,
            close,
            high: Some(high),
            low: Some(low),
            volume: Some(volume),
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}

/// Deterministic BLAKE3 hash over dates and closes.
///
/// Pinned into every report so a result can be traced back to the exact
/// series that produced it.
pub fn dataset_hash(bars: &[Bar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.close.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn csv_without_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.csv");
        std::fs::write(&path, "date,close\n2024-01-02,100.5\n2024-01-03,101.0\n").unwrap();

        let loaded = load_bars_csv(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].close, 100.5);
        assert_eq!(loaded[0].high, None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_bars_csv(Path::new("/nonexistent/bars.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bars.csv"));
    }

    #[test]
    fn malformed_row_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.csv");
        std::fs::write(&path, "date,close\nnot-a-date,abc\n").unwrap();
        assert!(matches!(
            load_bars_csv(&path).unwrap_err(),
            LoadError::Csv(_)
        ));
    }

    #[test]
    fn synthetic_data_is_deterministic() {
        let a = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 2, 1));
        let b = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn different_symbols_get_different_series() {
        let spy = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 2, 1));
        let qqq = generate_synthetic_bars("QQQ", date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(spy.len(), qqq.len());
        assert_ne!(spy[0].close, qqq[0].close);
    }

    #[test]
    fn synthetic_data_skips_weekends() {
        let bars = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 1, 31));
        for bar in &bars {
            let wd = bar.date.weekday();
            assert_ne!(wd, chrono::Weekday::Sat);
            assert_ne!(wd, chrono::Weekday::Sun);
        }
    }

    #[test]
    fn synthetic_prices_are_valid() {
        let bars = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 12, 31));
        assert!(bars.iter().all(|b| b.is_valid()));
    }

    #[test]
    fn dataset_hash_tracks_content() {
        let a = generate_synthetic_bars("SPY", date(2024, 1, 1), date(2024, 2, 1));
        let mut b = a.clone();

        assert_eq!(dataset_hash(&a), dataset_hash(&b));
        b[0].close += 0.01;
        assert_ne!(dataset_hash(&a), dataset_hash(&b));
    }
}
