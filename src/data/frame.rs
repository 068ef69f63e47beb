use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One daily bar of historical trading data for an entity code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub code: String,
    pub date: String,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
}

impl Bar {
    /// Number of features fed to the network per bar.
    pub const FEATURE_DIM: usize = 5;

    /// Feature vector in fixed column order.
    pub fn features(&self) -> [f32; Self::FEATURE_DIM] {
        [self.open, self.high, self.low, self.close, self.volume]
    }
}

/// A table of historical bars, ordered as loaded.
///
/// Rows belonging to the same code are assumed chronological; the generator
/// builds its windows in row order.
#[derive(Debug, Clone, Default)]
pub struct HistoryFrame {
    bars: Vec<Bar>,
}

impl HistoryFrame {
    pub fn new(bars: Vec<Bar>) -> Self {
        HistoryFrame { bars }
    }

    /// Load bars from a CSV file with a `code,date,open,high,low,close,volume`
    /// header.
    pub fn from_csv(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|e| DataError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let bar: Bar = result?;
            bars.push(bar);
        }
        Ok(HistoryFrame { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Distinct entity codes in first-appearance order.
    pub fn distinct_codes(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut codes = Vec::new();
        for bar in &self.bars {
            if seen.insert(bar.code.as_str()) {
                codes.push(bar.code.clone());
            }
        }
        codes
    }

    /// Rows whose code is in `keep`, preserving row order.
    pub fn filter_by_codes(&self, keep: &HashSet<&str>) -> HistoryFrame {
        HistoryFrame {
            bars: self
                .bars
                .iter()
                .filter(|bar| keep.contains(bar.code.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Seeded random-walk data for tests and demo runs: `n_codes` entities
    /// with `days` bars each.
    pub fn synthetic(n_codes: usize, days: usize, seed: u64) -> HistoryFrame {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bars = Vec::with_capacity(n_codes * days);
        for c in 0..n_codes {
            let code = format!("SYN{c:03}");
            let mut close = rng.random_range(10.0..100.0f32);
            for d in 0..days {
                let open = close;
                close *= 1.0 + rng.random_range(-0.03..0.03f32);
                let high = open.max(close) * (1.0 + rng.random_range(0.0..0.01f32));
                let low = open.min(close) * (1.0 - rng.random_range(0.0..0.01f32));
                let volume = rng.random_range(1_000.0..100_000.0f32);
                bars.push(Bar {
                    code: code.clone(),
                    date: format!("day-{d:04}"),
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }
        HistoryFrame { bars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_distinct_codes_first_appearance_order() {
        let frame = HistoryFrame::new(vec![
            bar("600001", 10.0),
            bar("000002", 11.0),
            bar("600001", 12.0),
            bar("300003", 13.0),
        ]);
        assert_eq!(frame.distinct_codes(), vec!["600001", "000002", "300003"]);
    }

    #[test]
    fn test_filter_preserves_row_order() {
        let frame = HistoryFrame::new(vec![
            bar("a", 1.0),
            bar("b", 2.0),
            bar("a", 3.0),
            bar("c", 4.0),
        ]);
        let keep: HashSet<&str> = ["a", "c"].into_iter().collect();
        let filtered = frame.filter_by_codes(&keep);
        let closes: Vec<f32> = filtered.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = HistoryFrame::synthetic(3, 20, 42);
        let b = HistoryFrame::synthetic(3, 20, 42);
        assert_eq!(a.len(), 60);
        assert_eq!(a.bars()[17].close, b.bars()[17].close);
        assert_eq!(a.distinct_codes(), vec!["SYN000", "SYN001", "SYN002"]);
    }

    #[test]
    fn test_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "code,date,open,high,low,close,volume").unwrap();
        writeln!(f, "600001,2016-01-04,10.0,10.5,9.8,10.2,120000").unwrap();
        writeln!(f, "600001,2016-01-05,10.2,10.4,10.0,10.1,90000").unwrap();

        let frame = HistoryFrame::from_csv(&path).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.bars()[0].code, "600001");
        assert!((frame.bars()[1].close - 10.1).abs() < 1e-6);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HistoryFrame::from_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::FileRead { .. }));
    }

    fn bar(code: &str, close: f32) -> Bar {
        Bar {
            code: code.to_string(),
            date: "2016-01-04".to_string(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }
}
