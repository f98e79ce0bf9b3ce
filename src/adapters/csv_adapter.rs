//! CSV file signal source.
//!
//! Each record is `price,signal`. Row order is chronological order.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::error::SigperfError;
use crate::domain::signal::Signal;
use crate::domain::signal_table::SignalTable;
use crate::ports::config_port::ConfigPort;
use crate::ports::signal_source::SignalSource;

pub struct CsvSignalAdapter {
    path: PathBuf,
    has_header: bool,
    delimiter: u8,
}

impl CsvSignalAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            has_header: false,
            delimiter: b',',
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Apply `[input] has_header` and `[input] delimiter`.
    pub fn configured(path: PathBuf, config: &dyn ConfigPort) -> Result<Self, SigperfError> {
        let mut adapter =
            Self::new(path).with_header(config.get_bool("input", "has_header", false));

        if let Some(delim) = config.get_string("input", "delimiter") {
            adapter = adapter.with_delimiter(parse_delimiter(&delim)?);
        }
        Ok(adapter)
    }
}

impl SignalSource for CsvSignalAdapter {
    fn load(&self) -> Result<SignalTable, SigperfError> {
        info!(path = %self.path.display(), "loading signal table");
        let file = File::open(&self.path).map_err(SigperfError::Io)?;
        parse_table(file, self.has_header, self.delimiter)
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, SigperfError> {
    let invalid = |reason: &str| SigperfError::ConfigInvalid {
        section: "input".into(),
        key: "delimiter".into(),
        reason: reason.into(),
    };

    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let bytes = value.as_bytes();
            if bytes.len() != 1 {
                return Err(invalid("must be a single ASCII character"));
            }
            if !bytes[0].is_ascii() {
                return Err(invalid("must be a single ASCII character"));
            }
            Ok(bytes[0])
        }
    }
}

/// Parse `price,signal` records from any reader.
pub fn parse_table<R: Read>(
    reader: R,
    has_header: bool,
    delimiter: u8,
) -> Result<SignalTable, SigperfError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let fallback_line = i + 1 + usize::from(has_header);
        let record = result.map_err(|e| SigperfError::DataParse {
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_line),
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        let price_str = record.get(0).ok_or_else(|| SigperfError::DataParse {
            line,
            reason: "missing price column".into(),
        })?;
        let price: f64 = price_str.parse().map_err(|e| SigperfError::DataParse {
            line,
            reason: format!("invalid price '{}': {}", price_str, e),
        })?;
        if !price.is_finite() {
            return Err(SigperfError::DataParse {
                line,
                reason: format!("price '{}' is not finite", price_str),
            });
        }

        let signal_str = record.get(1).ok_or_else(|| SigperfError::DataParse {
            line,
            reason: "missing signal column".into(),
        })?;
        let signal: Signal = signal_str
            .parse()
            .map_err(|reason| SigperfError::DataParse { line, reason })?;

        rows.push((price, signal));
    }

    debug!(rows = rows.len(), "parsed signal table");
    Ok(SignalTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "100.0,1\n110.0,0\n90.0,-1\n95.0,0\n";

    #[test]
    fn parse_headerless_rows() {
        let table = parse_table(SAMPLE.as_bytes(), false, b',').unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.prices(), vec![100.0, 110.0, 90.0, 95.0]);
        assert_eq!(
            table.signals(),
            &[Signal::Buy, Signal::Hold, Signal::Sell, Signal::Hold]
        );
    }

    #[test]
    fn parse_with_header_skips_first_row() {
        let content = "price,signal\n100.0,buy\n101.0,sell\n";
        let table = parse_table(content.as_bytes(), true, b',').unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.signals(), &[Signal::Buy, Signal::Sell]);
    }

    #[test]
    fn header_row_without_flag_is_a_parse_error() {
        let content = "price,signal\n100.0,1\n";
        let err = parse_table(content.as_bytes(), false, b',').unwrap_err();
        assert!(matches!(err, SigperfError::DataParse { line: 1, .. }));
    }

    #[test]
    fn parse_trims_whitespace() {
        let table = parse_table(" 100.5 , 1 \n 99 ,-1\n".as_bytes(), false, b',').unwrap();
        assert_eq!(table.prices(), vec![100.5, 99.0]);
    }

    #[test]
    fn parse_custom_delimiter() {
        let table = parse_table("100;1\n101;0\n".as_bytes(), false, b';').unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn invalid_price_reports_line() {
        let err = parse_table("100,1\nabc,0\n".as_bytes(), false, b',').unwrap_err();
        match err {
            SigperfError::DataParse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("invalid price"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let err = parse_table("NaN,1\n".as_bytes(), false, b',').unwrap_err();
        assert!(matches!(err, SigperfError::DataParse { line: 1, .. }));
    }

    #[test]
    fn invalid_signal_reports_line() {
        let err = parse_table("100,1\n101,2\n".as_bytes(), false, b',').unwrap_err();
        assert!(matches!(err, SigperfError::DataParse { line: 2, .. }));
    }

    #[test]
    fn missing_signal_column() {
        let err = parse_table("100\n".as_bytes(), false, b',').unwrap_err();
        assert!(matches!(err, SigperfError::DataParse { .. }));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = parse_table("".as_bytes(), false, b',').unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.csv");
        fs::write(&path, SAMPLE).unwrap();

        let table = CsvSignalAdapter::new(path).load().unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvSignalAdapter::new(dir.path().join("nope.csv"));
        assert!(matches!(adapter.load(), Err(SigperfError::Io(_))));
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(matches!(
            parse_delimiter(";;"),
            Err(SigperfError::ConfigInvalid { .. })
        ));
    }
}
