#![allow(dead_code)]

use sigperf::domain::error::SigperfError;
pub use sigperf::domain::signal::Signal;
pub use sigperf::domain::signal_table::SignalTable;
use sigperf::ports::signal_source::SignalSource;
use std::cell::Cell;
use std::io::Write;

/// In-memory source that counts how often it was loaded.
pub struct MockSignalSource {
    pub prices: Vec<f64>,
    pub signals: Vec<Signal>,
    pub loads: Cell<usize>,
}

impl MockSignalSource {
    pub fn new(prices: Vec<f64>) -> Self {
        let signals = vec![Signal::Hold; prices.len()];
        Self {
            prices,
            signals,
            loads: Cell::new(0),
        }
    }

    pub fn with_signals(mut self, signals: Vec<Signal>) -> Self {
        self.signals = signals;
        self
    }
}

impl SignalSource for MockSignalSource {
    fn load(&self) -> Result<SignalTable, SigperfError> {
        self.loads.set(self.loads.get() + 1);
        SignalTable::new(self.prices.clone(), self.signals.clone())
    }
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// 100 -> 110 -> 90 -> 95 with a buy at the start and a sell at the trough.
pub const SINGLE_DROP_CSV: &str = "100,1\n110,0\n90,-1\n95,0\n";
