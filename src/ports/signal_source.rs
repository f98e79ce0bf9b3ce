//! Input port for price/signal tables.

use crate::domain::error::SigperfError;
use crate::domain::signal_table::SignalTable;

/// Anything that can produce a complete, chronologically ordered table.
pub trait SignalSource {
    fn load(&self) -> Result<SignalTable, SigperfError>;
}
