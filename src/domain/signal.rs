//! Discrete trading signals.

use std::fmt;
use std::str::FromStr;

use super::error::SigperfError;

/// A trading instruction attached to one price point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Numeric codes: Buy = 1, Sell = -1, Hold = 0.
impl TryFrom<i64> for Signal {
    type Error = SigperfError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Signal::Buy),
            -1 => Ok(Signal::Sell),
            0 => Ok(Signal::Hold),
            _ => Err(SigperfError::SignalCode { value }),
        }
    }
}

/// Accepts integer codes (`1`, `-1`, `0`, optionally written as floats
/// like `1.0`) and the words `buy`, `sell`, `hold` in any case.
impl FromStr for Signal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "buy" => return Ok(Signal::Buy),
            "sell" => return Ok(Signal::Sell),
            "hold" => return Ok(Signal::Hold),
            _ => {}
        }

        let value: f64 = s
            .parse()
            .map_err(|_| format!("invalid signal '{s}'"))?;
        if value.fract() != 0.0 {
            return Err(format!("invalid signal '{s}'"));
        }
        Signal::try_from(value as i64).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}
