//! Index-aligned price and signal table.

use super::error::SigperfError;
use super::signal::Signal;

/// A single price at a 0-based chronological position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub index: usize,
    pub price: f64,
}

/// Prices paired with signals by position. Both sequences always have the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    points: Vec<PricePoint>,
    signals: Vec<Signal>,
}

impl SignalTable {
    pub fn new(prices: Vec<f64>, signals: Vec<Signal>) -> Result<Self, SigperfError> {
        if prices.len() != signals.len() {
            return Err(SigperfError::LengthMismatch {
                prices: prices.len(),
                signals: signals.len(),
            });
        }

        let points = prices
            .into_iter()
            .enumerate()
            .map(|(index, price)| PricePoint { index, price })
            .collect();

        Ok(Self { points, signals })
    }

    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (f64, Signal)>,
    {
        let (prices, signals): (Vec<f64>, Vec<Signal>) = rows.into_iter().unzip();
        let points = prices
            .into_iter()
            .enumerate()
            .map(|(index, price)| PricePoint { index, price })
            .collect();
        Self { points, signals }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Positions where `signal` fires, with the price at that position.
    pub fn markers(&self, signal: Signal) -> Vec<PricePoint> {
        self.points
            .iter()
            .zip(&self.signals)
            .filter(|(_, s)| **s == signal)
            .map(|(p, _)| *p)
            .collect()
    }

    pub fn count(&self, signal: Signal) -> usize {
        self.signals.iter().filter(|s| **s == signal).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SignalTable {
        SignalTable::new(
            vec![100.0, 110.0, 90.0, 95.0],
            vec![Signal::Buy, Signal::Hold, Signal::Sell, Signal::Buy],
        )
        .unwrap()
    }

    #[test]
    fn new_assigns_indices_in_order() {
        let table = sample_table();
        assert_eq!(table.len(), 4);
        let indices: Vec<usize> = table.markers(Signal::Buy).iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert_eq!(table.prices(), vec![100.0, 110.0, 90.0, 95.0]);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = SignalTable::new(vec![1.0, 2.0], vec![Signal::Hold]).unwrap_err();
        assert!(matches!(
            err,
            SigperfError::LengthMismatch {
                prices: 2,
                signals: 1
            }
        ));
    }

    #[test]
    fn markers_pick_matching_positions() {
        let table = sample_table();

        let buys = table.markers(Signal::Buy);
        assert_eq!(
            buys,
            vec![
                PricePoint { index: 0, price: 100.0 },
                PricePoint { index: 3, price: 95.0 },
            ]
        );

        let sells = table.markers(Signal::Sell);
        assert_eq!(sells, vec![PricePoint { index: 2, price: 90.0 }]);
    }

    #[test]
    fn counts_per_signal() {
        let table = sample_table();
        assert_eq!(table.count(Signal::Buy), 2);
        assert_eq!(table.count(Signal::Sell), 1);
        assert_eq!(table.count(Signal::Hold), 1);
    }

    #[test]
    fn from_rows_matches_new() {
        let rows = vec![(100.0, Signal::Buy), (101.0, Signal::Sell)];
        let table = SignalTable::from_rows(rows);
        let expected = SignalTable::new(vec![100.0, 101.0], vec![Signal::Buy, Signal::Sell]).unwrap();
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_table() {
        let table = SignalTable::new(vec![], vec![]).unwrap();
        assert!(table.is_empty());
        assert!(table.markers(Signal::Buy).is_empty());
    }
}
