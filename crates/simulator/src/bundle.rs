use core_types::PricePoint;
use serde::{Deserialize, Serialize};

/// One simulated future: the seed point followed by one point per simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationPath {
    points: Vec<PricePoint>,
}

impl SimulationPath {
    pub(crate) fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The seed point: the last historical date and price.
    pub fn start(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn terminal(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// All paths of one simulation run. They share a seed point and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationBundle {
    pub horizon_days: usize,
    paths: Vec<SimulationPath>,
}

impl SimulationBundle {
    pub(crate) fn new(horizon_days: usize, paths: Vec<SimulationPath>) -> Self {
        Self { horizon_days, paths }
    }

    pub fn paths(&self) -> &[SimulationPath] {
        &self.paths
    }

    pub fn path(&self, index: usize) -> Option<&SimulationPath> {
        self.paths.get(index)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|p| p.terminal().map(|t| t.price))
            .collect()
    }

    pub fn mean_terminal_price(&self) -> Option<f64> {
        let terminals = self.terminal_prices();
        if terminals.is_empty() {
            return None;
        }
        Some(terminals.iter().sum::<f64>() / terminals.len() as f64)
    }

    /// Nearest-rank percentile of the terminal prices, `pct` in `[0, 100]`.
    pub fn terminal_percentile(&self, pct: f64) -> Option<f64> {
        if !(0.0..=100.0).contains(&pct) {
            return None;
        }
        let mut terminals = self.terminal_prices();
        if terminals.is_empty() {
            return None;
        }
        terminals.sort_by(f64::total_cmp);

        let rank = ((pct / 100.0) * terminals.len() as f64).ceil() as usize;
        Some(terminals[rank.clamp(1, terminals.len()) - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bundle(terminals: &[f64]) -> SimulationBundle {
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let paths = terminals
            .iter()
            .map(|&t| {
                SimulationPath::new(vec![
                    PricePoint { date: d0, price: 10.0 },
                    PricePoint { date: d1, price: t },
                ])
            })
            .collect();
        SimulationBundle::new(1, paths)
    }

    #[test]
    fn terminal_statistics() {
        let b = bundle(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(b.mean_terminal_price(), Some(2.5));
        assert_eq!(b.terminal_percentile(0.0), Some(1.0));
        assert_eq!(b.terminal_percentile(50.0), Some(2.0));
        assert_eq!(b.terminal_percentile(75.0), Some(3.0));
        assert_eq!(b.terminal_percentile(100.0), Some(4.0));
        assert_eq!(b.terminal_percentile(101.0), None);
    }

    #[test]
    fn empty_bundle_has_no_statistics() {
        let b = bundle(&[]);
        assert!(b.is_empty());
        assert_eq!(b.mean_terminal_price(), None);
        assert_eq!(b.terminal_percentile(50.0), None);
    }
}
