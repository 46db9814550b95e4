use anyhow::{Context, Result};
use core_types::RawSample;
use serde::Deserialize;
use std::path::Path;

/// An already-fetched price history, either in the market-chart shape
/// `{"prices": [[epoch_millis, price], ...]}` or as a bare array of pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceFile {
    MarketChart { prices: Vec<(i64, f64)> },
    Pairs(Vec<(i64, f64)>),
}

impl PriceFile {
    fn into_pairs(self) -> Vec<(i64, f64)> {
        match self {
            PriceFile::MarketChart { prices } => prices,
            PriceFile::Pairs(pairs) => pairs,
        }
    }
}

pub fn read_samples(path: &Path) -> Result<Vec<RawSample>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read price file {}", path.display()))?;
    parse_samples(&contents).with_context(|| format!("Failed to parse price file {}", path.display()))
}

pub fn parse_samples(contents: &str) -> Result<Vec<RawSample>> {
    let file: PriceFile = serde_json::from_str(contents)?;
    let samples = file
        .into_pairs()
        .into_iter()
        .map(|(millis, price)| RawSample::from_millis(millis, price))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}
