use crate::error::EngineError;
use crate::request::RequestId;
use analytics::{AssetSummary, Heatmap, ProjectionResult, RiskReport};
use core_types::{ErrorKind, PricePoint};
use serde::{Deserialize, Serialize};
use simulator::{SimulationBundle, SimulationPath};

/// The result of one component of a request.
///
/// Serialized adjacently tagged, e.g. `{"status": "ready", "detail": {...}}` or
/// `{"status": "not_enough_data", "detail": "..."}`, so a presentation layer can
/// switch on `status` without inspecting error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ready(T),
    /// Too little data for this component; shown as a neutral message.
    NotEnoughData(String),
    Failed { kind: ErrorKind, message: String },
}

impl<T> Outcome<T> {
    pub fn from_result<E: Into<EngineError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Ready(value),
            Err(e) => Self::from_error(e.into()),
        }
    }

    pub fn from_error(error: EngineError) -> Self {
        match error.kind() {
            ErrorKind::InsufficientData => Outcome::NotEnoughData(error.user_message()),
            kind => Outcome::Failed {
                kind,
                message: error.to_string(),
            },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn is_not_enough_data(&self) -> bool {
        matches!(self, Outcome::NotEnoughData(_))
    }
}

/// What a chart needs from a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    /// The full history followed by the full first simulated path.
    pub predicted: Vec<PricePoint>,
    /// Raw paths 1..=fan_paths for an uncertainty fan.
    pub fan: Vec<SimulationPath>,
    pub mean_terminal_price: Option<f64>,
    pub bundle: SimulationBundle,
}

/// The assembled answer to one `AnalyticsRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub request_id: RequestId,
    /// Price points left after windowing.
    pub observations: usize,
    /// The seed that drove the simulation, when the assembler chose it.
    pub seed: Option<u64>,
    pub risk: Outcome<RiskReport>,
    pub heatmap: Outcome<Heatmap>,
    pub simulation: Outcome<ForecastView>,
    pub projection: Option<Outcome<ProjectionResult>>,
    pub summary: AssetSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsError;

    #[test]
    fn insufficient_data_becomes_a_neutral_marker() {
        let outcome: Outcome<()> =
            Outcome::from_result(Err(AnalyticsError::InsufficientData("one price".to_string())));
        assert!(outcome.is_not_enough_data());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap()["status"],
            serde_json::json!("not_enough_data")
        );
    }

    #[test]
    fn other_errors_keep_their_kind() {
        let outcome: Outcome<()> = Outcome::from_result(Err(AnalyticsError::InvalidInput {
            field: "years".to_string(),
            reason: "-1 must be a positive finite number".to_string(),
        }));
        match outcome {
            Outcome::Failed { kind, message } => {
                assert_eq!(kind, ErrorKind::InvalidInput);
                assert!(message.contains("years"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn ready_serializes_with_detail() {
        let json = serde_json::to_value(Outcome::Ready(3)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ready", "detail": 3}));
    }
}
