use crate::error::EngineError;
use crate::request::{AnalyticsParams, AnalyticsRequest};
use crate::response::{AnalyticsResponse, ForecastView, Outcome};
use analytics::{AnalyticsEngine, Heatmap, HeatmapAggregator, RiskReport};
use core_types::{Calendar, PricePoint, PriceSeries, ReturnSeries, UtcCalendar};
use simulator::{MonteCarloSimulator, SeededUniform, ShockSource, SimulationParams};

/// Runs every component for one request and collects their outcomes.
///
/// The assembler holds no per-request state; one instance can serve any
/// number of requests, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler<C: Calendar = UtcCalendar> {
    calendar: C,
    analytics: AnalyticsEngine,
    heatmap: HeatmapAggregator<C>,
    simulator: MonteCarloSimulator<C>,
}

impl ReportAssembler<UtcCalendar> {
    pub fn new() -> Self {
        Self::with_calendar(UtcCalendar)
    }
}

impl<C: Calendar + Clone> ReportAssembler<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self {
            analytics: AnalyticsEngine::new(),
            heatmap: HeatmapAggregator::with_calendar(calendar.clone()),
            simulator: MonteCarloSimulator::with_calendar(calendar.clone()),
            calendar,
        }
    }

    /// Assembles a response, drawing shocks from the request's seed or, without one,
    /// from a fresh seed that is reported back in the response.
    pub fn assemble(&self, request: &AnalyticsRequest) -> AnalyticsResponse {
        let source = match request.params.seed {
            Some(seed) => SeededUniform::new(seed),
            None => SeededUniform::random_seed(),
        };
        let mut response = self.assemble_with(request, &source);
        response.seed = Some(source.seed());
        response
    }

    /// Assembles a response using an explicit shock source.
    #[tracing::instrument(skip_all, fields(request_id = %request.id))]
    pub fn assemble_with<S: ShockSource>(
        &self,
        request: &AnalyticsRequest,
        source: &S,
    ) -> AnalyticsResponse {
        let params = &request.params;
        let series = match params.window_days {
            Some(days) => request.series.trailing_window(days, &self.calendar),
            None => request.series.clone(),
        };
        tracing::info!(
            observations = series.len(),
            window_days = ?params.window_days,
            "Assembling analytics response"
        );

        let risk = self.analytics.calculate(&series).map_err(EngineError::from);

        let heatmap = match &risk {
            Ok(report) => self.heatmap_of(&report.returns),
            Err(_) => self
                .analytics
                .daily_returns(&series)
                .map_err(EngineError::from)
                .and_then(|returns| self.heatmap_of(&returns)),
        };

        // Simulation and projection must not run on parameters the risk step could not produce.
        let simulation = match &risk {
            Ok(report) => self.forecast(&series, report, params, source),
            Err(e) => Err(e.clone()),
        };
        let projection = params.investment.map(|investment| match &risk {
            Ok(_) => analytics::project(&series, investment).map_err(EngineError::from),
            Err(e) => Err(e.clone()),
        });

        let summary = analytics::summarize(&series, heatmap.as_ref().ok());

        let response = AnalyticsResponse {
            request_id: request.id,
            observations: series.len(),
            seed: None,
            risk: Outcome::from_result(risk),
            heatmap: Outcome::from_result(heatmap),
            simulation: Outcome::from_result(simulation),
            projection: projection.map(Outcome::from_result),
            summary,
        };
        tracing::info!(
            risk = response.risk.is_ready(),
            heatmap = response.heatmap.is_ready(),
            simulation = response.simulation.is_ready(),
            "Analytics response assembled"
        );
        response
    }

    fn heatmap_of(&self, returns: &ReturnSeries) -> Result<Heatmap, EngineError> {
        Ok(self.heatmap.aggregate(returns)?)
    }

    fn forecast<S: ShockSource>(
        &self,
        series: &PriceSeries,
        report: &RiskReport,
        params: &AnalyticsParams,
        source: &S,
    ) -> Result<ForecastView, EngineError> {
        let sim_params = SimulationParams::from_risk_report(report)?
            .with_simulation_count(params.simulation_count)
            .with_horizon_days(params.horizon_days);
        let bundle = self.simulator.simulate(&sim_params, *series.last(), source)?;

        let mut predicted: Vec<PricePoint> = series.samples().iter().copied().map(PricePoint::from).collect();
        if let Some(first) = bundle.path(0) {
            predicted.extend_from_slice(first.points());
        }
        let fan = bundle
            .paths()
            .iter()
            .skip(1)
            .take(params.fan_paths)
            .cloned()
            .collect();

        Ok(ForecastView {
            predicted,
            fan,
            mean_terminal_price: bundle.mean_terminal_price(),
            bundle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestId;
    use analytics::Investment;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use core_types::PriceSample;
    use simulator::ScriptedShocks;

    fn series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            start
                .iter_days()
                .zip(prices)
                .map(|(d, &p)| PriceSample::new(d, p))
                .collect(),
        )
        .unwrap()
    }

    fn request(prices: &[f64], params: AnalyticsParams) -> AnalyticsRequest {
        AnalyticsRequest::new(RequestId::new(1), series(prices), params)
    }

    #[test]
    fn scripted_shocks_drive_the_predicted_path() {
        let params = AnalyticsParams {
            simulation_count: 3,
            horizon_days: 2,
            fan_paths: 1,
            ..AnalyticsParams::default()
        };
        let response = ReportAssembler::new()
            .assemble_with(&request(&[100.0, 110.0, 99.0], params), &ScriptedShocks::new(vec![0.0]));

        let risk = response.risk.ready().unwrap();
        let mean = risk.daily.mean_return;
        let forecast = response.simulation.ready().unwrap();

        assert_eq!(forecast.predicted.len(), 3 + 3);
        assert_eq!(forecast.fan.len(), 1);
        assert_eq!(forecast.bundle.len(), 3);
        let terminal = forecast.predicted.last().unwrap();
        assert_eq!(terminal.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_relative_eq!(terminal.price, 99.0 * (1.0 + mean).powi(2), epsilon = 1e-9);
        assert_eq!(response.seed, None);
    }

    #[test]
    fn window_applies_to_every_component() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let params = AnalyticsParams {
            window_days: Some(7),
            simulation_count: 2,
            horizon_days: 1,
            ..AnalyticsParams::default()
        };
        let response = ReportAssembler::new().assemble(&request(&prices, params));

        assert_eq!(response.observations, 8);
        assert_eq!(response.risk.ready().unwrap().returns.len(), 7);
        assert_eq!(response.simulation.ready().unwrap().predicted.len(), 8 + 2);
    }

    #[test]
    fn projection_is_only_present_when_requested() {
        let without = ReportAssembler::new().assemble(&request(&[100.0, 110.0, 121.0], AnalyticsParams::default()));
        assert!(without.projection.is_none());

        let params = AnalyticsParams::default().with_investment(Investment::new(1000.0, 1.0));
        let with = ReportAssembler::new().assemble(&request(&[100.0, 110.0, 121.0], params));
        assert!(with.projection.unwrap().is_ready());
    }

    #[test]
    fn invalid_investment_fails_only_the_projection() {
        let params = AnalyticsParams::default().with_investment(Investment::new(-5.0, 1.0));
        let response = ReportAssembler::new().assemble(&request(&[100.0, 110.0, 121.0], params));

        assert!(response.risk.is_ready());
        assert!(matches!(
            response.projection,
            Some(Outcome::Failed { kind: core_types::ErrorKind::InvalidInput, .. })
        ));
    }

    #[test]
    fn single_return_has_risk_but_no_simulation() {
        let response = ReportAssembler::new().assemble(&request(&[100.0, 105.0], AnalyticsParams::default()));

        assert!(response.risk.is_ready());
        assert!(response.heatmap.is_ready());
        assert!(response.simulation.is_not_enough_data());
    }

    #[test]
    fn seed_is_reported_and_reproducible() {
        let params = AnalyticsParams {
            seed: Some(11),
            simulation_count: 5,
            horizon_days: 10,
            ..AnalyticsParams::default()
        };
        let req = request(&[100.0, 101.0, 99.5, 102.0], params);
        let assembler = ReportAssembler::new();
        let a = assembler.assemble(&req);
        let b = assembler.assemble(&req);

        assert_eq!(a.seed, Some(11));
        assert_eq!(a.simulation, b.simulation);
    }

    #[test]
    fn cloned_assembler_gives_the_same_response() {
        let params = AnalyticsParams {
            seed: Some(5),
            simulation_count: 4,
            horizon_days: 3,
            ..AnalyticsParams::default()
        };
        let req = request(&[100.0, 103.0, 101.0, 104.0], params);
        let assembler = ReportAssembler::new();
        let copy = assembler.clone();

        assert_eq!(assembler.assemble(&req), copy.assemble(&req));
    }
}
