//! Metric names and recording helpers

use std::{sync::OnceLock, time::Instant};

use opentelemetry::{KeyValue, global, metrics::Histogram};

pub const CHAIN_STAGE_DURATION: &str = "chain.stage.duration";

/// Histogram of chain stage durations in seconds, labelled by `stage` and `outcome`
///
/// Backed by the global meter provider, so it records nothing until an
/// exporter is installed by [`crate::init`].
pub fn chain_stage_duration() -> &'static Histogram<f64> {
    static HISTOGRAM: OnceLock<Histogram<f64>> = OnceLock::new();

    HISTOGRAM.get_or_init(|| {
        global::meter("lissan")
            .f64_histogram(CHAIN_STAGE_DURATION)
            .with_unit("s")
            .with_description("Duration of each stage of a translate/complete/synthesize chain")
            .build()
    })
}

/// Record the time elapsed since `start` on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[KeyValue]) {
    histogram.record(start.elapsed().as_secs_f64(), attributes);
}
