use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::ProgressStyle;
use knock_common::logging::LOG_TARGET;
use knock_common::network::probe::PortProbeResult;
use knock_core::scanner::ProgressCallback;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::terminal::logging::KnockFormatter;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Installs the global subscriber. Log lines go through the indicatif writer so
/// they are printed above the progress bar instead of tearing it.
pub fn init_logging(verbose: bool) {
    let indicatif_layer = IndicatifLayer::new().with_progress_style(bar_style());
    let filter: EnvFilter = EnvFilter::new(if verbose { "debug" } else { "info" });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(KnockFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer)
        .try_init();
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.blue} probing [{bar:32.green/white}] {pos}/{len} ports {msg} {elapsed_precise}",
    )
    .map(|style| style.tick_strings(TICKS).progress_chars("█▓░"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Bar span for one sweep, sized to the number of ports.
pub fn scan_span(port_count: usize) -> Span {
    let span: Span = tracing::info_span!("scan", indicatif.pb_show = true);
    span.pb_set_length(port_count as u64);
    span
}

/// Advances the bar once per finished probe and logs open ports as they appear.
pub fn scan_progress(span: Span) -> ProgressCallback {
    let found: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    Arc::new(move |result: &PortProbeResult| {
        span.pb_inc(1);
        if result.is_open() {
            let so_far: usize = found.fetch_add(1, Ordering::Relaxed) + 1;
            span.pb_set_message(&format!("({so_far} open)"));
            tracing::debug!(
                target: LOG_TARGET,
                "port {} answered ({so_far} open so far)",
                result.port
            );
        }
    })
}
