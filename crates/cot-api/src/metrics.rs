//! Prometheus metrics for tool calls and analysis scores.
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    tool_calls: IntCounterVec,
    scores: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let tool_calls = IntCounterVec::new(
            Opts::new("cot_tool_calls_total", "Tool invocations by tool and outcome"),
            &["tool", "outcome"],
        )?;
        let scores = Histogram::with_opts(
            HistogramOpts::new("cot_consistency_score", "Consistency scores of analyzed sequences")
                .buckets(vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]),
        )?;

        registry.register(Box::new(tool_calls.clone()))?;
        registry.register(Box::new(scores.clone()))?;

        Ok(Self {
            registry,
            tool_calls,
            scores,
        })
    }

    pub fn record_call(&self, tool: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        self.tool_calls.with_label_values(&[tool, outcome]).inc();
    }

    pub fn observe_score(&self, score: f64) {
        self.scores.observe(score);
    }

    pub fn calls(&self, tool: &str, ok: bool) -> u64 {
        let outcome = if ok { "ok" } else { "error" };
        self.tool_calls.with_label_values(&[tool, outcome]).get()
    }

    /// Text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
