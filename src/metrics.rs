//! Evaluation counters and latency statistics for the two pipelines.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Metrics collector shared by the request handlers.
pub struct ServiceMetrics {
    credit_evaluations: AtomicU64,
    credit_rejections: AtomicU64,
    fraud_evaluations: AtomicU64,
    fraud_alerts: AtomicU64,
    /// Handler latencies in microseconds
    latencies_us: RwLock<Vec<u64>>,
    /// Credit score distribution, 10 buckets over [0, 1]
    score_buckets: RwLock<[u64; 10]>,
    /// Fraud risk distribution, 10 buckets over [0, 1]
    risk_buckets: RwLock<[u64; 10]>,
    start_time: Instant,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            credit_evaluations: AtomicU64::new(0),
            credit_rejections: AtomicU64::new(0),
            fraud_evaluations: AtomicU64::new(0),
            fraud_alerts: AtomicU64::new(0),
            latencies_us: RwLock::new(Vec::with_capacity(1000)),
            score_buckets: RwLock::new([0; 10]),
            risk_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record one credit evaluation.
    pub fn record_credit(&self, elapsed: Duration, score: f64, accepted: bool) {
        self.credit_evaluations.fetch_add(1, Ordering::Relaxed);
        if !accepted {
            self.credit_rejections.fetch_add(1, Ordering::Relaxed);
        }
        self.record_latency(elapsed);
        bump_bucket(&self.score_buckets, score);
    }

    /// Record one fraud evaluation.
    pub fn record_fraud(&self, elapsed: Duration, risk: f64, alert: bool) {
        self.fraud_evaluations.fetch_add(1, Ordering::Relaxed);
        if alert {
            self.fraud_alerts.fetch_add(1, Ordering::Relaxed);
        }
        self.record_latency(elapsed);
        bump_bucket(&self.risk_buckets, risk);
    }

    fn record_latency(&self, elapsed: Duration) {
        if let Ok(mut times) = self.latencies_us.write() {
            times.push(elapsed.as_micros() as u64);
            // Keep only the most recent samples
            if times.len() > 10_000 {
                times.drain(0..5_000);
            }
        }
    }

    /// Latency percentiles over the retained samples.
    pub fn latency_stats(&self) -> LatencyStats {
        let times = match self.latencies_us.read() {
            Ok(times) => times,
            Err(_) => return LatencyStats::default(),
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: u64 = sorted.iter().sum();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Point-in-time snapshot for the admin endpoint.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            credit: PipelineCounters {
                evaluations: self.credit_evaluations.load(Ordering::Relaxed),
                flagged: self.credit_rejections.load(Ordering::Relaxed),
            },
            fraud: PipelineCounters {
                evaluations: self.fraud_evaluations.load(Ordering::Relaxed),
                flagged: self.fraud_alerts.load(Ordering::Relaxed),
            },
            latency: self.latency_stats(),
            score_distribution: self.score_buckets.read().map(|b| *b).unwrap_or([0; 10]),
            risk_distribution: self.risk_buckets.read().map(|b| *b).unwrap_or([0; 10]),
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn bump_bucket(buckets: &RwLock<[u64; 10]>, value: f64) {
    let bucket = (value * 10.0).min(9.0) as usize;
    if let Ok(mut buckets) = buckets.write() {
        buckets[bucket] += 1;
    }
}

/// Latency statistics in microseconds.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Counters for one pipeline. `flagged` is rejections for credit, alerts
/// for fraud.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineCounters {
    pub evaluations: u64,
    pub flagged: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub credit: PipelineCounters,
    pub fraud: PipelineCounters,
    pub latency: LatencyStats,
    pub score_distribution: [u64; 10],
    pub risk_distribution: [u64; 10],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_evaluations() {
        let metrics = ServiceMetrics::new();

        metrics.record_credit(Duration::from_micros(100), 0.58, true);
        metrics.record_credit(Duration::from_micros(150), 0.2, false);
        metrics.record_fraud(Duration::from_micros(90), 0.8, true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.credit.evaluations, 2);
        assert_eq!(snapshot.credit.flagged, 1);
        assert_eq!(snapshot.fraud.evaluations, 1);
        assert_eq!(snapshot.fraud.flagged, 1);
    }

    #[test]
    fn scores_land_in_buckets() {
        let metrics = ServiceMetrics::new();

        metrics.record_credit(Duration::from_micros(10), 0.58, true);
        metrics.record_fraud(Duration::from_micros(10), 1.0, true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.score_distribution[5], 1);
        // 1.0 folds into the top bucket
        assert_eq!(snapshot.risk_distribution[9], 1);
    }

    #[test]
    fn latency_percentiles() {
        let metrics = ServiceMetrics::new();
        for us in 1..=100 {
            metrics.record_credit(Duration::from_micros(us), 0.5, true);
        }

        let stats = metrics.latency_stats();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.max_us, 100);
        assert!(stats.p50_us >= 50 && stats.p50_us <= 51);
        assert!(stats.p99_us >= 99);
    }

    #[test]
    fn empty_metrics_snapshot() {
        let snapshot = ServiceMetrics::new().snapshot();
        assert_eq!(snapshot.credit.evaluations, 0);
        assert_eq!(snapshot.latency.count, 0);
    }
}
