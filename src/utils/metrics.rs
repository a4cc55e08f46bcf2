//! Observability and Metrics
//!
//! This module provides metrics collection for the codec: how many frames and
//! bytes went through, and how many were rejected and why.
//!
//! Uses atomic counters for thread-safe metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Global metrics collector for codec operations
#[derive(Debug)]
pub struct Metrics {
    /// Frames successfully decoded into commands
    pub frames_decoded: AtomicU64,
    /// Frames written by the stream codec
    pub frames_encoded: AtomicU64,
    /// Bytes read by the stream codec
    pub bytes_received: AtomicU64,
    /// Bytes written by the stream codec
    pub bytes_sent: AtomicU64,
    /// Frames rejected by a command decoder
    pub decode_errors: AtomicU64,
    /// Frames with no registered decoder
    pub unknown_command_types: AtomicU64,
    /// Property value conversions that produced a value
    pub conversions_success: AtomicU64,
    /// Property value conversions with no converter
    pub conversions_missing: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            frames_decoded: AtomicU64::new(0),
            frames_encoded: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            unknown_command_types: AtomicU64::new(0),
            conversions_success: AtomicU64::new(0),
            conversions_missing: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn frame_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a frame written to the stream
    pub fn frame_encoded(&self, byte_count: u64) {
        self.frames_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn bytes_received(&self, byte_count: u64) {
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unknown_command_type(&self) {
        self.unknown_command_types.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a value conversion
    pub fn conversion(&self, converted: bool) {
        if converted {
            self.conversions_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.conversions_missing.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            frames_encoded: self.frames_encoded.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            unknown_command_types: self.unknown_command_types.load(Ordering::Relaxed),
            conversions_success: self.conversions_success.load(Ordering::Relaxed),
            conversions_missing: self.conversions_missing.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub frames_decoded: u64,
    pub frames_encoded: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub decode_errors: u64,
    pub unknown_command_types: u64,
    pub conversions_success: u64,
    pub conversions_missing: u64,
    pub uptime_seconds: u64,
}

static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}
