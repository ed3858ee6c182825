//! Seam for the vendor measurement SDK.
//!
//! The vendor runs the camera-based measurement flow and materializes a
//! PDF report asynchronously on its side. This crate only needs two
//! things from it: a non-blocking nudge to start preparing the report,
//! and a poll query for the result. The query returns one tagged value
//! instead of separate optional byte/URL accessors, so callers never
//! have to inspect runtime types.

/// Where the finished report currently is, if anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPdf {
    /// The SDK has not produced a result yet. Poll again later.
    NotReady,
    /// The report is available in memory.
    Bytes(Vec<u8>),
    /// The report is available for download at this location.
    Url(String),
}

/// Minimal contract the acquisition flow requires of the vendor SDK.
///
/// Implementations wrap whatever the vendor actually exposes. An empty
/// byte payload is treated as [`ResultPdf::NotReady`] by the flow.
pub trait MeasurementSdk {
    /// Kick off server-side report preparation. Non-blocking; the
    /// result is observed through [`MeasurementSdk::result_pdf`].
    fn request_result_pdf(&self);

    /// Current state of the report.
    fn result_pdf(&self) -> ResultPdf;
}
