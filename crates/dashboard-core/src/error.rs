use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// The provider returned zero rows for the requested range.
    #[error("No data: {0}")]
    NoData(String),

    /// The provider response was present but not in the expected shape
    /// (missing close column, non-numeric values, unparseable payload).
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// The request never produced a usable response (timeout, DNS,
    /// connection reset, non-success status).
    #[error("Network failure: {0}")]
    Network(String),

    /// Indicator computation failed (e.g. empty input series).
    #[error("Indicator error: {0}")]
    Indicator(String),

    /// The caller's parameters were invalid before any fetch happened.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Best-effort CSV snapshot could not be written.
    #[error("Snapshot write failed: {0}")]
    Snapshot(String),
}
