/// Failures while writing to the page.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Page element '#{0}' not found")]
    MissingElement(String),
}

/// Location acquisition failures.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    Unavailable,
    #[error("Location error: {0}")]
    Other(String),
}
