// User-correctable validation failures.
//
// These never abort the application: the UI surfaces them in the status
// line and keeps the offending input around for correction. IO and
// persistence failures use `anyhow` instead and are logged, not raised.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
}
