use crate::media::MediaKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which seasons of a series a request covers. Auto-requests always ask
/// for everything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestedSeasons {
    All,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityTier {
    Standard,
    Ultra,
}

/// Submission payload handed to the request service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRequest {
    pub media_id: u32,
    pub media_type: MediaKind,
    pub seasons: Option<RequestedSeasons>,
    pub tvdb_id: Option<u32>,
    pub quality: QualityTier,
    pub is_auto_request: bool,
}

/// The created request record, as echoed back by the request service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRequest {
    pub id: u64,
    pub media_id: u32,
    pub media_type: MediaKind,
}

/// Closed failure taxonomy for request submission. The four soft kinds are
/// an expected steady state during continuous polling and are classified as
/// such by the dispatcher; anything else arrives as `Other`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("user lacks permission to submit this request")]
    PermissionDenied,
    #[error("a request for this media already exists")]
    Duplicate,
    #[error("user request quota exceeded")]
    QuotaExceeded,
    #[error("no seasons available to request")]
    NoSeasonsAvailable,
    #[error("request submission failed: {0}")]
    Other(String),
}

impl RequestError {
    /// Expected failures log at debug level during sync; unexpected ones
    /// log at error level.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            RequestError::PermissionDenied
                | RequestError::Duplicate
                | RequestError::QuotaExceeded
                | RequestError::NoSeasonsAvailable
        )
    }
}
