//! Errors for the fallible edges of the core: loading documents, overlays
//! and configuration. Rendering and interaction never return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id `{0}`")]
    DuplicateId(String),

    #[error("invalid color `{value}` on node `{id}`")]
    InvalidColor { id: String, value: String },

    #[error("cannot decode overlay snapshot: {0}")]
    OverlayDecode(#[from] rmp_serde::decode::Error),

    #[error("cannot encode overlay snapshot: {0}")]
    OverlayEncode(#[from] rmp_serde::encode::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
