//! Opaque pagination cursors.
//!
//! On the wire a cursor is standard base64 of a small JSON object:
//! `{"sort":"NEWEST_FIRST","lastSeen":"m2","direction":"next"}`. Callers
//! treat it as opaque; it is decoded into [`Cursor`] as soon as it enters.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use parley_types::api::{Direction, SortOrder};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub sort: SortOrder,
    /// Id of the row the cursor was minted from.
    pub last_seen: String,
    pub direction: Direction,
}

#[derive(Serialize, Deserialize)]
struct WireCursor {
    sort: SortOrder,
    #[serde(rename = "lastSeen", default, skip_serializing_if = "Option::is_none")]
    last_seen: Option<String>,
    direction: Direction,
}

impl Cursor {
    pub fn new(sort: SortOrder, last_seen: impl Into<String>, direction: Direction) -> Self {
        Self {
            sort,
            last_seen: last_seen.into(),
            direction,
        }
    }

    pub fn encode(&self) -> String {
        let wire = WireCursor {
            sort: self.sort,
            last_seen: Some(self.last_seen.clone()),
            direction: self.direction,
        };
        // Serializing a struct of enums and a string cannot fail
        let json = serde_json::to_vec(&wire).unwrap_or_default();
        B64.encode(json)
    }

    pub fn decode(token: &str) -> Result<Self, ApiError> {
        let bytes = B64
            .decode(token.trim())
            .map_err(|e| ApiError::InvalidCursor(format!("not base64: {e}")))?;
        let wire: WireCursor = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::InvalidCursor(format!("malformed payload: {e}")))?;
        let last_seen = wire
            .last_seen
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidCursor("missing lastSeen".into()))?;

        Ok(Self {
            sort: wire.sort,
            last_seen,
            direction: wire.direction,
        })
    }

    /// Decode an optional query parameter; absent or blank means no cursor.
    pub fn from_param(param: Option<&str>) -> Result<Option<Self>, ApiError> {
        match param.map(str::trim) {
            None | Some("") => Ok(None),
            Some(token) => Self::decode(token).map(Some),
        }
    }
}
