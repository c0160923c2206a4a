//! Shared response payload types for API handlers.

use serde::Serialize;

/// `{ "status": "..." }` acknowledgement for operations with no entity to return.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const DELETED: StatusResponse = StatusResponse { status: "deleted" };
}
