//! Contact entity model.

use contactdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub use contactdesk_core::contact::{CreateContact, UpdateContact};

/// A contact row from the `contacts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub business_name: String,
    pub service: String,
    pub project_details: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
