//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Validated create/update payloads come from
//! `contactdesk_core` and are re-exported alongside the row type.

pub mod contact;
