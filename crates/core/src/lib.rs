//! Domain types, errors, and validation rules shared by the database and
//! API crates. Has no database or HTTP dependencies.

pub mod contact;
pub mod error;
pub mod pagination;
pub mod types;
