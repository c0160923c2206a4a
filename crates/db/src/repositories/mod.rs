//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&mut PgConnection` as the first argument, so callers decide the
//! transaction boundary (a pooled connection or `&mut *tx`).

pub mod contact_repo;

pub use contact_repo::ContactRepo;
