//! Repository for the `contacts` table.

use contactdesk_core::pagination::{Page, PageRequest};
use contactdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::contact::{Contact, CreateContact, UpdateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, phone, email, business_name, service, \
                       project_details, created_at, updated_at";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact, returning the created row.
    ///
    /// A duplicate phone or email fails with a unique violation on
    /// `uq_contacts_phone` / `uq_contacts_email`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts \
                (full_name, phone, email, business_name, service, project_details) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.business_name)
            .bind(&input.service)
            .bind(&input.project_details)
            .fetch_one(conn)
            .await
    }

    /// Find a contact by its ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Count all contacts.
    pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(conn)
            .await
    }

    /// List one page of contacts in insertion (id) order, with the total count.
    ///
    /// A page past the end yields no items but still reports the true total.
    pub async fn list(
        conn: &mut PgConnection,
        request: PageRequest,
    ) -> Result<Page<Contact>, sqlx::Error> {
        let total = Self::count(&mut *conn).await?;

        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY id ASC LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Contact>(&query)
            .bind(request.per_page)
            .bind(request.offset())
            .fetch_all(&mut *conn)
            .await?;

        Ok(Page::new(request, total, items))
    }

    /// Update a contact. Only non-`None` fields in `input` are applied;
    /// `project_details: Some(None)` clears the column.
    ///
    /// Returns `None` if no row with the given `id` exists. `updated_at` is
    /// advanced by the `set_updated_at` trigger.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET \
                full_name = COALESCE($2, full_name), \
                phone = COALESCE($3, phone), \
                email = COALESCE($4, email), \
                business_name = COALESCE($5, business_name), \
                service = COALESCE($6, service), \
                project_details = CASE WHEN $7 THEN $8 ELSE project_details END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.business_name)
            .bind(&input.service)
            .bind(input.project_details.is_some())
            .bind(input.project_details.clone().flatten())
            .fetch_optional(conn)
            .await
    }

    /// Permanently delete a contact by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
