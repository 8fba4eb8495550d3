//! Repository for the `annotator_perspectives` table.
//!
//! A perspective carries at most one annotator. Writes lock the target
//! perspective row, check the existing bindings, then write, all in one
//! transaction; `uq_annotator_perspectives_perspective` rejects anything
//! that still slips through.

use annotate_core::perspective::ensure_unbound;
use annotate_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::is_unique_violation;
use crate::models::perspective::{AnnotatorPerspective, BindOutcome, UpdateAnnotatorPerspective};

const COLUMNS: &str = "id, perspective_id, annotator_id, created_at, updated_at";

const UQ_PERSPECTIVE: &str = "uq_annotator_perspectives_perspective";

pub struct AnnotatorPerspectiveRepo;

impl AnnotatorPerspectiveRepo {
    pub async fn list_by_perspective(
        pool: &PgPool,
        perspective_id: DbId,
    ) -> Result<Vec<AnnotatorPerspective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotator_perspectives WHERE perspective_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AnnotatorPerspective>(&query)
            .bind(perspective_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_in_perspective(
        pool: &PgPool,
        perspective_id: DbId,
        id: DbId,
    ) -> Result<Option<AnnotatorPerspective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotator_perspectives WHERE id = $1 AND perspective_id = $2"
        );
        sqlx::query_as::<_, AnnotatorPerspective>(&query)
            .bind(id)
            .bind(perspective_id)
            .fetch_optional(pool)
            .await
    }

    /// Bind `annotator_id` to an unassigned perspective.
    pub async fn bind(
        pool: &PgPool,
        perspective_id: DbId,
        annotator_id: DbId,
    ) -> Result<BindOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(existing) = lock_bindings(&mut tx, perspective_id).await? else {
            return Ok(BindOutcome::NotFound);
        };
        if ensure_unbound(perspective_id, &existing, None).is_err() {
            return Ok(BindOutcome::AlreadyBound);
        }

        let query = format!(
            "INSERT INTO annotator_perspectives (perspective_id, annotator_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, AnnotatorPerspective>(&query)
            .bind(perspective_id)
            .bind(annotator_id)
            .fetch_one(&mut *tx)
            .await;

        finish(tx, inserted).await
    }

    /// Move binding `id` (currently on `perspective_id`) to another annotator
    /// and/or perspective. The target perspective must not carry any other
    /// binding.
    pub async fn update(
        pool: &PgPool,
        perspective_id: DbId,
        id: DbId,
        input: &UpdateAnnotatorPerspective,
    ) -> Result<BindOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM annotator_perspectives
             WHERE id = $1 AND perspective_id = $2
             FOR UPDATE",
        )
        .bind(id)
        .bind(perspective_id)
        .fetch_optional(&mut *tx)
        .await?;
        if current.is_none() {
            return Ok(BindOutcome::NotFound);
        }

        let target = input.perspective_id.unwrap_or(perspective_id);
        let Some(existing) = lock_bindings(&mut tx, target).await? else {
            return Ok(BindOutcome::NotFound);
        };
        if ensure_unbound(target, &existing, Some(id)).is_err() {
            return Ok(BindOutcome::AlreadyBound);
        }

        let query = format!(
            "UPDATE annotator_perspectives SET
                perspective_id = $2,
                annotator_id = COALESCE($3, annotator_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, AnnotatorPerspective>(&query)
            .bind(id)
            .bind(target)
            .bind(input.annotator_id)
            .fetch_one(&mut *tx)
            .await;

        finish(tx, updated).await
    }

    /// Remove a binding. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        perspective_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM annotator_perspectives WHERE id = $1 AND perspective_id = $2")
                .bind(id)
                .bind(perspective_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Lock the perspective row and return the ids of its current bindings,
/// or `None` if the perspective does not exist.
async fn lock_bindings(
    tx: &mut Transaction<'_, Postgres>,
    perspective_id: DbId,
) -> Result<Option<Vec<DbId>>, sqlx::Error> {
    let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM perspectives WHERE id = $1 FOR UPDATE")
        .bind(perspective_id)
        .fetch_optional(&mut **tx)
        .await?;
    if locked.is_none() {
        return Ok(None);
    }

    let ids = sqlx::query_scalar::<_, DbId>(
        "SELECT id FROM annotator_perspectives WHERE perspective_id = $1",
    )
    .bind(perspective_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(Some(ids))
}

/// Commit a successful write; map a uniqueness race to `AlreadyBound`.
async fn finish(
    tx: Transaction<'_, Postgres>,
    written: Result<AnnotatorPerspective, sqlx::Error>,
) -> Result<BindOutcome, sqlx::Error> {
    match written {
        Ok(row) => {
            tx.commit().await?;
            Ok(BindOutcome::Bound(row))
        }
        Err(err) if is_unique_violation(&err, UQ_PERSPECTIVE) => Ok(BindOutcome::AlreadyBound),
        Err(err) => Err(err),
    }
}
