//! Repository for the `example_states` table.

use annotate_core::types::DbId;
use sqlx::PgPool;

use crate::models::example::ExampleState;

const COLUMNS: &str = "id, example_id, confirmed_by, label_type_id, confirmed_at";

pub struct ExampleStateRepo;

impl ExampleStateRepo {
    /// Flip the confirmation of `example_id` for `user_id`.
    ///
    /// In a collaborative project the state is shared: any member's row
    /// marks the example done, and un-confirming removes every row for it.
    /// Returns the new state (`true` = confirmed).
    pub async fn toggle(
        pool: &PgPool,
        example_id: DbId,
        user_id: DbId,
        label_type_id: Option<DbId>,
        collaborative: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = if collaborative {
            sqlx::query("DELETE FROM example_states WHERE example_id = $1")
                .bind(example_id)
                .execute(&mut *tx)
                .await?
        } else {
            sqlx::query("DELETE FROM example_states WHERE example_id = $1 AND confirmed_by = $2")
                .bind(example_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?
        };

        if removed.rows_affected() > 0 {
            tx.commit().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO example_states (example_id, confirmed_by, label_type_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_example_states_example_user DO NOTHING",
        )
        .bind(example_id)
        .bind(user_id)
        .bind(label_type_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// States recorded for an example, oldest first.
    pub async fn list_by_example(
        pool: &PgPool,
        example_id: DbId,
    ) -> Result<Vec<ExampleState>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM example_states WHERE example_id = $1 ORDER BY confirmed_at, id"
        );
        sqlx::query_as::<_, ExampleState>(&query)
            .bind(example_id)
            .fetch_all(pool)
            .await
    }
}
