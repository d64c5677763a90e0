//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `InteractionStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use calmind_core::domain::Interaction;
use calmind_core::ports::{InteractionStore, PortError, PortResult};
use sqlx::PgPool;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `InteractionStore` port.
#[derive(Clone)]
pub struct DbStore {
    pool: PgPool,
}

impl DbStore {
    /// Creates a new `DbStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `mood_logs` table on demand at startup.
    ///
    /// The pool is lazy, so this is the first real round-trip; a failure here
    /// means the database is unreachable, not that the service cannot run.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mood_logs (
                id UUID PRIMARY KEY,
                text TEXT NOT NULL CHECK (text <> ''),
                emotion TEXT NOT NULL CHECK (emotion IN ('positive', 'negative', 'neutral')),
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

//=========================================================================================
// `InteractionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl InteractionStore for DbStore {
    /// Inserts one interaction row. Every record carries its own timestamp,
    /// computed when the record was constructed.
    async fn save_interaction(&self, interaction: &Interaction) -> PortResult<()> {
        sqlx::query(
            r#"
            INSERT INTO mood_logs (id, text, emotion, timestamp)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(interaction.id)
        .bind(&interaction.text)
        .bind(interaction.emotion.as_str())
        .bind(&interaction.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Upstream(e.to_string()))?;

        Ok(())
    }
}
