use crate::db::models::{DbItem, WriteOutcome};
use crate::db::schema::SQLITE_INIT;
use crate::error::ItemboxError;
use itembox_schema::{Item, ItemPayload};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// List every item in the table's natural scan order.
    ListItems(RpcReplyPort<Result<Vec<DbItem>, ItemboxError>>),

    /// Insert a new item and return the stored row.
    CreateItem(ItemPayload, RpcReplyPort<Result<DbItem, ItemboxError>>),

    /// Overwrite name/description of the item with the given id.
    UpdateItem(i64, ItemPayload, RpcReplyPort<Result<WriteOutcome, ItemboxError>>),

    /// Remove the item with the given id.
    DeleteItem(i64, RpcReplyPort<Result<WriteOutcome, ItemboxError>>),
}

/// Cloneable handle to the item store.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_items(&self) -> Result<Vec<Item>, ItemboxError> {
        let rows = ractor::call!(self.actor, DbActorMessage::ListItems)
            .map_err(|e| ItemboxError::RactorError(format!("DbActor ListItems RPC failed: {e}")))??;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    pub async fn create_item(&self, payload: ItemPayload) -> Result<Item, ItemboxError> {
        let row = ractor::call!(self.actor, DbActorMessage::CreateItem, payload).map_err(|e| {
            ItemboxError::RactorError(format!("DbActor CreateItem RPC failed: {e}"))
        })??;
        Ok(row.into())
    }

    /// Returns `ItemboxError::NotFound` when no row has `id`.
    pub async fn update_item(
        &self,
        id: i64,
        payload: ItemPayload,
    ) -> Result<WriteOutcome, ItemboxError> {
        ractor::call!(self.actor, DbActorMessage::UpdateItem, id, payload)
            .map_err(|e| {
                ItemboxError::RactorError(format!("DbActor UpdateItem RPC failed: {e}"))
            })??
            .require_row()
    }

    /// Returns `ItemboxError::NotFound` when no row has `id`.
    pub async fn delete_item(&self, id: i64) -> Result<WriteOutcome, ItemboxError> {
        ractor::call!(self.actor, DbActorMessage::DeleteItem, id)
            .map_err(|e| {
                ItemboxError::RactorError(format!("DbActor DeleteItem RPC failed: {e}"))
            })??
            .require_row()
    }

    /// Stop the actor and wait until its pool is closed.
    pub async fn stop(&self) -> Result<(), ItemboxError> {
        self.actor
            .stop_and_wait(None, None)
            .await
            .map_err(|e| ItemboxError::RactorError(format!("DbActor stop failed: {e}")))
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(database_url = %database_url, "DbActor initialized; table \"items\" ready");
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped; pool closed");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListItems(reply) => {
                let res = self.list_items(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CreateItem(payload, reply) => {
                let res = self.create_item(&state.pool, payload).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpdateItem(id, payload, reply) => {
                let res = self.update_item(&state.pool, id, payload).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteItem(id, reply) => {
                let res = self.delete_item(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_items(&self, pool: &SqlitePool) -> Result<Vec<DbItem>, ItemboxError> {
        // No ORDER BY: callers get the table's natural scan order.
        let rows = sqlx::query_as::<_, DbItem>("SELECT id, name, description FROM items")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    async fn create_item(
        &self,
        pool: &SqlitePool,
        payload: ItemPayload,
    ) -> Result<DbItem, ItemboxError> {
        let row = sqlx::query_as::<_, DbItem>(
            r#"
        INSERT INTO items (name, description)
        VALUES (?, ?)
        RETURNING id, name, description
        "#,
        )
        .bind(payload.name)
        .bind(payload.description)
        .fetch_one(pool)
        .await?;

        debug!(id = row.id, "item inserted");
        Ok(row)
    }

    async fn update_item(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: ItemPayload,
    ) -> Result<WriteOutcome, ItemboxError> {
        let result = sqlx::query("UPDATE items SET name = ?, description = ? WHERE id = ?")
            .bind(payload.name)
            .bind(payload.description)
            .bind(id)
            .execute(pool)
            .await?;

        let outcome = WriteOutcome::from(result);
        debug!(id, rows_affected = outcome.rows_affected, "item update executed");
        Ok(outcome)
    }

    async fn delete_item(&self, pool: &SqlitePool, id: i64) -> Result<WriteOutcome, ItemboxError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        let outcome = WriteOutcome::from(result);
        debug!(id, rows_affected = outcome.rows_affected, "item delete executed");
        Ok(outcome)
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several stores can coexist in one process.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, ItemboxError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| ItemboxError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), ItemboxError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
