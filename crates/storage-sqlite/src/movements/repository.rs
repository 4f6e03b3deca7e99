use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::MovementDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::movements;
use outlays_core::errors::Result;
use outlays_core::movements::{Movement, MovementRepositoryTrait, NewMovement};

pub struct MovementRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl MovementRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        MovementRepository { pool, writer }
    }
}

/// Inserts a movement on an existing connection, inside the caller's transaction.
pub(crate) fn insert_movement(
    conn: &mut SqliteConnection,
    movement: NewMovement,
) -> Result<Movement> {
    let inserted = diesel::insert_into(movements::table)
        .values(MovementDB::from(movement))
        .returning(MovementDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(Movement::from(inserted))
}

#[async_trait]
impl MovementRepositoryTrait for MovementRepository {
    async fn insert(&self, movement: NewMovement) -> Result<Movement> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_movement(conn, movement))
            .await
    }

    fn list_for_owner(&self, owner_id: &str, limit: i64) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = movements::table
            .filter(movements::owner_id.eq(owner_id))
            .order((movements::created_at.desc(), movements::id.desc()))
            .limit(limit)
            .select(MovementDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Movement::from).collect())
    }
}
