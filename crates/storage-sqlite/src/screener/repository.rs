//! Repository for the global screener table.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::error;

use perpdesk_core::cache::{SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::EntityKind;
use perpdesk_core::screener::{ScreenerCoin, ScreenerRepositoryTrait};

use super::model::ScreenerCoinDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::screener_coins;

pub struct ScreenerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<ScreenerCoin>,
}

impl ScreenerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn load(&self) -> Result<Vec<ScreenerCoin>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<ScreenerCoinDB> = screener_coins::table
            .load::<ScreenerCoinDB>(&mut conn)
            .into_core()?;

        let mut result = rows
            .into_iter()
            .map(ScreenerCoinDB::into_domain)
            .collect::<Result<Vec<_>>>()?;
        // change_24h_pct is TEXT in the schema; order here.
        result.sort_by(|a, b| b.change_24h_pct.cmp(&a.change_24h_pct));
        Ok(result)
    }

    fn republish(&self) -> Result<()> {
        let key = EntityKind::ScreenerCoin.global_sync_key();
        if self.bus.has_observers(&key) {
            let rows = self.load()?;
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl ScreenerRepositoryTrait for ScreenerRepository {
    fn get_coins(&self) -> Result<Vec<ScreenerCoin>> {
        self.load()
    }

    fn get_coin(&self, symbol: &str) -> Result<Option<ScreenerCoin>> {
        let mut conn = get_connection(&self.pool)?;
        let row = screener_coins::table
            .find(symbol)
            .first::<ScreenerCoinDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(ScreenerCoinDB::into_domain).transpose()
    }

    async fn replace_all(&self, coins: Vec<ScreenerCoin>) -> Result<()> {
        let db_rows: Vec<ScreenerCoinDB> = coins.into_iter().map(ScreenerCoinDB::from).collect();

        self.writer
            .exec(move |conn| {
                diesel::delete(screener_coins::table)
                    .execute(conn)
                    .into_core()?;

                diesel::insert_into(screener_coins::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish()
    }

    fn observe_coins(&self) -> Snapshots<ScreenerCoin> {
        self.bus
            .subscribe_with(&EntityKind::ScreenerCoin.global_sync_key(), || {
                self.load().unwrap_or_else(|e| {
                    error!("failed to seed screener snapshot: {}", e);
                    Vec::new()
                })
            })
    }
}
