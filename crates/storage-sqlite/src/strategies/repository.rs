//! Repository for strategy settings. Scope is `(user, exchange)`; settings
//! apply to both sub-accounts of the exchange.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::error;

use perpdesk_core::cache::{PurgeUserData, SnapshotBus, Snapshots};
use perpdesk_core::errors::Result;
use perpdesk_core::partition::Exchange;
use perpdesk_core::positions::PositionSide;
use perpdesk_core::strategies::{StrategySetting, StrategySettingRepositoryTrait};

use super::model::StrategySettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::strategy_settings;

pub struct StrategySettingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    bus: SnapshotBus<StrategySetting>,
}

impl StrategySettingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self {
            pool,
            writer,
            bus: SnapshotBus::new(),
        }
    }

    fn scope_key(user_id: &str, exchange: Exchange) -> String {
        format!("{}:{}", user_id, exchange)
    }

    fn load(&self, user_id: &str, exchange: Exchange) -> Result<Vec<StrategySetting>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<StrategySettingDB> = strategy_settings::table
            .filter(strategy_settings::user_id.eq(user_id))
            .filter(strategy_settings::exchange.eq(exchange.as_str()))
            .order((strategy_settings::strategy.asc(), strategy_settings::side.asc()))
            .load::<StrategySettingDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(StrategySettingDB::into_domain).collect()
    }

    fn republish(&self, user_id: &str, exchange: Exchange) -> Result<()> {
        let key = Self::scope_key(user_id, exchange);
        if self.bus.has_observers(&key) {
            let rows = self.load(user_id, exchange)?;
            self.bus.publish(&key, rows);
        }
        Ok(())
    }
}

#[async_trait]
impl StrategySettingRepositoryTrait for StrategySettingRepository {
    fn get_settings(&self, user_id: &str, exchange: Exchange) -> Result<Vec<StrategySetting>> {
        self.load(user_id, exchange)
    }

    fn get_setting(
        &self,
        user_id: &str,
        exchange: Exchange,
        strategy: &str,
        side: PositionSide,
    ) -> Result<Option<StrategySetting>> {
        let mut conn = get_connection(&self.pool)?;
        let row = strategy_settings::table
            .find((user_id, strategy, side.as_str(), exchange.as_str()))
            .first::<StrategySettingDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(StrategySettingDB::into_domain).transpose()
    }

    async fn replace_all(
        &self,
        user_id: &str,
        exchange: Exchange,
        settings: Vec<StrategySetting>,
    ) -> Result<()> {
        let db_rows: Vec<StrategySettingDB> =
            settings.into_iter().map(StrategySettingDB::from).collect();

        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    strategy_settings::table
                        .filter(strategy_settings::user_id.eq(&owner))
                        .filter(strategy_settings::exchange.eq(exchange.as_str())),
                )
                .execute(conn)
                .into_core()?;

                diesel::insert_into(strategy_settings::table)
                    .values(&db_rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(user_id, exchange)
    }

    async fn upsert_setting(&self, setting: StrategySetting) -> Result<()> {
        let user_id = setting.user_id.clone();
        let exchange = setting.exchange;
        let db_row = StrategySettingDB::from(setting);

        self.writer
            .exec(move |conn| {
                diesel::replace_into(strategy_settings::table)
                    .values(&db_row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        self.republish(&user_id, exchange)
    }

    fn observe_settings(&self, user_id: &str, exchange: Exchange) -> Snapshots<StrategySetting> {
        self.bus.subscribe_with(&Self::scope_key(user_id, exchange), || {
            self.load(user_id, exchange).unwrap_or_else(|e| {
                error!(
                    "failed to seed strategy-setting snapshot for {}:{}: {}",
                    user_id, exchange, e
                );
                Vec::new()
            })
        })
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    strategy_settings::table.filter(strategy_settings::user_id.eq(&owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[async_trait]
impl PurgeUserData for StrategySettingRepository {
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize> {
        StrategySettingRepositoryTrait::delete_all_for_user(self, user_id).await
    }
}
