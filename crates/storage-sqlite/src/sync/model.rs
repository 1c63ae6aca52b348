//! Database model for sync metadata.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::sync::SyncMetadata;

use crate::utils::{format_datetime, parse_datetime};

#[derive(Queryable, Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::sync_metadata)]
pub struct SyncMetadataDB {
    pub key: String,
    pub value: Option<String>,
    pub synced_at: String,
}

impl From<SyncMetadata> for SyncMetadataDB {
    fn from(meta: SyncMetadata) -> Self {
        SyncMetadataDB {
            key: meta.key,
            value: meta.value,
            synced_at: format_datetime(&meta.synced_at),
        }
    }
}

impl From<SyncMetadataDB> for SyncMetadata {
    fn from(row: SyncMetadataDB) -> Self {
        SyncMetadata {
            synced_at: parse_datetime(&row.synced_at, "sync_metadata.synced_at"),
            key: row.key,
            value: row.value,
        }
    }
}
