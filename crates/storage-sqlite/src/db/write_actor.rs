//! Single-writer actor.
//!
//! SQLite allows one writer at a time; funneling every mutation through one
//! dedicated connection turns write contention into queueing. Each job runs
//! inside one immediate transaction, so a replace-all (delete partition +
//! insert new rows) commits as a unit or rolls back as a unit.

use std::any::Any;

use diesel::{Connection, SqliteConnection};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use perpdesk_core::errors::Result;

/// A queued write job. The return type is erased so one channel can carry
/// jobs of any result type.
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<Box<dyn Any + Send + 'static>> + Send + 'static>;

/// Handle for sending jobs to the writer actor. Cloneable; all clones feed
/// the same serialized queue.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection, inside one immediate
    /// transaction, and returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor task has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without a result")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had an unexpected type"))
            })
    }
}

/// Spawns the writer actor. It holds one pool connection for its lifetime
/// and processes queued jobs strictly in arrival order; the actor exits when
/// the last `WriteHandle` is dropped.
pub fn spawn_writer(pool: std::sync::Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to check out the writer actor's connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            // One immediate transaction per job. StorageError implements
            // From<diesel::result::Error>, which the transaction wrapper
            // needs; convert back to the core error at the boundary.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // A dropped receiver means the caller was cancelled; nothing to do.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
