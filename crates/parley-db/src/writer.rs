//! Single writer for the store.
//!
//! Every mutation is a command processed in order by one task, which
//! applies it to the snapshot and persists the document before replying.
//! Concurrent appends therefore can never overwrite each other.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use parley_types::models::Message;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::Database;
use crate::models::NewMessage;

const QUEUE_DEPTH: usize = 100;

#[derive(Debug)]
pub enum WriteCommand {
    /// Install the seed dataset if the store is empty
    Seed {
        responder: oneshot::Sender<Result<bool>>,
    },

    /// Append one message and persist
    AppendMessage {
        message: NewMessage,
        responder: oneshot::Sender<Result<Message>>,
    },
}

pub struct StoreWriter {
    db: Arc<Database>,
    rx: mpsc::Receiver<WriteCommand>,
}

impl StoreWriter {
    pub fn new(db: Arc<Database>) -> (Self, WriterHandle) {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        (Self { db, rx }, WriterHandle { tx })
    }

    /// Process commands until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.rx.recv().await {
            self.process_command(cmd).await;
        }
        info!("Store writer shutting down");
    }

    async fn process_command(&mut self, cmd: WriteCommand) {
        match cmd {
            WriteCommand::Seed { responder } => {
                let result = self.handle_seed().await;
                let _ = responder.send(result);
            }
            WriteCommand::AppendMessage { message, responder } => {
                let result = self.handle_append(message).await;
                let _ = responder.send(result);
            }
        }
    }

    async fn handle_seed(&self) -> Result<bool> {
        if !self.db.install_seed()? {
            return Ok(false);
        }

        if let Err(e) = self.db.persist().await {
            error!("Failed to persist seed dataset: {:#}", e);
            self.db.clear()?;
            return Err(e);
        }
        Ok(true)
    }

    async fn handle_append(&self, new: NewMessage) -> Result<Message> {
        let message = self.db.insert_message(new)?;

        if let Err(e) = self.db.persist().await {
            error!("Failed to persist message {}: {:#}", message.id, e);
            self.db.remove_message(&message.id)?;
            return Err(e);
        }

        debug!(
            "Appended message {} ({} stored)",
            message.id,
            self.db.message_count()?
        );
        Ok(message)
    }
}

/// Cloneable sender side of the writer.
#[derive(Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<WriteCommand>,
}

impl WriterHandle {
    pub async fn seed(&self) -> Result<bool> {
        let (responder, rx) = oneshot::channel();
        self.send(WriteCommand::Seed { responder }).await?;
        rx.await.map_err(|_| anyhow!("Store writer dropped the request"))?
    }

    pub async fn append_message(&self, message: NewMessage) -> Result<Message> {
        let (responder, rx) = oneshot::channel();
        self.send(WriteCommand::AppendMessage { message, responder })
            .await?;
        rx.await.map_err(|_| anyhow!("Store writer dropped the request"))?
    }

    async fn send(&self, cmd: WriteCommand) -> Result<()> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("Store writer is not running"))
    }
}
