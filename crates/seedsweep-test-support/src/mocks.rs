//! Scripted console doubles that record every call in order.

use std::collections::HashMap;

use async_trait::async_trait;
use seedsweep_torrent_core::{
    ConsoleError, ConsoleResult, ParseError, RemoteConsole, TorrentRecord,
};
use tokio::sync::Mutex;

/// In-memory console whose listing, records, and rejections are scripted
/// up front, and which journals every issued verb in call order.
#[derive(Default)]
pub struct ScriptedConsole {
    ids: Vec<i64>,
    records: HashMap<i64, TorrentRecord>,
    stop_rejections: Vec<i64>,
    remove_rejections: Vec<i64>,
    journal: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    /// Console with an empty listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a torrent: its id joins the listing and its record is
    /// served by `fetch_info`.
    #[must_use]
    pub fn with_torrent(mut self, record: TorrentRecord) -> Self {
        self.ids.push(record.id);
        self.records.insert(record.id, record);
        self
    }

    /// Register an id in the listing with no backing record, so `fetch_info`
    /// fails for it.
    #[must_use]
    pub fn with_phantom_id(mut self, id: i64) -> Self {
        self.ids.push(id);
        self
    }

    /// Script the daemon to refuse stopping the given torrent.
    #[must_use]
    pub fn rejecting_stop(mut self, id: i64) -> Self {
        self.stop_rejections.push(id);
        self
    }

    /// Script the daemon to refuse removing the given torrent.
    #[must_use]
    pub fn rejecting_remove(mut self, id: i64) -> Self {
        self.remove_rejections.push(id);
        self
    }

    /// Verbs issued so far, in call order.
    pub async fn journal(&self) -> Vec<String> {
        self.journal.lock().await.clone()
    }

    async fn log(&self, entry: String) {
        self.journal.lock().await.push(entry);
    }
}

#[async_trait]
impl RemoteConsole for ScriptedConsole {
    async fn list_ids(&self) -> ConsoleResult<Vec<i64>> {
        self.log("--list".to_string()).await;
        Ok(self.ids.clone())
    }

    async fn fetch_info(&self, id: i64) -> ConsoleResult<TorrentRecord> {
        self.log(format!("--torrent {id} --info")).await;
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| ConsoleError::Parse {
                source: ParseError::EmptyReport { id },
            })
    }

    async fn stop(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        self.log(format!("--torrent {} --stop", record.id)).await;
        if self.stop_rejections.contains(&record.id) {
            return Err(ConsoleError::StopRejected {
                id: record.id,
                name: record.name.clone(),
                output: "responded: \"error\"".to_string(),
            });
        }
        Ok(())
    }

    async fn remove(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        self.log(format!("--torrent {} --remove", record.id)).await;
        if self.remove_rejections.contains(&record.id) {
            return Err(ConsoleError::RemoveRejected {
                id: record.id,
                name: record.name.clone(),
                output: "responded: \"error\"".to_string(),
            });
        }
        Ok(())
    }

    async fn remove_with_data(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        self.log(format!("--torrent {} --remove-and-delete", record.id))
            .await;
        if self.remove_rejections.contains(&record.id) {
            return Err(ConsoleError::RemoveAndDeleteRejected {
                id: record.id,
                name: record.name.clone(),
                output: "responded: \"error\"".to_string(),
            });
        }
        Ok(())
    }
}
