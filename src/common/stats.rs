use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::cluster::{NodeId, NodeRole};

/// Per-node identity and resource summary reported by the `servers` command.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerInfo {
    pub server_id: NodeId,
    pub role: NodeRole,
    pub host: String,
    pub port: u16,
    pub pid: u32,
    pub heap_used_mb: f64,
    pub uptime_min: f64,
}

/// Process snapshot reported by the `status` command.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProcessStats {
    pub server_id: NodeId,
    pub pid: u32,
    pub heap_used_mb: f64,
    pub uptime_min: f64,
    pub sampled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRecord {
    pub uid: String,
    pub address: String,
    pub login_time: DateTime<Utc>,
}

/// Connection statistics reported by `connections`/`logins`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConnectionSnapshot {
    pub server_id: NodeId,
    pub total_conn_count: u64,
    pub logined_count: usize,
    pub logined_list: Vec<LoginRecord>,
}

/// Live connection/login gauge for the connector frontend of a node. The
/// console only reads snapshots; the frontend increments and decrements.
pub struct ConnectionTracker {
    server_id: NodeId,
    total: AtomicU64,
    logined: Mutex<HashMap<Uuid, LoginRecord>>,
}

impl ConnectionTracker {
    pub fn new(server_id: NodeId) -> Self {
        Self {
            server_id,
            total: AtomicU64::new(0),
            logined: Mutex::new(HashMap::new()),
        }
    }

    pub fn increase_conn_count(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrease_conn_count(&self) {
        // Saturating: a stray decrement must not wrap the gauge.
        let _ = self
            .total
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| v.checked_sub(1));
    }

    pub fn add_logined(&self, uid: impl Into<String>, address: impl Into<String>) -> Uuid {
        let session = Uuid::new_v4();
        let record = LoginRecord {
            uid: uid.into(),
            address: address.into(),
            login_time: Utc::now(),
        };
        self.logined
            .lock()
            .expect("connection tracker poisoned")
            .insert(session, record);
        session
    }

    pub fn remove_logined(&self, session: Uuid) {
        self.logined
            .lock()
            .expect("connection tracker poisoned")
            .remove(&session);
    }

    pub fn snapshot(&self) -> ConnectionSnapshot {
        let logined = self.logined.lock().expect("connection tracker poisoned");
        let mut logined_list: Vec<LoginRecord> = logined.values().cloned().collect();
        logined_list.sort_by(|a, b| a.login_time.cmp(&b.login_time));
        ConnectionSnapshot {
            server_id: self.server_id.clone(),
            total_conn_count: self.total.load(Ordering::Relaxed),
            logined_count: logined_list.len(),
            logined_list,
        }
    }
}
