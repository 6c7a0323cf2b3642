mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::{HistoryRecord, NewHistoryRecord};

/// History store over a single shared SQLite connection.
///
/// The connection is opened once at startup and reused for the life of the
/// process. Every write is one independent insert and every delete targets
/// one row, so the mutex is the only coordination needed.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "changecast")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("changecast.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // History operations
    // ============================================================

    pub fn insert_history(&self, input: NewHistoryRecord) -> Result<HistoryRecord> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO history (id, pr_id, pr_description, dev_note, mkt_note, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.pr_id,
                &input.pr_description,
                &input.dev_note,
                &input.mkt_note,
                now.to_rfc3339(),
            ),
        )?;

        Ok(HistoryRecord {
            id,
            pr_id: input.pr_id,
            pr_description: input.pr_description,
            dev_note: input.dev_note,
            mkt_note: input.mkt_note,
            created_at: now,
        })
    }

    pub fn list_history(&self) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, pr_id, pr_description, dev_note, mkt_note, created_at
             FROM history ORDER BY created_at DESC",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(HistoryRecord {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    pr_id: row.get(1)?,
                    pr_description: row.get(2)?,
                    dev_note: row.get(3)?,
                    mkt_note: row.get(4)?,
                    created_at: parse_datetime(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn delete_history(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM history WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
