use rusqlite::Connection;
use serde_json::Value;
use crate::models::Durations;
use crate::repo::kv::{KvRepo, StoreError};

/// Key holding the durations object
pub const DURATIONS_KEY: &str = "focusflow-durations";

/// Persistence for timer durations
pub struct SettingsRepo;

impl SettingsRepo {
    /// Load durations, falling back to defaults per field
    pub fn load(conn: &Connection) -> Result<Durations, StoreError> {
        let durations = match KvRepo::get_json::<Value>(conn, DURATIONS_KEY)? {
            Some(value) => Durations::from_value(&value),
            None => Durations::default(),
        };
        Ok(durations)
    }

    pub fn save(conn: &Connection, durations: &Durations) -> Result<(), StoreError> {
        KvRepo::set_json(conn, DURATIONS_KEY, durations)?;
        log::debug!("Saved durations {:?}", durations);
        Ok(())
    }
}
