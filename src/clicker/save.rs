//! Cookie Clicker セーブ/ロード機能。
//!
//! セッション全体を 1 つの Cookie (`SESSION_COOKIE`) に JSON で保存する。
//!
//! ## ロード方針
//!
//! - 保存データは信用しない。オブジェクトであること、既知フィールドが
//!   有限かつ非負の数値であること（`autoUpgradeLevel` は整数）を検査する。
//! - 1 つでも不正なフィールドがあればレコード全体を破棄する（部分適用しない）。
//! - 存在しないフィールドは現在値（初期値）のまま。未知のフィールドは無視する。

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::state::{Session, SessionField};
use crate::storage::{self, CookieJar, StorageError};

/// Cookie 名。
pub const SESSION_COOKIE: &str = "cookie-clicker-session";

/// オートセーブの間隔 (refresh tick 数)。60 ticks/sec × 30秒 = 1800 ticks。
pub const AUTOSAVE_INTERVAL: u64 = 1_800;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("saved session is a JSON {0}, expected an object")]
    NotARecord(&'static str),
    #[error("saved field `{key}` is invalid: {reason}")]
    InvalidField { key: &'static str, reason: String },
}

impl Session {
    /// Merge the saved session (if any) into `self`.
    ///
    /// Returns the number of fields restored. On error `self` is unchanged.
    pub fn load(&mut self, jar: &dyn CookieJar) -> Result<usize, LoadError> {
        let record: Value = storage::load(jar, SESSION_COOKIE, Value::Object(Map::new()))?;
        let fields = validate(&record)?;
        for &(field, value) in &fields {
            apply(self, field, value);
        }
        log::info!("session loaded ({} fields restored)", fields.len());
        Ok(fields.len())
    }

    /// Write the whole session under [`SESSION_COOKIE`].
    pub fn save(&self, jar: &mut dyn CookieJar, now: DateTime<Utc>) -> Result<(), StorageError> {
        storage::save(jar, SESSION_COOKIE, self, now)
    }
}

/// Check every known field of `record` before anything is applied.
fn validate(record: &Value) -> Result<Vec<(SessionField, f64)>, LoadError> {
    let obj = match record {
        Value::Object(obj) => obj,
        other => return Err(LoadError::NotARecord(json_kind(other))),
    };

    for key in obj.keys() {
        if SessionField::from_key(key).is_none() {
            log::debug!("ignoring unknown saved field `{key}`");
        }
    }

    let mut fields = Vec::new();
    for &field in SessionField::all() {
        let Some(raw) = obj.get(field.key()) else {
            continue;
        };
        let value = number(field, raw)?;
        if field == SessionField::AutoUpgradeLevel
            && (value.fract() != 0.0 || value > u32::MAX as f64)
        {
            return Err(LoadError::InvalidField {
                key: field.key(),
                reason: format!("{value} is not a whole level"),
            });
        }
        fields.push((field, value));
    }
    Ok(fields)
}

fn number(field: SessionField, raw: &Value) -> Result<f64, LoadError> {
    let value = raw.as_f64().ok_or_else(|| LoadError::InvalidField {
        key: field.key(),
        reason: format!("expected a number, got {}", json_kind(raw)),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(LoadError::InvalidField {
            key: field.key(),
            reason: format!("{value} is out of range"),
        });
    }
    Ok(value)
}

fn apply(session: &mut Session, field: SessionField, value: f64) {
    match field {
        SessionField::ResourceCount => session.resource_count = value,
        SessionField::Multiplier => session.multiplier = value,
        SessionField::MultiplierCost => session.multiplier_cost = value,
        SessionField::AutoUpgradeCost => session.auto_upgrade_cost = value,
        SessionField::AutoUpgradeLevel => session.auto_upgrade_level = value as u32,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
