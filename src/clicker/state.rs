//! Cookie Clicker session state.

use serde::Serialize;

/// Cookies gained per click before any upgrade.
pub const START_MULTIPLIER: f64 = 1.0;
/// Price of the first multiplier upgrade.
///
/// Note: later prices follow `multiplier * 15`, which would give 15 here.
pub const START_MULTIPLIER_COST: f64 = 25.0;
/// Price of the first auto clicker.
pub const START_AUTO_UPGRADE_COST: f64 = 50.0;

/// Fields of [`Session`] addressable by their persisted key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionField {
    ResourceCount,
    Multiplier,
    MultiplierCost,
    AutoUpgradeCost,
    AutoUpgradeLevel,
}

impl SessionField {
    /// All fields in persisted order.
    pub fn all() -> &'static [SessionField] {
        &[
            SessionField::ResourceCount,
            SessionField::Multiplier,
            SessionField::MultiplierCost,
            SessionField::AutoUpgradeCost,
            SessionField::AutoUpgradeLevel,
        ]
    }

    /// Persisted / template key.
    pub fn key(&self) -> &'static str {
        match self {
            SessionField::ResourceCount => "resourceCount",
            SessionField::Multiplier => "multiplier",
            SessionField::MultiplierCost => "multiplierCost",
            SessionField::AutoUpgradeCost => "autoUpgradeCost",
            SessionField::AutoUpgradeLevel => "autoUpgradeLevel",
        }
    }

    pub fn from_key(key: &str) -> Option<SessionField> {
        SessionField::all().iter().copied().find(|f| f.key() == key)
    }
}

/// The player's whole game. Serialized as-is into the save cookie.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Cookies in the bank.
    pub resource_count: f64,
    /// Cookies per click.
    pub multiplier: f64,
    /// Price of the next multiplier upgrade.
    pub multiplier_cost: f64,
    /// Price of the next auto clicker level.
    pub auto_upgrade_cost: f64,
    /// Auto clicker levels bought so far.
    pub auto_upgrade_level: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            resource_count: 0.0,
            multiplier: START_MULTIPLIER,
            multiplier_cost: START_MULTIPLIER_COST,
            auto_upgrade_cost: START_AUTO_UPGRADE_COST,
            auto_upgrade_level: 0,
        }
    }

    /// Current value of a field as a number.
    pub fn value(&self, field: SessionField) -> f64 {
        match field {
            SessionField::ResourceCount => self.resource_count,
            SessionField::Multiplier => self.multiplier,
            SessionField::MultiplierCost => self.multiplier_cost,
            SessionField::AutoUpgradeCost => self.auto_upgrade_cost,
            SessionField::AutoUpgradeLevel => self.auto_upgrade_level as f64,
        }
    }

    /// Value of the field named `key`, or `default` when the key is unknown
    /// or the value is falsy.
    ///
    /// Zero and NaN count as falsy, so a field that is legitimately `0`
    /// still yields `default`. Templates rely on this to show their own
    /// fallback.
    pub fn get(&self, key: &str, default: f64) -> f64 {
        match SessionField::from_key(key).map(|f| self.value(f)) {
            Some(v) if v != 0.0 && !v.is_nan() => v,
            _ => default,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
