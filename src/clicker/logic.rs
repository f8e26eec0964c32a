//! Cookie Clicker game rules. Pure functions over `Session`.

use super::state::Session;

/// Multiplier price per owned multiplier level.
pub const MULTIPLIER_COST_FACTOR: f64 = 15.0;
/// Auto clicker price per owned auto clicker level.
pub const AUTO_UPGRADE_COST_FACTOR: f64 = 50.0;
/// The auto clicker control locks once the level goes past this.
pub const AUTO_UPGRADE_CAP: u32 = 24;

/// Auto click interval at level 1 (ms).
pub const AUTO_INTERVAL_BASE_MS: i64 = 2_000;
/// Interval reduction per level above 1 (ms).
pub const AUTO_INTERVAL_STEP_MS: i64 = 100;
/// Shortest auto click interval (ms).
pub const AUTO_INTERVAL_FLOOR_MS: i64 = 50;

/// Primary action: add `multiplier` cookies. Always succeeds.
pub fn click(session: &mut Session) {
    session.resource_count += session.multiplier;
}

/// Try to buy one more multiplier level. Returns true if successful.
pub fn buy_multiplier(session: &mut Session) -> bool {
    if session.resource_count < session.multiplier_cost {
        return false;
    }
    session.resource_count -= session.multiplier_cost;
    session.multiplier += 1.0;
    session.multiplier_cost = session.multiplier * MULTIPLIER_COST_FACTOR;
    log::debug!(
        "multiplier upgraded to {} (next {})",
        session.multiplier,
        session.multiplier_cost
    );
    true
}

/// Try to buy one more auto clicker level. Returns true if successful.
///
/// The level cap is enforced by the control, not here.
pub fn buy_auto_upgrade(session: &mut Session) -> bool {
    if session.resource_count < session.auto_upgrade_cost {
        return false;
    }
    session.resource_count -= session.auto_upgrade_cost;
    session.auto_upgrade_level = session.auto_upgrade_level.saturating_add(1);
    session.auto_upgrade_cost = session.auto_upgrade_level as f64 * AUTO_UPGRADE_COST_FACTOR;
    log::debug!(
        "auto clicker level {} (next {})",
        session.auto_upgrade_level,
        session.auto_upgrade_cost
    );
    true
}

/// Whether the multiplier control should be disabled.
pub fn multiplier_locked(session: &Session) -> bool {
    session.resource_count < session.multiplier_cost
}

/// Whether the auto clicker control should be disabled.
pub fn auto_upgrade_locked(session: &Session) -> bool {
    let cannot_afford = session.resource_count < session.auto_upgrade_cost;
    let maxed = session.auto_upgrade_level > AUTO_UPGRADE_CAP;
    cannot_afford || maxed
}

/// Delay between auto clicks at the given level, in milliseconds.
///
/// `max(2000 - (level - 1) * 100, 50)`.
pub fn auto_interval_ms(level: u32) -> u32 {
    let raw = AUTO_INTERVAL_BASE_MS - (level as i64 - 1) * AUTO_INTERVAL_STEP_MS;
    raw.max(AUTO_INTERVAL_FLOOR_MS) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_adds_multiplier() {
        let mut s = Session::new();
        click(&mut s);
        assert_eq!(s.resource_count, 1.0);
        s.multiplier = 4.0;
        click(&mut s);
        assert_eq!(s.resource_count, 5.0);
    }

    #[test]
    fn buy_multiplier_success() {
        let mut s = Session::new();
        s.resource_count = 30.0;
        assert!(buy_multiplier(&mut s));
        assert_eq!(s.resource_count, 5.0);
        assert_eq!(s.multiplier, 2.0);
        assert_eq!(s.multiplier_cost, 30.0);
    }

    #[test]
    fn buy_multiplier_exact_balance() {
        let mut s = Session::new();
        s.resource_count = 25.0;
        assert!(buy_multiplier(&mut s));
        assert_eq!(s.resource_count, 0.0);
    }

    #[test]
    fn buy_multiplier_insufficient_funds() {
        let mut s = Session::new();
        s.resource_count = 24.0;
        let before = s.clone();
        assert!(!buy_multiplier(&mut s));
        assert!(!buy_multiplier(&mut s));
        assert_eq!(s, before);
    }

    #[test]
    fn buy_auto_upgrade_success() {
        let mut s = Session::new();
        s.resource_count = 60.0;
        assert!(buy_auto_upgrade(&mut s));
        assert_eq!(s.resource_count, 10.0);
        assert_eq!(s.auto_upgrade_level, 1);
        assert_eq!(s.auto_upgrade_cost, 50.0);

        s.resource_count = 50.0;
        assert!(buy_auto_upgrade(&mut s));
        assert_eq!(s.auto_upgrade_level, 2);
        assert_eq!(s.auto_upgrade_cost, 100.0);
    }

    #[test]
    fn buy_auto_upgrade_saturates_at_max_level() {
        let mut s = Session::new();
        s.auto_upgrade_level = u32::MAX;
        s.auto_upgrade_cost = 10.0;
        s.resource_count = 100.0;
        assert!(buy_auto_upgrade(&mut s));
        assert_eq!(s.auto_upgrade_level, u32::MAX);
        assert_eq!(s.resource_count, 90.0);
        assert_eq!(s.auto_upgrade_cost, u32::MAX as f64 * AUTO_UPGRADE_COST_FACTOR);
    }

    #[test]
    fn buy_auto_upgrade_insufficient_funds() {
        let mut s = Session::new();
        s.resource_count = 49.0;
        let before = s.clone();
        assert!(!buy_auto_upgrade(&mut s));
        assert_eq!(s, before);
    }

    #[test]
    fn multiplier_lock_follows_balance() {
        let mut s = Session::new();
        assert!(multiplier_locked(&s));
        s.resource_count = 25.0;
        assert!(!multiplier_locked(&s));
    }

    #[test]
    fn auto_upgrade_lock_at_cap() {
        let mut s = Session::new();
        s.resource_count = 1e9;
        s.auto_upgrade_level = AUTO_UPGRADE_CAP;
        assert!(!auto_upgrade_locked(&s));
        s.auto_upgrade_level = AUTO_UPGRADE_CAP + 1;
        assert!(auto_upgrade_locked(&s));
    }

    #[test]
    fn auto_upgrade_lock_when_poor() {
        let s = Session::new();
        assert!(auto_upgrade_locked(&s));
    }

    #[test]
    fn interval_table() {
        assert_eq!(auto_interval_ms(1), 2000);
        assert_eq!(auto_interval_ms(2), 1900);
        assert_eq!(auto_interval_ms(20), 100);
        assert_eq!(auto_interval_ms(20), (2000i64 - 1900).max(50) as u32);
        assert_eq!(auto_interval_ms(21), 50);
        assert_eq!(auto_interval_ms(40), 50);
        assert_eq!(auto_interval_ms(1000), 50);
    }

    #[test]
    fn interval_at_level_zero_does_not_underflow() {
        assert_eq!(auto_interval_ms(0), 2100);
    }

    #[test]
    fn first_purchase_scenario() {
        let mut s = Session::new();
        click(&mut s);
        assert_eq!(s.resource_count, 1.0);

        assert!(!buy_multiplier(&mut s));
        assert_eq!(s.resource_count, 1.0);
        assert_eq!(s.multiplier, 1.0);
        assert_eq!(s.multiplier_cost, 25.0);

        for _ in 0..24 {
            click(&mut s);
        }
        assert!(buy_multiplier(&mut s));
        assert_eq!(s.resource_count, 0.0);
        assert_eq!(s.multiplier, 2.0);
        assert_eq!(s.multiplier_cost, 30.0);
    }
}
