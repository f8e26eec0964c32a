//! Play simulator for Cookie Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture

use super::autoclick::{AutoClicker, CancelToken};
use super::logic;
use super::state::Session;
use crate::format;

/// Clicks a player makes per simulated second.
const CLICKS_PER_SECOND: u32 = 5;

/// Frame step for the auto clicker (60 fps).
const FRAME_MS: f64 = 1000.0 / 60.0;

struct Outcome {
    session: Session,
    auto_clicks: u64,
    purchases: u32,
}

fn report(seconds: u32, s: &Session, auto_clicks: u64) {
    eprintln!(
        "│ {:>4}s  bank {:>8}  x{:<4} auto Lv.{:<2} ({} ms)  auto clicks {}",
        seconds,
        format::convert(s.resource_count),
        s.multiplier,
        s.auto_upgrade_level,
        logic::auto_interval_ms(s.auto_upgrade_level.max(1)),
        auto_clicks,
    );
}

/// Greedy play: click, then buy the cheaper affordable upgrade until
/// nothing is affordable. The auto clicker is capped the way its control is.
fn simulate(total_seconds: u32, verbose: bool) -> Outcome {
    let mut session = Session::new();
    let mut auto = AutoClicker::new(CancelToken::new());
    let mut now = 0.0;
    let mut auto_clicks = 0u64;
    let mut purchases = 0u32;

    for second in 1..=total_seconds {
        for _ in 0..CLICKS_PER_SECOND {
            logic::click(&mut session);
        }

        let end = second as f64 * 1000.0;
        while now < end {
            if auto.poll(now, &mut session) {
                auto_clicks += 1;
            }
            now += FRAME_MS;
        }

        loop {
            let auto_open = !logic::auto_upgrade_locked(&session);
            let multi_open = !logic::multiplier_locked(&session);
            let bought = match (multi_open, auto_open) {
                (true, true) if session.multiplier_cost <= session.auto_upgrade_cost => {
                    logic::buy_multiplier(&mut session)
                }
                (_, true) => logic::buy_auto_upgrade(&mut session),
                (true, false) => logic::buy_multiplier(&mut session),
                (false, false) => false,
            };
            if !bought {
                break;
            }
            purchases += 1;
        }

        if verbose && second % 60 == 0 {
            report(second, &session, auto_clicks);
        }
    }

    Outcome {
        session,
        auto_clicks,
        purchases,
    }
}

#[test]
fn simulate_greedy_10min() {
    eprintln!("┌─── greedy play, {} clicks/s ───", CLICKS_PER_SECOND);
    let out = simulate(600, true);
    eprintln!("└─── {} purchases", out.purchases);

    let s = &out.session;
    assert!(s.resource_count >= 0.0);
    assert!(s.auto_upgrade_level >= 1);
    assert!(s.auto_upgrade_level <= logic::AUTO_UPGRADE_CAP + 1);
    assert_eq!(s.multiplier_cost, s.multiplier * logic::MULTIPLIER_COST_FACTOR);
    assert_eq!(
        s.auto_upgrade_cost,
        s.auto_upgrade_level as f64 * logic::AUTO_UPGRADE_COST_FACTOR
    );
    assert!(out.auto_clicks > 0);
}

#[test]
fn auto_clicker_never_passes_cap() {
    let out = simulate(3600, false);
    assert_eq!(out.session.auto_upgrade_level, logic::AUTO_UPGRADE_CAP + 1);
}
