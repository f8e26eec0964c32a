//! Cookie Clicker: click for cookies, then spend them on a bigger click or an auto clicker.

pub mod actions;
pub mod autoclick;
pub mod display;
pub mod logic;
pub mod render;
pub mod save;
pub mod sound;
pub mod state;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::time::RefreshClock;

use autoclick::{AutoClicker, CancelToken};
use display::{Display, Surface};
use sound::{Sound, SoundPlayer};
use state::Session;

/// Bundled stats page.
pub const PAGE: &str = include_str!("page.txt");

/// Display refresh rate (passes per second).
pub const REFRESH_RATE: u32 = 60;

/// Refresh ticks the cookie art stays "pressed" after a click.
const CLICK_FLASH_TICKS: u32 = 6;

pub struct ClickerGame {
    pub session: Session,
    display: Display,
    pub surface: Surface,
    autoclick: AutoClicker,
    clock: RefreshClock,
    sounds: Box<dyn SoundPlayer>,
    /// Remaining ticks of the click animation.
    pub click_flash: u32,
    last_save_tick: u64,
}

impl ClickerGame {
    /// Build the game from a page template. Presenters are registered and
    /// run once so the surface is never blank.
    pub fn new(page: &str, sounds: Box<dyn SoundPlayer>) -> Self {
        let mut display = Display::new();
        let mut surface = Surface::default();
        display::register_fixed(&mut display);
        display::register_page(&mut display, &mut surface, page);
        log::info!("{} presenters registered", display.len());

        let mut game = Self {
            session: Session::new(),
            display,
            surface,
            autoclick: AutoClicker::new(CancelToken::new()),
            clock: RefreshClock::new(REFRESH_RATE),
            sounds,
            click_flash: 0,
            last_save_tick: 0,
        };
        game.refresh();
        game
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Key('c' | ' ') => actions::CLICK_COOKIE,
            InputEvent::Key('u') => actions::BUY_MULTIPLIER,
            InputEvent::Key('a') => actions::BUY_AUTO_UPGRADE,
            InputEvent::Key(_) => return false,
            InputEvent::Click(id) => *id,
        };

        match action {
            actions::CLICK_COOKIE => {
                logic::click(&mut self.session);
                self.sounds.play(Sound::Click);
                self.click_flash = CLICK_FLASH_TICKS;
            }
            actions::BUY_MULTIPLIER => {
                // A disabled control ignores activation.
                if self.surface.multiplier_disabled {
                    return true;
                }
                if logic::buy_multiplier(&mut self.session) {
                    self.sounds.play(Sound::Upgrade);
                }
            }
            actions::BUY_AUTO_UPGRADE => {
                if self.surface.auto_upgrade_disabled {
                    return true;
                }
                if logic::buy_auto_upgrade(&mut self.session) {
                    self.sounds.play(Sound::Upgrade);
                }
            }
            _ => return false,
        }
        self.refresh();
        true
    }

    /// Advance to `now_ms` (a `performance.now()` timestamp): run the auto
    /// clicker if due, then refresh the surface on every elapsed tick.
    pub fn frame(&mut self, now_ms: f64) {
        if self.autoclick.poll(now_ms, &mut self.session) {
            self.sounds.play(Sound::Click);
        }

        let ticks = self.clock.update(now_ms);
        if ticks > 0 {
            self.click_flash = self.click_flash.saturating_sub(ticks);
            self.refresh();
        }
    }

    /// Whether enough refresh ticks have passed since the last save.
    pub fn autosave_due(&self) -> bool {
        self.clock.total_ticks - self.last_save_tick >= save::AUTOSAVE_INTERVAL
    }

    pub fn mark_saved(&mut self) {
        self.last_save_tick = self.clock.total_ticks;
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn refresh(&mut self) {
        if let Err(e) = self.display.render_all(&self.session, &mut self.surface) {
            log::error!("display refresh failed: {e}");
        }
    }
}
