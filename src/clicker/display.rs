//! Presenter registry and the view model it fills.
//!
//! Presenters read the [`Session`] and write one part of the [`Surface`].
//! `render.rs` only ever draws the surface, so everything shown on screen
//! goes through a presenter.

use thiserror::Error;

use super::logic;
use super::state::{Session, SessionField};
use crate::format;

/// Prefix marking a placeholder line in the page template.
const SHOW_ATTR: &str = "@show=";
/// Substitution token inside a placeholder template.
const TOKEN: char = '$';

#[derive(Debug, Error, PartialEq)]
pub enum DisplayError {
    #[error("page line {0} does not exist")]
    MissingPageLine(usize),
}

/// One line of the stats page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLine {
    /// Session key for placeholder lines, `None` for static text.
    pub key: Option<String>,
    pub template: String,
    /// What is currently shown.
    pub text: String,
}

/// Everything the renderer draws, as last written by the presenters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    pub balance: String,
    pub multiplier_cost: String,
    pub multiplier_disabled: bool,
    pub auto_upgrade_cost: String,
    pub auto_upgrade_disabled: bool,
    pub page: Vec<PageLine>,
}

pub type Presenter = Box<dyn Fn(&Session, &mut Surface) -> Result<(), DisplayError>>;

/// Registration order index of a presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresenterHandle(pub usize);

/// Insertion-ordered presenters. Entries are never removed.
#[derive(Default)]
pub struct Display {
    presenters: Vec<Presenter>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, presenter: F) -> PresenterHandle
    where
        F: Fn(&Session, &mut Surface) -> Result<(), DisplayError> + 'static,
    {
        self.presenters.push(Box::new(presenter));
        PresenterHandle(self.presenters.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    /// Run every presenter once, in registration order. The first error
    /// stops the pass; later presenters keep their previous output.
    pub fn render_all(&self, session: &Session, surface: &mut Surface) -> Result<(), DisplayError> {
        for presenter in &self.presenters {
            presenter(session, surface)?;
        }
        Ok(())
    }
}

/// Register the balance, multiplier and auto clicker presenters.
pub fn register_fixed(display: &mut Display) {
    display.register(|session, surface| {
        surface.balance = format!("{} cookies.", format::convert(session.resource_count));
        Ok(())
    });

    display.register(|session, surface| {
        surface.multiplier_cost = format!("{} cookies", format::convert(session.multiplier_cost));
        surface.multiplier_disabled = logic::multiplier_locked(session);
        Ok(())
    });

    display.register(|session, surface| {
        surface.auto_upgrade_cost =
            format!("{} cookies", format::convert(session.auto_upgrade_cost));
        surface.auto_upgrade_disabled = logic::auto_upgrade_locked(session);
        Ok(())
    });
}

/// Parse the page template. Blank lines are kept, `#` comments dropped.
pub fn scan_page(page: &str) -> Vec<PageLine> {
    page.lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| match line.strip_prefix(SHOW_ATTR) {
            Some(rest) => {
                let (key, template) = rest.split_once(' ').unwrap_or((rest, ""));
                PageLine {
                    key: Some(key.to_string()),
                    template: template.to_string(),
                    text: template.to_string(),
                }
            }
            None => PageLine {
                key: None,
                template: line.to_string(),
                text: line.to_string(),
            },
        })
        .collect()
}

/// Install `page` into the surface and register one presenter per
/// placeholder line. Returns the number of placeholders registered.
pub fn register_page(display: &mut Display, surface: &mut Surface, page: &str) -> usize {
    log::info!("loading page placeholders");
    surface.page = scan_page(page);

    let mut count = 0;
    for (index, line) in surface.page.iter().enumerate() {
        let Some(key) = line.key.clone() else {
            continue;
        };
        if SessionField::from_key(&key).is_none() {
            log::warn!("page placeholder `{key}` is not a session field; it will show 0");
        }
        log::debug!("placeholder `{key}` on line {index}");

        let template = line.template.clone();
        display.register(move |session, surface| {
            let line = surface
                .page
                .get_mut(index)
                .ok_or(DisplayError::MissingPageLine(index))?;
            let value = format::convert(session.get(&key, 0.0));
            line.text = template.replacen(TOKEN, &value, 1);
            Ok(())
        });
        count += 1;
    }
    log::info!("{count} page placeholders loaded");
    count
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn render_all_runs_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut display = Display::new();
        for i in 0..3 {
            let order = order.clone();
            let handle = display.register(move |_, _| {
                order.borrow_mut().push(i);
                Ok(())
            });
            assert_eq!(handle, PresenterHandle(i));
        }
        display
            .render_all(&Session::new(), &mut Surface::default())
            .unwrap();
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn failing_presenter_stops_the_pass() {
        let mut display = Display::new();
        display.register(|_, s| {
            s.balance = "first".into();
            Ok(())
        });
        display.register(|_, _| Err(DisplayError::MissingPageLine(9)));
        display.register(|_, s| {
            s.balance = "third".into();
            Ok(())
        });
        let mut surface = Surface::default();
        let err = display.render_all(&Session::new(), &mut surface).unwrap_err();
        assert_eq!(err, DisplayError::MissingPageLine(9));
        assert_eq!(surface.balance, "first");
    }

    #[test]
    fn fixed_presenters_fill_surface() {
        let mut display = Display::new();
        register_fixed(&mut display);
        assert_eq!(display.len(), 3);

        let mut session = Session::new();
        session.resource_count = 1500.0;
        let mut surface = Surface::default();
        display.render_all(&session, &mut surface).unwrap();

        assert_eq!(surface.balance, "1.5k cookies.");
        assert_eq!(surface.multiplier_cost, "25 cookies");
        assert!(!surface.multiplier_disabled);
        assert_eq!(surface.auto_upgrade_cost, "50 cookies");
        assert!(!surface.auto_upgrade_disabled);
    }

    #[test]
    fn controls_disabled_when_unaffordable() {
        let mut display = Display::new();
        register_fixed(&mut display);
        let mut surface = Surface::default();
        display.render_all(&Session::new(), &mut surface).unwrap();
        assert!(surface.multiplier_disabled);
        assert!(surface.auto_upgrade_disabled);
    }

    #[test]
    fn auto_control_disabled_past_cap() {
        let mut display = Display::new();
        register_fixed(&mut display);
        let mut session = Session::new();
        session.resource_count = 1e12;
        session.auto_upgrade_level = 25;
        let mut surface = Surface::default();
        display.render_all(&session, &mut surface).unwrap();
        assert!(surface.auto_upgrade_disabled);
        assert!(!surface.multiplier_disabled);
    }

    #[test]
    fn scan_page_finds_placeholders() {
        let lines = scan_page("# comment\n@show=multiplier x$ per click\nplain text\n\n@show=bare");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].key.as_deref(), Some("multiplier"));
        assert_eq!(lines[0].template, "x$ per click");
        assert_eq!(lines[1].key, None);
        assert_eq!(lines[1].text, "plain text");
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[3].key.as_deref(), Some("bare"));
        assert_eq!(lines[3].template, "");
    }

    #[test]
    fn placeholder_substitutes_first_token_only() {
        let mut display = Display::new();
        let mut surface = Surface::default();
        let n = register_page(&mut display, &mut surface, "@show=resourceCount $ of $");
        assert_eq!(n, 1);

        let mut session = Session::new();
        session.resource_count = 2_500_000.0;
        display.render_all(&session, &mut surface).unwrap();
        assert_eq!(surface.page[0].text, "2.5m of $");
    }

    #[test]
    fn placeholder_falls_back_to_zero() {
        let mut display = Display::new();
        let mut surface = Surface::default();
        register_page(
            &mut display,
            &mut surface,
            "@show=autoUpgradeLevel Level $\n@show=goldenCookies Golden: $",
        );
        display.render_all(&Session::new(), &mut surface).unwrap();
        assert_eq!(surface.page[0].text, "Level 0");
        assert_eq!(surface.page[1].text, "Golden: 0");
    }

    #[test]
    fn static_lines_register_nothing() {
        let mut display = Display::new();
        let mut surface = Surface::default();
        assert_eq!(register_page(&mut display, &mut surface, "hello\nworld"), 0);
        assert_eq!(display.len(), 0);
        assert_eq!(surface.page.len(), 2);
    }

    #[test]
    fn placeholder_errors_when_line_missing() {
        let mut display = Display::new();
        let mut surface = Surface::default();
        register_page(&mut display, &mut surface, "@show=multiplier $");
        surface.page.clear();
        assert_eq!(
            display.render_all(&Session::new(), &mut surface),
            Err(DisplayError::MissingPageLine(0))
        );
    }

    #[test]
    fn bundled_page_has_placeholders() {
        let mut display = Display::new();
        let mut surface = Surface::default();
        let n = register_page(&mut display, &mut surface, super::super::PAGE);
        assert!(n >= 1);
        for line in &surface.page {
            if let Some(key) = &line.key {
                assert!(SessionField::from_key(key).is_some(), "unknown key {key}");
                assert_eq!(line.template.matches('$').count(), 1);
            }
        }
    }
}
