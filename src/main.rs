mod clicker;
mod format;
mod input;
mod logging;
mod storage;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use clicker::ClickerGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use storage::CookieJar;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type SharedJar = Rc<RefCell<Box<dyn CookieJar>>>;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    log::debug!("click: pixel=({mouse_x},{mouse_y}) cell=({col},{row})");
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn persist(game: &ClickerGame, jar: &SharedJar) {
    let mut jar = jar.borrow_mut();
    match game.session.save(&mut **jar, storage::now()) {
        Ok(()) => log::debug!("session saved"),
        Err(e) => log::warn!("failed to save session: {e}"),
    }
}

/// Save when the page is hidden or closed.
fn install_exit_listeners(game: &Rc<RefCell<ClickerGame>>, jar: &SharedJar) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_exit = Closure::<dyn FnMut()>::new({
        let game = game.clone();
        let jar = jar.clone();
        move || persist(&game.borrow(), &jar)
    });

    if let Some(document) = window.document() {
        if let Err(e) = document
            .add_event_listener_with_callback("visibilitychange", on_exit.as_ref().unchecked_ref())
        {
            log::warn!("visibilitychange listener not installed: {e:?}");
        }
    }
    if let Err(e) =
        window.add_event_listener_with_callback("beforeunload", on_exit.as_ref().unchecked_ref())
    {
        log::warn!("beforeunload listener not installed: {e:?}");
    }
    // Listeners live as long as the page.
    on_exit.forget();
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init();

    let game = Rc::new(RefCell::new(ClickerGame::new(
        clicker::PAGE,
        clicker::sound::default_player(),
    )));

    let jar: Option<SharedJar> = match storage::browser_jar() {
        Ok(jar) => Some(Rc::new(RefCell::new(jar))),
        Err(e) => {
            log::warn!("cookies unavailable, progress will not be saved: {e}");
            None
        }
    };
    if let Some(jar) = &jar {
        if let Err(e) = game.borrow_mut().session.load(&**jar.borrow()) {
            log::warn!("ignoring saved session: {e}");
        }
        install_exit_listeners(&game, jar);
    }

    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut g = game.borrow_mut();
            g.frame(now_ms());

            if g.autosave_due() {
                if let Some(jar) = &jar {
                    persist(&g, jar);
                }
                g.mark_saved();
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            g.render(f, size, &click_state);
        }
    });

    Ok(())
}
