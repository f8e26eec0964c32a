//! Cookie Clicker rendering. Draws only what the presenters left in the
//! [`Surface`](super::display::Surface).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{BUY_AUTO_UPGRADE, BUY_MULTIPLIER, CLICK_COOKIE};
use super::display::Surface;
use super::ClickerGame;

/// Cookie art, 3 lines × 8 chars.
const COOKIE_ART: &[&str; 3] = &["╭━●━●━╮ ", "━●━━●━●━", "╰━●━●━╯ "];

/// Cookie art while a click is flashing.
const COOKIE_CLICK_ART: &[&str; 3] = &[" ╭━●━╮  ", " ━●●●━  ", " ╰━●━╯  "];

/// Cookie panel: 3 art rows + borders.
const COOKIE_HEIGHT: u16 = 5;
/// Shop panel: 2 rows + borders.
const SHOP_HEIGHT: u16 = 4;

pub fn render(game: &ClickerGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(COOKIE_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    render_cookie_display(game, f, chunks[0], click_state);

    let (shop_area, stats_area) = if is_narrow_layout(area.width) {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(SHOP_HEIGHT), Constraint::Min(3)])
            .split(chunks[1]);
        (body[0], body[1])
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        (body[0], body[1])
    };

    render_shop(&game.surface, f, shop_area, click_state);
    render_stats(&game.surface, f, stats_area);
    render_help(f, chunks[2]);
}

fn render_cookie_display(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let flashing = game.click_flash > 0;
    let [top, middle, bottom] = *if flashing { COOKIE_CLICK_ART } else { COOKIE_ART };
    let art_style = Style::default().fg(if flashing { Color::White } else { Color::Yellow });
    let click_style = if flashing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(top, art_style),
        Span::styled(
            format!(" 🍪 {}", game.surface.balance),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(Span::styled(middle, art_style)));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(bottom, art_style),
            Span::styled(" [C] CLICK!", click_style),
        ]),
        CLICK_COOKIE,
    );

    let borders = if area.width >= 60 {
        Borders::ALL
    } else {
        Borders::TOP | Borders::BOTTOM
    };

    // The whole panel is the cookie.
    {
        let mut cs = click_state.borrow_mut();
        cs.add_click_target(area, CLICK_COOKIE);
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Cookie Clicker "),
    );
    f.render_widget(widget, area);
}

fn shop_row<'a>(key: &'a str, label: &'a str, cost: &str, disabled: bool) -> Line<'a> {
    let (key_style, label_style) = if disabled {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    };
    Line::from(vec![
        Span::styled(format!(" {} ", key), key_style),
        Span::styled(label, label_style),
        Span::styled(format!(" {}", cost), Style::default().fg(Color::Cyan)),
    ])
}

fn render_shop(
    surface: &Surface,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        shop_row(
            "[U]",
            "Upgrade clicker",
            &surface.multiplier_cost,
            surface.multiplier_disabled,
        ),
        BUY_MULTIPLIER,
    );
    cl.push_clickable(
        shop_row(
            "[A]",
            "Auto clicker",
            &surface.auto_upgrade_cost,
            surface.auto_upgrade_disabled,
        ),
        BUY_AUTO_UPGRADE,
    );

    let inner_width = area.width.saturating_sub(2);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, inner_width);
    }

    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Shop "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_stats(surface: &Surface, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = surface
        .page
        .iter()
        .map(|line| {
            let style = if line.key.is_some() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(line.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Stats "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[C]/Space click  [U] upgrade  [A] auto clicker",
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}
