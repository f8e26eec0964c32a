//! Reusable clickable UI components.
//!
//! [`ClickableList`] pairs rendered lines with click actions so that visual
//! output and interactive behaviour stay co-located.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::{Paragraph, Wrap};

use crate::input::ClickState;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// Instead of manually calculating row offsets for click targets, annotate
/// lines as clickable when you add them, then call
/// [`register_targets`](ClickableList::register_targets) once after rendering.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Shop"));
/// cl.push_clickable(Line::from("Upgrade clicker"), BUY_MULTIPLIER);
/// cl.register_targets(area, &mut cs, 1, 1, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs; line_index is the index into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    ///
    /// The action is bound to whatever row this line ends up on. If you
    /// insert or remove lines before it, the target moves automatically.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `area`: the widget area (including borders).
    /// * `top_offset` / `bottom_offset`: border rows above / below content.
    /// * `inner_width`: content width when the paragraph wraps; pass `0`
    ///   when it does not, so each line is exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut row_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            row_starts.push(cumulative);
            let h = visual_height(line, inner_width);
            heights.push(h);
            cumulative = cumulative.saturating_add(h);
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            // Every visual row the line spans is clickable.
            for r in 0..heights[li] {
                let row = content_y.saturating_add(row_starts[li] + r);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

/// Rows a line occupies once wrapped to `width` (1 when not wrapping).
fn visual_height(line: &Line, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let rows = Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.max(1) as u16
}
