use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::form::{GENERAL_FIELDS, GeneralField};

use super::super::view::UiContext;

struct CursorHint {
    line_offset: usize,
    value_width: u16,
}

pub fn render_general(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let content_width = area.width.saturating_sub(6).max(4);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor_hint = None;

    for (index, field) in GENERAL_FIELDS.iter().enumerate() {
        let is_selected = index == ctx.general_focus;
        let value = ctx
            .form
            .get_value(&field.path)
            .and_then(|value| value.as_text().map(str::to_string))
            .unwrap_or_default();
        lines.push(label_line(field, is_selected));

        if is_selected {
            let before_cursor: String = value.chars().take(ctx.text_cursor).collect();
            let inner_width = UnicodeWidthStr::width(value.as_str()).max(content_width as usize / 2);
            let border_line = "─".repeat(inner_width + 2);
            let border_style = Style::default().fg(Color::Yellow);
            lines.push(Line::from(Span::styled(
                format!("┌{border_line}┐"),
                border_style,
            )));
            cursor_hint = Some(CursorHint {
                line_offset: lines.len(),
                value_width: UnicodeWidthStr::width(before_cursor.as_str()) as u16,
            });
            let padding = inner_width - UnicodeWidthStr::width(value.as_str());
            lines.push(Line::from(vec![
                Span::styled("│ ", border_style),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" ".repeat(padding)),
                Span::styled(" │", border_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("└{border_line}┘"),
                border_style,
            )));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(value, Style::default().fg(Color::White)),
            ]));
        }

        if let Some(message) = ctx.report.error_for(&field.path) {
            for line in wrap(message, content_width as usize) {
                lines.push(Line::from(Span::styled(
                    format!("  ⚠ {line}"),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
        }
        lines.push(Line::default());
    }

    let view = ctx.form.view();
    lines.push(Line::from(Span::styled(
        format!("id {} • {} field(s)", view.id, view.fields.len()),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("General").borders(Borders::ALL));
    frame.render_widget(paragraph, area);

    if ctx.editing_filter {
        return;
    }
    if let Some(cursor) = cursor_hint {
        let inner_y = area.y.saturating_add(1);
        let inner_x = area.x.saturating_add(1);
        let line = cursor
            .line_offset
            .min(area.height.saturating_sub(2) as usize) as u16;
        let cursor_x = inner_x
            .saturating_add(2)
            .saturating_add(cursor.value_width)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((cursor_x, inner_y.saturating_add(line)));
    }
}

fn label_line(field: &GeneralField, is_selected: bool) -> Line<'static> {
    let mut label = field.label.to_string();
    if field.required {
        label.push_str(" *");
    }
    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(label, style))
}
