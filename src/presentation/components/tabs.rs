use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Screen;

use super::super::view::UiContext;

const TAB_EXTRA_PADDING: usize = 2;

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let titles: Vec<Line<'static>> = Screen::ALL
        .iter()
        .map(|screen| Line::from(format!(" {} ", screen.title())))
        .collect();
    let tabs_width: usize = Screen::ALL
        .iter()
        .map(|screen| UnicodeWidthStr::width(screen.title()) + TAB_EXTRA_PADDING + 3)
        .sum::<usize>()
        + 2;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(tabs_width as u16), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(titles)
        .block(Block::default().title(ctx.title).borders(Borders::ALL))
        .select(ctx.screen.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let available = chunks[1].width.saturating_sub(2) as usize;
    let view = ctx.form.view();
    let summary = match ctx.loading {
        Some(source) => Span::styled(
            clip(&format!("Loading {source}…"), available),
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::styled(
            clip(
                &format!("{} ({}) • id {}", view.label, view.name, view.id),
                available,
            ),
            Style::default().fg(Color::Cyan),
        ),
    };
    let info = Paragraph::new(Line::from(summary)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(info, chunks[1]);
}

fn clip(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}
