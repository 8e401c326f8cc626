use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use crate::table::{Column, FieldTable, SortDirection};

use super::super::view::UiContext;

const HIGHLIGHT_SYMBOL: &str = "» ";
const FILTER_PREFIX: &str = "/";

pub fn render_fields_table(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = ctx.table.rows(ctx.form);
    let total = ctx.form.view().fields.len();
    let selected_position = ctx.table.selected_position(ctx.form);
    let selected_column = ctx.table.selected_column();

    let header = Row::new(Column::all().map(|column| header_cell(column, ctx))).height(2);
    let body: Vec<Row<'static>> = rows
        .iter()
        .enumerate()
        .map(|(position, row)| {
            let on_cursor = selected_position == Some(position);
            Row::new(Column::all().map(|column| {
                let content = match column.flag() {
                    Some(flag) => checkbox(row.flag(flag)).to_string(),
                    None => row.name().to_string(),
                };
                let mut cell = Cell::from(content);
                if on_cursor && column == selected_column {
                    cell = cell.style(Style::default().add_modifier(Modifier::REVERSED));
                }
                cell
            }))
        })
        .collect();

    let title = format!("Fields ({} of {total})", rows.len());
    let table = Table::new(body, Column::all().map(column_width))
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);
    let mut state = TableState::default().with_selected(selected_position);
    frame.render_stateful_widget(table, area, &mut state);

    if ctx.editing_filter {
        let before_cursor: String = ctx
            .table
            .filter_value()
            .chars()
            .take(ctx.filter_cursor)
            .collect();
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(UnicodeWidthStr::width(HIGHLIGHT_SYMBOL) as u16)
            .saturating_add(FILTER_PREFIX.len() as u16)
            .saturating_add(UnicodeWidthStr::width(before_cursor.as_str()) as u16)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y.saturating_add(2)));
    }
}

fn header_cell(column: Column, ctx: &UiContext<'_>) -> Cell<'static> {
    let is_selected = ctx.table.selected_column() == column;
    let title_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let mut title = vec![Span::styled(column.header(), title_style)];
    if let Some(sort) = ctx.table.sort().filter(|sort| sort.column == column) {
        title.push(Span::raw(sort_indicator(sort.direction)));
    }

    let detail = match column.flag() {
        Some(flag) => Line::from(FieldTable::aggregate(ctx.form, flag).symbol()),
        None => filter_line(ctx),
    };
    Cell::from(Text::from(vec![Line::from(title), detail]))
}

fn filter_line(ctx: &UiContext<'_>) -> Line<'static> {
    let value = ctx.table.filter_value();
    if ctx.editing_filter {
        return Line::from(Span::styled(
            format!("{FILTER_PREFIX}{value}"),
            Style::default().fg(Color::White).bg(Color::Blue),
        ));
    }
    if value.is_empty() {
        Line::from(Span::styled(
            format!("{FILTER_PREFIX} filter"),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!("{FILTER_PREFIX}{value}"),
            Style::default().fg(Color::Magenta),
        ))
    }
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Name => Constraint::Min(12),
        Column::Flag(_) => {
            let header = UnicodeWidthStr::width(column.header()) + sort_indicator_width();
            Constraint::Length(header.max(checkbox(true).len()) as u16)
        }
    }
}

fn sort_indicator(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

fn sort_indicator_width() -> usize {
    UnicodeWidthStr::width(sort_indicator(SortDirection::Ascending))
}

fn checkbox(value: bool) -> &'static str {
    if value { "[x]" } else { "[ ]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_columns_leave_room_for_the_sort_arrow() {
        assert_eq!(column_width(Column::Name), Constraint::Min(12));
        for column in Column::all().skip(1) {
            let Constraint::Length(width) = column_width(column) else {
                panic!("flag columns have a fixed width");
            };
            assert!(width as usize >= column.header().len() + 2);
        }
    }
}
