use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::Screen,
    form::{FormState, ValidationReport},
    table::FieldTable,
};

use super::components::{render_fields_table, render_footer, render_general, render_tabs};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub screen: Screen,
    pub form: &'a FormState,
    pub table: &'a FieldTable,
    pub report: &'a ValidationReport,
    pub general_focus: usize,
    pub text_cursor: usize,
    pub editing_filter: bool,
    pub filter_cursor: usize,
    pub loading: Option<&'a str>,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], &ctx);
    match ctx.screen {
        Screen::General => render_general(frame, chunks[1], &ctx),
        Screen::Fields => render_fields_table(frame, chunks[1], &ctx),
    }
    render_footer(frame, chunks[2], &ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::template_view, form::FieldPath};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw_screen(form: &FormState, table: &FieldTable, screen: Screen) -> String {
        let report = form.validate();
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).expect("test terminal");
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    UiContext {
                        title: "Edit View",
                        screen,
                        form,
                        table,
                        report: &report,
                        general_focus: 0,
                        text_cursor: 0,
                        editing_filter: false,
                        filter_cursor: 0,
                        loading: None,
                        status_message: "Ready",
                        dirty: form.is_dirty(),
                        help: Some("Ctrl+S Save"),
                    },
                )
            })
            .expect("draw");
        buffer_text(&terminal)
    }

    fn template_form() -> FormState {
        FormState::new(&template_view()).expect("template loads")
    }

    #[test]
    fn general_screen_shows_name_and_label() {
        let text = draw_screen(&template_form(), &FieldTable::new(), Screen::General);
        assert!(text.contains("Name *"));
        assert!(text.contains("user"));
        assert!(text.contains("Label"));
        assert!(text.contains("User"));
        assert!(text.contains("Ctrl+S Save"));
    }

    #[test]
    fn fields_screen_lists_headers_and_rows() {
        let text = draw_screen(&template_form(), &FieldTable::new(), Screen::Fields);
        for header in ["Name", "Key?", "Grid?", "Read Only?", "Primary Name?"] {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("row_1 "));
        assert!(text.contains("[ ]"));
        assert!(text.contains("Fields (49 of 49)"));
    }

    #[test]
    fn filtered_table_reports_visible_count() {
        let mut table = FieldTable::new();
        table.set_filter("row_4");
        let text = draw_screen(&template_form(), &table, Screen::Fields);
        assert!(text.contains("Fields (11 of 49)"));
        assert!(text.contains("/row_4"));
        assert!(!text.contains("row_39"));
    }

    #[test]
    fn missing_name_is_shown_inline() {
        let mut form = template_form();
        form.set_value(&FieldPath::Name, "").expect("text write");
        let text = draw_screen(&form, &FieldTable::new(), Screen::General);
        assert!(text.contains("name is required"));
        assert!(text.contains("unsaved changes"));
    }
}
