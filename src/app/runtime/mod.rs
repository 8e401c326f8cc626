use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{info, warn};

use crate::{
    domain::View,
    form::{FormState, GENERAL_FIELDS, ValidationReport},
    io::ViewSink,
    presentation::{self, UiContext},
    table::{Column, FieldTable, SortDirection},
};

use super::{
    input::{Dispatch, InputRouter, KeyAction},
    keymap::{KeymapContext, KeymapStore},
    options::UiOptions,
    screen::Screen,
    status::StatusLine,
    terminal::TerminalGuard,
    text_edit::{TextEdit, apply_key},
};

mod loader;

pub(crate) use loader::PendingLoad;

pub(crate) struct App<'s> {
    form: FormState,
    table: FieldTable,
    screen: Screen,
    general_focus: usize,
    text_cursor: usize,
    editing_filter: bool,
    filter_cursor: usize,
    report: ValidationReport,
    options: UiOptions,
    status: StatusLine,
    title: String,
    exit_armed: bool,
    should_quit: bool,
    saved: Option<View>,
    pending_load: Option<PendingLoad>,
    sink: &'s mut dyn ViewSink,
    input_router: InputRouter,
    keymap_store: Arc<KeymapStore>,
}

impl<'s> App<'s> {
    pub fn new(
        form: FormState,
        title: String,
        options: UiOptions,
        sink: &'s mut dyn ViewSink,
    ) -> Self {
        let keymap_store = options.keymap_store.clone();
        let report = form.validate();
        let text_cursor = form.view().name.chars().count();
        Self {
            form,
            table: FieldTable::new(),
            screen: Screen::default(),
            general_focus: 0,
            text_cursor,
            editing_filter: false,
            filter_cursor: 0,
            report,
            options,
            status: StatusLine::new(),
            title,
            exit_armed: false,
            should_quit: false,
            saved: None,
            pending_load: None,
            sink,
            input_router: InputRouter::new(keymap_store.clone()),
            keymap_store,
        }
    }

    pub fn with_pending_load(mut self, pending: PendingLoad) -> Self {
        self.status
            .set_raw(format!("Loading {}...", pending.description()));
        self.pending_load = Some(pending);
        self
    }

    /// Runs until quit; returns the last successfully saved view, if any.
    pub fn run(&mut self) -> Result<Option<View>> {
        let mut terminal = TerminalGuard::enter()?;
        while !self.should_quit {
            self.poll_load();
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => terminal.resize(width, height)?,
                _ => {}
            }
        }
        terminal.restore()?;
        Ok(self.saved.take())
    }

    fn context(&self) -> KeymapContext {
        if self.editing_filter {
            return KeymapContext::Filter;
        }
        match self.screen {
            Screen::General => KeymapContext::General,
            Screen::Fields => KeymapContext::Fields,
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.keymap_store.help_text(self.context())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        presentation::draw(
            frame,
            UiContext {
                title: &self.title,
                screen: self.screen,
                form: &self.form,
                table: &self.table,
                report: &self.report,
                general_focus: self.general_focus,
                text_cursor: self.text_cursor,
                editing_filter: self.editing_filter,
                filter_cursor: self.filter_cursor,
                loading: self.pending_load.as_ref().map(PendingLoad::description),
                status_message: self.status.message(),
                dirty: self.form.is_dirty(),
                help: help.as_deref(),
            },
        );
    }

    fn poll_load(&mut self) {
        let Some(result) = self.pending_load.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        let description = self
            .pending_load
            .take()
            .map(|pending| pending.description().to_string())
            .unwrap_or_default();
        if result.is_ok() && self.form.is_dirty() {
            warn!(source = %description, "fetched view arrived after local edits; not applied");
            self.status
                .set_raw(format!("Kept unsaved edits; {description} was not applied"));
            return;
        }
        match result.and_then(|view| self.form.load(&view).map_err(Into::into)) {
            Ok(()) => {
                self.report = self.form.validate();
                self.text_cursor = self.focused_text().chars().count();
                self.status.set_raw(format!("Loaded {description}"));
            }
            Err(err) => {
                warn!(source = %description, "view fetch failed: {err:#}");
                self.status
                    .set_raw(format!("Loading {description} failed: {err:#}"));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_router.classify(self.context(), &key) {
            Dispatch::Action(action) => self.handle_action(action),
            Dispatch::Text(event) => self.handle_text(&event),
            Dispatch::None => {}
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        if !matches!(action, KeyAction::Quit) {
            self.exit_armed = false;
        }
        match action {
            KeyAction::Save => self.on_save(),
            KeyAction::Reset => self.on_reset(),
            KeyAction::Quit => self.on_exit(),
            KeyAction::ResetStatus => self.status.ready(),
            KeyAction::ShowScreen(screen) => self.switch_screen(screen),
            KeyAction::ScreenStep(delta) => self.switch_screen(self.screen.step(delta)),
            KeyAction::FieldStep(delta) => {
                let len = GENERAL_FIELDS.len() as i32;
                self.general_focus = (self.general_focus as i32 + delta).rem_euclid(len) as usize;
                self.text_cursor = self.focused_text().chars().count();
            }
            KeyAction::RowStep(delta) => self.table.move_row(&self.form, delta),
            KeyAction::ColumnStep(delta) => self.table.move_column(delta),
            KeyAction::ToggleCell => self.toggle_cell(),
            KeyAction::ToggleColumn => self.toggle_column(),
            KeyAction::CycleSort => {
                let column = self.table.selected_column();
                match self.table.sort_selected_column() {
                    Some(sort) => {
                        let direction = match sort.direction {
                            SortDirection::Ascending => "ascending",
                            SortDirection::Descending => "descending",
                        };
                        self.status
                            .set_raw(format!("Sorted by {} {direction}", column.header()));
                    }
                    None => self.status.set_raw("Sort cleared"),
                }
            }
            KeyAction::EditFilter => {
                self.editing_filter = true;
                self.filter_cursor = self.table.filter_value().chars().count();
                self.status.set_raw("Type to filter field names");
            }
            KeyAction::ClearFilter => {
                self.table.clear_filter();
                self.filter_cursor = 0;
                self.status.set_raw("Filter cleared");
            }
            KeyAction::FinishFilter => {
                self.editing_filter = false;
                self.status.ready();
            }
            KeyAction::AddField => self.status.not_implemented("Adding fields"),
            KeyAction::EditField => self.status.not_implemented("Editing fields"),
            KeyAction::DeleteField => self.status.not_implemented("Deleting fields"),
        }
    }

    fn handle_text(&mut self, event: &KeyEvent) {
        self.exit_armed = false;
        if self.editing_filter {
            match apply_key(self.table.filter_value(), self.filter_cursor, event) {
                TextEdit::Changed(text, cursor) => {
                    self.table.set_filter(text);
                    self.filter_cursor = cursor;
                }
                TextEdit::Moved(cursor) => self.filter_cursor = cursor,
                TextEdit::Ignored => {}
            }
            return;
        }
        if self.screen != Screen::General {
            return;
        }
        let field = GENERAL_FIELDS[self.general_focus];
        match apply_key(&self.focused_text(), self.text_cursor, event) {
            TextEdit::Changed(text, cursor) => {
                self.text_cursor = cursor;
                match self.form.set_value(&field.path, text) {
                    Ok(()) => {
                        self.status.editing(field.label);
                        self.after_edit();
                    }
                    Err(err) => self.status.set_raw(err.to_string()),
                }
            }
            TextEdit::Moved(cursor) => self.text_cursor = cursor,
            TextEdit::Ignored => {}
        }
    }

    fn focused_text(&self) -> String {
        let field = GENERAL_FIELDS[self.general_focus];
        self.form
            .get_value(&field.path)
            .and_then(|value| value.as_text().map(str::to_string))
            .unwrap_or_default()
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.editing_filter = false;
        self.screen = screen;
        self.status.set_raw(format!("{} screen", screen.title()));
    }

    fn toggle_cell(&mut self) {
        let row = self
            .table
            .selected_row(&self.form)
            .and_then(|id| self.form.view().field(id))
            .map(|field| field.name.clone());
        match self.table.toggle_selected(&mut self.form) {
            Ok(Some(value)) => {
                let header = self.table.selected_column().header();
                self.status
                    .flag_set(row.as_deref().unwrap_or("?"), header, value);
                self.after_edit();
            }
            Ok(None) if self.table.selected_column() == Column::Name => {
                self.status.set_raw("Move to a flag column to toggle it");
            }
            Ok(None) => self.status.set_raw("No rows to toggle"),
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn toggle_column(&mut self) {
        match self.table.toggle_selected_column(&mut self.form) {
            Ok(Some(value)) => {
                let header = self.table.selected_column().header();
                self.status
                    .column_set(header, value, self.form.view().fields.len());
                self.after_edit();
            }
            Ok(None) => self.status.set_raw("Move to a flag column to check all"),
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn after_edit(&mut self) {
        if self.options.auto_validate {
            self.report = self.form.validate();
        }
    }

    fn on_save(&mut self) {
        if !self.form.is_dirty() {
            self.status.nothing_to_do();
            return;
        }
        self.report = self.form.validate();
        if !self.report.is_valid() {
            self.status.issues_remaining(self.report.issue_count());
            return;
        }
        let view = self.form.submit();
        match self.sink.persist(&view) {
            Ok(()) => {
                info!(view = %view.name, fields = view.fields.len(), "view saved");
                self.form.mark_clean();
                self.saved = Some(view);
                self.status.saved();
            }
            Err(err) => {
                warn!("saving view failed: {err:#}");
                self.status.set_raw(format!("Save failed: {err:#}"));
            }
        }
    }

    fn on_reset(&mut self) {
        if !self.form.is_dirty() {
            self.status.nothing_to_do();
            return;
        }
        self.form.reset();
        self.report = self.form.validate();
        self.text_cursor = self.focused_text().chars().count();
        self.status.discarded();
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}
