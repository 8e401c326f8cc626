#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save, Ctrl+R to reset.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn flag_set(&mut self, row: &str, header: &str, value: bool) {
        let state = if value { "on" } else { "off" };
        self.message = format!("{row}: {header} {state}");
    }

    pub fn column_set(&mut self, header: &str, value: bool, count: usize) {
        let state = if value { "checked" } else { "cleared" };
        self.message = format!("{header} {state} on {count} field(s)");
    }

    pub fn nothing_to_do(&mut self) {
        self.message = "No unsaved changes".to_string();
    }

    pub fn saved(&mut self) {
        self.message = "View saved".to_string();
    }

    pub fn discarded(&mut self) {
        self.message = "Changes discarded".to_string();
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining; fix them before saving");
    }

    pub fn not_implemented(&mut self, what: &str) {
        self.message = format!("{what} is not implemented yet");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
