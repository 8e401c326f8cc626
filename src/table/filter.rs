/// Case-insensitive substring match on the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    raw: String,
    needle: String,
}

impl NameFilter {
    /// `None` for an empty value: no predicate at all rather than one that matches everything.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        if raw.is_empty() {
            return None;
        }
        let needle = raw.to_lowercase();
        Some(Self { raw, needle })
    }

    pub fn value(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}
