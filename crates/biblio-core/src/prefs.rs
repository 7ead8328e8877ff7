// File: crates/biblio-core/src/prefs.rs
// Summary: Saved tag-filter preference: parsing and the persistence boundary.

/// Split the persisted semicolon-separated tag-name string into names,
/// trimming each entry and dropping empties. The stored value itself is
/// read and written verbatim.
pub fn parse_tag_filter(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One persisted string preference; the host owns the actual storage.
/// Read at UI-open time, written only on explicit user action.
pub trait PreferenceStore {
    fn tag_filter(&self) -> Option<String>;
    fn set_tag_filter(&mut self, value: &str);
}

/// In-memory preference store for tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    tag_filter: Option<String>,
}

impl PreferenceStore for MemoryPreferences {
    fn tag_filter(&self) -> Option<String> {
        self.tag_filter.clone()
    }

    fn set_tag_filter(&mut self, value: &str) {
        self.tag_filter = Some(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tag_filter, MemoryPreferences, PreferenceStore};

    #[test]
    fn splits_trims_and_drops_empties() {
        assert_eq!(
            parse_tag_filter(" machine learning ;; rust ;"),
            vec!["machine learning".to_string(), "rust".to_string()]
        );
        assert!(parse_tag_filter("").is_empty());
        assert!(parse_tag_filter(" ; ; ").is_empty());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.tag_filter(), None);
        prefs.set_tag_filter("a; b");
        assert_eq!(prefs.tag_filter().as_deref(), Some("a; b"));
    }
}
