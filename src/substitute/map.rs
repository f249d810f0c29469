//! Ordered placeholder → replacement pairs.

use memchr::memmem::Finder;

use crate::common::{Error, Result};

/// One placeholder with its replacement and a prebuilt substring finder.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) placeholder: String,
    pub(crate) replacement: String,
    pub(crate) finder: Finder<'static>,
}

impl Entry {
    fn new(placeholder: String, replacement: String) -> Self {
        let finder = Finder::new(placeholder.as_bytes()).into_owned();
        Self {
            placeholder,
            replacement,
            finder,
        }
    }

    /// Whether the placeholder occurs in `haystack`.
    #[inline]
    pub(crate) fn occurs_in(&self, haystack: &str) -> bool {
        self.finder.find(haystack.as_bytes()).is_some()
    }
}

/// An ordered mapping from placeholder strings to replacement strings.
///
/// Placeholders are applied in insertion order. Inserting a placeholder that
/// is already present replaces its value and keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    entries: Vec<Entry>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from pairs, in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (placeholder, replacement) in pairs {
            map.insert(placeholder, replacement)?;
        }
        Ok(map)
    }

    /// Insert or update a pair.
    ///
    /// An empty placeholder is rejected: it would match everywhere.
    pub fn insert(
        &mut self,
        placeholder: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<()> {
        let placeholder = placeholder.into();
        let replacement = replacement.into();
        if placeholder.is_empty() {
            return Err(Error::InvalidReplacement(format!(
                "empty placeholder for replacement '{replacement}'"
            )));
        }

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.placeholder == placeholder)
        {
            Some(entry) => entry.replacement = replacement,
            None => self.entries.push(Entry::new(placeholder, replacement)),
        }
        Ok(())
    }

    /// Replacement for a placeholder, if present.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.placeholder == placeholder)
            .map(|entry| entry.replacement.as_str())
    }

    /// Pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.placeholder.as_str(), entry.replacement.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let map = ReplacementMap::from_pairs([("[b]", "2"), ("[a]", "1"), ("[c]", "3")]).unwrap();
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["[b]", "[a]", "[c]"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_duplicate_key_updates_in_place() {
        let mut map = ReplacementMap::from_pairs([("[a]", "1"), ("[b]", "2")]).unwrap();
        map.insert("[a]", "uno").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(("[a]", "uno")));
        assert_eq!(map.get("[a]"), Some("uno"));
        assert_eq!(map.get("[z]"), None);
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let mut map = ReplacementMap::new();
        assert!(matches!(
            map.insert("", "x"),
            Err(Error::InvalidReplacement(_))
        ));
        assert!(map.is_empty());
    }

    #[test]
    fn test_entry_finder() {
        let map = ReplacementMap::from_pairs([("[puerto]", "22")]).unwrap();
        let entry = &map.entries()[0];
        assert!(entry.occurs_in("ssh -p [puerto] host"));
        assert!(!entry.occurs_in("ssh -p [puert host"));
    }
}
