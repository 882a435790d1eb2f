//! Vendor column name → canonical column name mappings.

/// Ordered mapping from raw column names to canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameMap {
    pairs: &'static [(&'static str, &'static str)],
}

impl RenameMap {
    /// A map that renames nothing.
    pub const EMPTY: RenameMap = RenameMap { pairs: &[] };

    /// Creates a map over `(raw, canonical)` pairs.
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    /// Returns the canonical name for a raw column name.
    pub fn get(&self, raw: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(from, _)| *from == raw)
            .map(|(_, to)| *to)
    }

    /// Returns the name a column carries after renaming.
    pub fn apply<'a>(&self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    /// Iterates over `(raw, canonical)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.pairs.iter().copied()
    }

    /// Number of renamed columns.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the map renames nothing.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: RenameMap = RenameMap::new(&[("time/s", "t"), ("Ewe/V", "E")]);

    #[test]
    fn test_get() {
        assert_eq!(MAP.get("time/s"), Some("t"));
        assert_eq!(MAP.get("t"), None);
        assert_eq!(RenameMap::EMPTY.get("time/s"), None);
    }

    #[test]
    fn test_apply_keeps_unmapped_names() {
        assert_eq!(MAP.apply("Ewe/V"), "E");
        assert_eq!(MAP.apply("mode"), "mode");
    }

    #[test]
    fn test_iter_preserves_order() {
        let pairs: Vec<_> = MAP.iter().collect();
        assert_eq!(pairs, vec![("time/s", "t"), ("Ewe/V", "E")]);
        assert_eq!(MAP.len(), 2);
        assert!(RenameMap::EMPTY.is_empty());
    }
}
