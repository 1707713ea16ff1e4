use std::collections::HashSet;

/// Identifiers an acquisition service already holds, as of the start of a pass
///
/// Built once per pass and never mutated; the next run fetches a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySnapshot {
    ids: HashSet<u32>,
}

impl LibrarySnapshot {
    pub fn new(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }
}
