use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Suffix set backing the coarse domain-oriented match mode.
///
/// Keys are case-normalized suffixes without the trailing dot. The tag
/// records which reload batch loaded the entry; it is audit data only and
/// never consulted during matching.
#[derive(Debug, Clone, Default)]
pub struct DomainSuffixSet {
    entries: FxHashMap<String, String>,
}

impl DomainSuffixSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, suffix: &str, tag: impl Into<String>) {
        let key = suffix.trim_end_matches('.').to_ascii_lowercase();
        if key.is_empty() {
            return;
        }
        self.entries.insert(key, tag.into());
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.entries.contains_key(suffix)
    }

    pub fn tag(&self, suffix: &str) -> Option<&str> {
        self.entries.get(suffix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Progressive suffix match over a fully-qualified query name.
    ///
    /// Splits on `.`, drops the empty label produced by the trailing dot,
    /// then widens a suffix from the two rightmost labels leftward one
    /// label at a time. First member hit wins.
    pub fn matches_name(&self, name: &str) -> bool {
        let mut labels: SmallVec<[&str; 8]> = name.split('.').collect();
        if labels.last() == Some(&"") {
            labels.pop();
        }
        if labels.len() < 2 {
            return false;
        }

        let mut suffix = labels[labels.len() - 1].to_ascii_lowercase();
        for label in labels[..labels.len() - 1].iter().rev() {
            let candidate = format!("{}.{}", label.to_ascii_lowercase(), suffix);
            if self.entries.contains_key(&candidate) {
                return true;
            }
            suffix = candidate;
        }
        false
    }
}
