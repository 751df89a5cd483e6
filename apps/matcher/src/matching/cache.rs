//! Requirement cache — memoizes `RequirementSet`s by posting.
//!
//! Extraction is a pure function of its input, so an entry never changes once inserted.
//! Entries are shared as `Arc<RequirementSet>` and never mutated. The cache holds at
//! most `capacity` postings and evicts the oldest insertion first.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::matching::requirements::{RequirementExtractor, RequirementSet};
use crate::models::JobPosting;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Every posting field that feeds extraction. Lookups compare the fields themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PostingKey {
    description: String,
    title: Option<String>,
    location: Option<String>,
    years_required: Option<u32>,
}

impl PostingKey {
    fn of(posting: &JobPosting) -> Self {
        Self {
            description: posting.description.clone(),
            title: posting.title.clone(),
            location: posting.location.clone(),
            years_required: posting.years_required,
        }
    }
}

#[derive(Default)]
struct Entries {
    sets: HashMap<PostingKey, Arc<RequirementSet>>,
    /// Insertion order, oldest first.
    order: VecDeque<PostingKey>,
}

pub struct RequirementCache {
    capacity: usize,
    entries: RwLock<Entries>,
}

impl Default for RequirementCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl RequirementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `0` disables caching: every call extracts afresh.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached set for `posting`, extracting and inserting it on first sight.
    pub fn get_or_extract(
        &self,
        extractor: &RequirementExtractor,
        posting: &JobPosting,
    ) -> Arc<RequirementSet> {
        if self.capacity == 0 {
            return Arc::new(extractor.extract_posting(posting));
        }

        let key = PostingKey::of(posting);
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sets
            .get(&key)
        {
            debug!("Requirement cache hit");
            return Arc::clone(hit);
        }

        let extracted = Arc::new(extractor.extract_posting(posting));
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have inserted while we were extracting; keep the first.
        if let Some(existing) = entries.sets.get(&key) {
            return Arc::clone(existing);
        }

        while entries.order.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.sets.remove(&oldest);
            debug!(capacity = self.capacity, "Requirement cache evicted oldest posting");
        }
        entries.order.push_back(key.clone());
        entries.sets.insert(key, Arc::clone(&extracted));
        extracted
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sets
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
