// Instance cache - path-keyed store of materialized page objects
//
// One cache per root scope. Every hop of a resolution path is stored under
// its prefix signature so later resolutions reuse it; only the targets of
// successful resolutions count as cached objects.

use crate::error::Result;
use crate::graph::{ResolutionPath, TypeDescriptor};
use crate::object::PageObject;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

struct CacheEntry {
    object: Arc<dyn PageObject>,
    resolved: bool,
}

#[derive(Default)]
pub struct InstanceCache {
    entries: Mutex<HashMap<ResolutionPath, CacheEntry>>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `path`, creating it with `create` if absent.
    ///
    /// Lookup and insert happen under one lock, so concurrent first access
    /// to the same path yields a single instance. The flag is true if the
    /// object was created by this call.
    pub(crate) fn get_or_insert_with<F>(
        &self,
        path: &ResolutionPath,
        create: F,
    ) -> Result<(Arc<dyn PageObject>, bool)>
    where
        F: FnOnce() -> Result<Arc<dyn PageObject>>,
    {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(path) {
            return Ok((Arc::clone(&entry.object), false));
        }
        let object = create()?;
        entries.insert(
            path.clone(),
            CacheEntry {
                object: Arc::clone(&object),
                resolved: false,
            },
        );
        Ok((object, true))
    }

    /// Marks `path` as the target of a successful resolution.
    pub(crate) fn mark_resolved(&self, path: &ResolutionPath) {
        if let Some(entry) = self.entries.lock().get_mut(path) {
            entry.resolved = true;
        }
    }

    pub fn get(&self, path: &ResolutionPath) -> Option<Arc<dyn PageObject>> {
        self.entries.lock().get(path).map(|e| Arc::clone(&e.object))
    }

    /// Distinct resolved objects.
    pub fn object_count(&self) -> usize {
        self.entries.lock().values().filter(|e| e.resolved).count()
    }

    /// Distinct types among resolved objects.
    pub fn type_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(_, e)| e.resolved)
            .filter_map(|(path, _)| path.target().cloned())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every stored object, intermediate hops included.
    pub fn materialized_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Removes every entry whose path passes through `descriptor`.
    pub fn unregister(&self, descriptor: &TypeDescriptor) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|path, _| !path.contains(descriptor));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Resolved paths, sorted.
    pub fn resolved_paths(&self) -> Vec<ResolutionPath> {
        let mut paths: Vec<ResolutionPath> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, e)| e.resolved)
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Node, UiObject};

    #[derive(Default)]
    struct Page {
        node: Node,
    }
    crate::impl_ui_object!(Page);
    impl PageObject for Page {}

    struct Root;
    struct Child;
    struct Other;

    fn path(descriptors: Vec<TypeDescriptor>) -> ResolutionPath {
        ResolutionPath::new(descriptors)
    }

    fn page() -> Result<Arc<dyn PageObject>> {
        Ok(Arc::new(Page::default()))
    }

    #[test]
    fn test_insert_if_absent_is_reference_stable() {
        let cache = InstanceCache::new();
        let p = path(vec![TypeDescriptor::of::<Root>(), TypeDescriptor::of::<Child>()]);

        let (first, created) = cache.get_or_insert_with(&p, page).expect("insert");
        assert!(created);
        let (second, created) = cache.get_or_insert_with(&p, page).expect("lookup");
        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_counts_only_resolved_entries() {
        let cache = InstanceCache::new();
        let hop = path(vec![TypeDescriptor::of::<Root>(), TypeDescriptor::of::<Other>()]);
        let left = path(vec![TypeDescriptor::of::<Root>(), TypeDescriptor::of::<Child>()]);
        let right = path(vec![
            TypeDescriptor::of::<Root>(),
            TypeDescriptor::of::<Other>(),
            TypeDescriptor::of::<Child>(),
        ]);
        for p in [&hop, &left, &right] {
            cache.get_or_insert_with(p, page).expect("insert");
        }
        assert_eq!(cache.object_count(), 0);
        assert_eq!(cache.materialized_count(), 3);

        cache.mark_resolved(&left);
        cache.mark_resolved(&right);
        assert_eq!(cache.object_count(), 2);
        assert_eq!(cache.type_count(), 1);
        assert_eq!(cache.resolved_paths().len(), 2);
    }

    #[test]
    fn test_unregister_removes_paths_through_type() {
        let cache = InstanceCache::new();
        let hop = path(vec![TypeDescriptor::of::<Root>(), TypeDescriptor::of::<Other>()]);
        let below = path(vec![
            TypeDescriptor::of::<Root>(),
            TypeDescriptor::of::<Other>(),
            TypeDescriptor::of::<Child>(),
        ]);
        let beside = path(vec![TypeDescriptor::of::<Root>(), TypeDescriptor::of::<Child>()]);
        for p in [&hop, &below, &beside] {
            cache.get_or_insert_with(p, page).expect("insert");
        }

        assert_eq!(cache.unregister(&TypeDescriptor::of::<Other>()), 2);
        assert!(cache.get(&beside).is_some());
        assert_eq!(cache.unregister(&TypeDescriptor::of::<Other>()), 0);

        cache.clear();
        assert_eq!(cache.materialized_count(), 0);
    }
}
