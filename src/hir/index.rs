//! Symbol index — name → declaration/re-export lookup.
//!
//! Wraps whatever indexing engine the host provides behind the
//! [`SymbolSource`] trait. [`SymbolIndex`] is the in-crate
//! implementation, built from a [`ModuleTree`]; lookups preserve
//! declaration order, which downstream filtering relies on (the final
//! candidate list is insertion-ordered, never re-sorted).

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::FileId;
use super::ids::{CrateId, ItemId, ReexportId};
use super::tree::ModuleTree;

/// The search scope for index queries: the workspace minus excluded
/// packages.
#[derive(Clone, Debug, Default)]
pub struct SearchScope {
    excluded: FxHashSet<CrateId>,
}

impl SearchScope {
    /// Search everything in the workspace.
    pub fn everything() -> Self {
        Self::default()
    }

    /// Exclude a crate from the search.
    pub fn exclude(mut self, krate: CrateId) -> Self {
        self.excluded.insert(krate);
        self
    }

    /// Does the scope admit symbols from this crate?
    ///
    /// Symbols with no crate metadata are admitted here and rejected
    /// later by reachability analysis.
    pub fn allows(&self, krate: Option<CrateId>) -> bool {
        match krate {
            Some(k) => !self.excluded.contains(&k),
            None => true,
        }
    }
}

/// Queryable source of matching declarations and re-export records.
///
/// The host's own index can implement this directly; the candidate
/// pipeline never depends on the concrete [`SymbolIndex`].
pub trait SymbolSource {
    /// All declared items with the given simple name.
    fn find_declarations_by_name(&self, name: &str, scope: &SearchScope) -> Vec<ItemId>;

    /// All re-export records whose visible name matches.
    fn find_reexports_by_name(&self, name: &str, scope: &SearchScope) -> Vec<ReexportId>;
}

/// In-memory symbol index over a [`ModuleTree`].
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// Simple name → declarations, in declaration order.
    decls: IndexMap<SmolStr, Vec<(ItemId, Option<CrateId>)>>,
    /// Visible name → re-exports, in declaration order.
    reexports: IndexMap<SmolStr, Vec<(ReexportId, CrateId)>>,
    /// File → declarations, for per-file invalidation.
    by_file: IndexMap<FileId, Vec<ItemId>>,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over everything in the tree.
    pub fn from_tree(tree: &ModuleTree) -> Self {
        let mut index = Self::new();
        for (id, item) in tree.all_items() {
            let name = tree.name_str(item.name);
            let krate = tree.crate_of_item(id);
            index.decls.entry(name).or_default().push((id, krate));
            index.by_file.entry(item.file).or_default().push(id);
        }
        for (id, re) in tree.all_reexports() {
            let name = tree.name_str(re.name);
            let krate = tree.crate_of(re.module);
            index.reexports.entry(name).or_default().push((id, krate));
        }
        index
    }

    /// Drop all declarations extracted from a file.
    ///
    /// Used when a file is edited or removed; the index stays usable
    /// without a full rebuild.
    pub fn remove_file(&mut self, file: FileId) {
        if let Some(ids) = self.by_file.swap_remove(&file) {
            let dropped: FxHashSet<ItemId> = ids.into_iter().collect();
            for entries in self.decls.values_mut() {
                entries.retain(|(id, _)| !dropped.contains(id));
            }
            self.decls.retain(|_, entries| !entries.is_empty());
        }
    }

    /// Total number of indexed declarations.
    pub fn len(&self) -> usize {
        self.decls.values().map(Vec::len).sum()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl SymbolSource for SymbolIndex {
    fn find_declarations_by_name(&self, name: &str, scope: &SearchScope) -> Vec<ItemId> {
        self.decls
            .get(name)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, krate)| scope.allows(*krate))
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn find_reexports_by_name(&self, name: &str, scope: &SearchScope) -> Vec<ReexportId> {
        self.reexports
            .get(name)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, krate)| scope.allows(Some(*krate)))
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }
}
