//! Qualified items — a declaration paired with the path it is visible
//! under.
//!
//! The same declaration can be reachable under several qualified names:
//! its own declaration site, any `pub use`-style re-export of it, or a
//! chain of re-exports. Each of those is a separate `QualifiedNamedItem`
//! and a separate import candidate.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::ids::{ItemId, ModuleId, ReexportId};
use super::item::{Container, ReexportTarget, Visibility};
use super::tree::ModuleTree;

/// A named declaration together with its qualified path, expressed as
/// the chain of enclosing modules (innermost first, crate root last).
///
/// Closed union — every consumption site matches exhaustively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QualifiedNamedItem {
    /// The declaration itself, at its declaration site.
    Explicit {
        item: ItemId,
        super_mods: Vec<ModuleId>,
    },
    /// The declaration as seen through one re-export directive.
    Reexported {
        reexport: ReexportId,
        item: ItemId,
        super_mods: Vec<ModuleId>,
    },
    /// The declaration as seen through a chain of re-exports.
    Composite {
        /// The chain, starting at the visible directive.
        chain: Vec<ReexportId>,
        item: ItemId,
        super_mods: Vec<ModuleId>,
    },
}

impl QualifiedNamedItem {
    /// Qualify an item at its declaration site.
    ///
    /// Returns `None` when the item is detached from the module tree
    /// (broken ancestry) — such items are excluded from candidacy.
    pub fn explicit(tree: &ModuleTree, item: ItemId) -> Option<Self> {
        let parent = match tree.item(item).container {
            Container::Module(m) => m,
            // Associated items are reached through their owner's module;
            // they are never directly importable paths themselves.
            Container::TraitBody(owner) | Container::Impl(owner) => {
                match tree.item(owner).container {
                    Container::Module(m) => m,
                    _ => return None,
                }
            }
            Container::Detached => return None,
        };
        Some(QualifiedNamedItem::Explicit {
            item,
            super_mods: tree.super_mods(parent),
        })
    }

    /// Qualify an item as seen through a re-export directive.
    ///
    /// Follows chained re-exports to the underlying declaration with a
    /// visited set; a revisited directive is treated as terminal
    /// (first-seen-wins), which turns cyclic chains into `None`.
    pub fn from_reexport(tree: &ModuleTree, reexport: ReexportId) -> Option<Self> {
        let mut chain = vec![reexport];
        let mut visited: FxHashSet<ReexportId> = FxHashSet::default();
        visited.insert(reexport);

        let mut current = reexport;
        let item = loop {
            match tree.reexport(current).target {
                ReexportTarget::Item(item) => break item,
                ReexportTarget::Reexport(next) => {
                    if !visited.insert(next) {
                        // Cycle: never reaches a concrete declaration.
                        return None;
                    }
                    chain.push(next);
                    current = next;
                }
            }
        };

        let super_mods = tree.super_mods(tree.reexport(reexport).module);
        Some(if chain.len() == 1 {
            QualifiedNamedItem::Reexported {
                reexport,
                item,
                super_mods,
            }
        } else {
            QualifiedNamedItem::Composite {
                chain,
                item,
                super_mods,
            }
        })
    }

    /// The set of additional qualified names the same declaration is
    /// visible under, following re-export directives transitively.
    ///
    /// Finite even in the presence of cyclic re-exports: each directive
    /// is considered once.
    pub fn with_reexports(&self, tree: &ModuleTree) -> Vec<QualifiedNamedItem> {
        let target = self.item();
        tree.all_reexports()
            .filter_map(|(id, _)| QualifiedNamedItem::from_reexport(tree, id))
            .filter(|q| q.item() == target)
            .collect()
    }

    /// The underlying declaration.
    pub fn item(&self) -> ItemId {
        match *self {
            QualifiedNamedItem::Explicit { item, .. }
            | QualifiedNamedItem::Reexported { item, .. }
            | QualifiedNamedItem::Composite { item, .. } => item,
        }
    }

    /// Enclosing-module chain of the visible path, innermost first.
    /// Never empty: the crate root is always the last element.
    pub fn super_mods(&self) -> &[ModuleId] {
        match self {
            QualifiedNamedItem::Explicit { super_mods, .. }
            | QualifiedNamedItem::Reexported { super_mods, .. }
            | QualifiedNamedItem::Composite { super_mods, .. } => super_mods,
        }
    }

    /// Is this reached through a chain of re-exports?
    pub fn is_composite(&self) -> bool {
        matches!(self, QualifiedNamedItem::Composite { .. })
    }

    /// Immediate parent module of the visible declaration.
    pub fn parent_module(&self) -> ModuleId {
        self.super_mods()[0]
    }

    /// Declared visibility of the visible entity — the re-export
    /// directive for re-exported paths, the item itself otherwise.
    pub fn declared_visibility(&self, tree: &ModuleTree) -> Visibility {
        match self {
            QualifiedNamedItem::Explicit { item, .. } => tree.item(*item).visibility,
            QualifiedNamedItem::Reexported { reexport, .. } => {
                tree.reexport(*reexport).visibility
            }
            QualifiedNamedItem::Composite { chain, .. } => tree.reexport(chain[0]).visibility,
        }
    }

    /// Name the declaration is visible under at this path (the alias at
    /// the re-export site, or the item's own name).
    pub fn visible_name(&self, tree: &ModuleTree) -> SmolStr {
        match self {
            QualifiedNamedItem::Explicit { item, .. } => tree.item_name(*item),
            QualifiedNamedItem::Reexported { reexport, .. } => {
                tree.name_str(tree.reexport(*reexport).name)
            }
            QualifiedNamedItem::Composite { chain, .. } => {
                tree.name_str(tree.reexport(chain[0]).name)
            }
        }
    }

    /// Crate-relative path text: super-module names (excluding the crate
    /// root), then the visible name, `::`-joined.
    pub fn crate_relative_path(&self, tree: &ModuleTree) -> String {
        let mods = self.super_mods();
        let mut segments: Vec<SmolStr> = mods[..mods.len() - 1]
            .iter()
            .rev()
            .map(|&m| tree.module_name(m))
            .collect();
        segments.push(self.visible_name(tree));
        segments.join("::")
    }
}
