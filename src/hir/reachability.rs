//! Reachability and visibility analysis.
//!
//! Given a candidate's enclosing-module chain and the importing module's
//! chain, decide whether the candidate can be imported at all and what
//! path text the `use` declaration needs — purely local, or through an
//! external-crate declaration.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::ids::{CrateId, ModuleId};
use super::qualified::QualifiedNamedItem;
use super::tree::ModuleTree;

/// How a chosen candidate gets imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportInfo {
    /// Reachable without adding a crate dependency; `use_path` is the
    /// crate-relative path (prefix decided at apply time).
    Local { use_path: String },
    /// Lives in a different crate.
    ExternCrate {
        /// The crate that owns the item.
        krate: CrateId,
        /// Identifier the crate is (or will be) in scope under: the
        /// existing declaration's alias, or the crate's normalized name.
        crate_alias: SmolStr,
        /// A new external-crate declaration must be inserted.
        needs_decl: bool,
        /// Module nesting distance from the importer to the ancestor
        /// holding an existing declaration. `None` means "use from the
        /// crate root" or "no existing declaration needed".
        depth: Option<u32>,
        /// Path text starting with the crate alias.
        use_path: String,
    },
}

impl ImportInfo {
    /// The path text for the generated `use` declaration.
    pub fn use_path(&self) -> &str {
        match self {
            ImportInfo::Local { use_path } | ImportInfo::ExternCrate { use_path, .. } => use_path,
        }
    }

    /// Does applying this import require a new external-crate declaration?
    pub fn needs_extern_crate(&self) -> bool {
        matches!(self, ImportInfo::ExternCrate { needs_decl: true, .. })
    }
}

/// A qualified item paired with the way to import it.
///
/// The unit of filtering, ranking, and final application.
#[derive(Clone, Debug)]
pub struct ImportCandidate {
    pub item: QualifiedNamedItem,
    pub info: ImportInfo,
}

/// Decide whether and how `candidate` can be imported from the module
/// whose ancestor chain is `importer_mods` (innermost first).
///
/// Returns `None` when the candidate is not importable: insufficient
/// visibility along the path, or missing crate metadata.
pub fn analyze_reachability(
    tree: &ModuleTree,
    candidate: &QualifiedNamedItem,
    importer_mods: &[ModuleId],
) -> Option<ImportInfo> {
    let cand_mods = candidate.super_mods();
    debug_assert!(!cand_mods.is_empty());

    let importer_set: FxHashSet<ModuleId> = importer_mods.iter().copied().collect();
    let lca = cand_mods
        .iter()
        .enumerate()
        .find(|(_, m)| importer_set.contains(m));

    match lca {
        // Same crate: the first shared ancestor decides.
        Some((0, _)) => {
            // The candidate sits directly in a common ancestor: always
            // reachable, whatever its declared visibility.
            Some(ImportInfo::Local {
                use_path: candidate.crate_relative_path(tree),
            })
        }
        Some((lca_idx, _)) => {
            if !candidate.declared_visibility(tree).is_pub() {
                return None;
            }
            // Every module strictly between the candidate and the lca
            // must itself be pub.
            if cand_mods[..lca_idx]
                .iter()
                .any(|&m| !tree.module(m).visibility.is_pub())
            {
                return None;
            }
            Some(ImportInfo::Local {
                use_path: candidate.crate_relative_path(tree),
            })
        }
        // Different crates.
        None => {
            if !candidate.declared_visibility(tree).is_pub() {
                return None;
            }
            let cand_root = *cand_mods.last()?;
            let target = tree.crate_of(cand_root);

            // Reuse an existing external-crate declaration anywhere in
            // the importer's ancestor chain.
            let existing = importer_mods.iter().enumerate().find_map(|(depth, &m)| {
                tree.extern_crate_in(m, target)
                    .map(|decl| (depth as u32, m, decl))
            });

            let rel_path = candidate.crate_relative_path(tree);
            let info = match existing {
                Some((depth, module, decl)) => {
                    let crate_alias = decl
                        .alias
                        .clone()
                        .unwrap_or_else(|| tree.krate(target).normalized_name.clone());
                    // A declaration at the crate root is addressable
                    // without any relative prefix.
                    let importer_root = *importer_mods.last()?;
                    let depth = (module != importer_root).then_some(depth);
                    ImportInfo::ExternCrate {
                        krate: target,
                        use_path: format!("{crate_alias}::{rel_path}"),
                        crate_alias,
                        needs_decl: false,
                        depth,
                    }
                }
                None => {
                    let crate_alias = tree.krate(target).normalized_name.clone();
                    ImportInfo::ExternCrate {
                        krate: target,
                        use_path: format!("{crate_alias}::{rel_path}"),
                        crate_alias,
                        needs_decl: true,
                        depth: None,
                    }
                }
            };
            Some(info)
        }
    }
}
