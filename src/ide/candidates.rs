//! Candidate discovery, filtering, and validation.
//!
//! [`import_candidates`] runs the whole read-only pipeline: index query,
//! namespace filter, trait-method filter, standard-library mode filter,
//! redundant-path elimination, and the resolution-simulation check.
//! Rejected candidates are dropped silently; an empty result means "no
//! fix to offer", never an error.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::hir::{
    analyze_reachability, AttrMode, Container, CrateOrigin, ImportCandidate, ItemId, ModuleTree,
    QualifiedNamedItem, ResolutionEngine, SymbolSource,
};

use super::context::{ImportContext, MethodSource, RefPosition, UnresolvedReference};

/// Compute the import candidates for an unresolved reference.
///
/// The returned list preserves index insertion order; no secondary sort
/// is applied. Empty means nothing to import (including "the reference
/// already resolves" and "the needed trait is already in scope").
pub fn import_candidates(
    tree: &ModuleTree,
    symbols: &dyn SymbolSource,
    engine: &dyn ResolutionEngine,
    ctx: &ImportContext,
    reference: &UnresolvedReference,
) -> Vec<ImportCandidate> {
    // References that already resolve need no import.
    if let UnresolvedReference::Path { name } = reference {
        if engine.resolve(name, ctx.module).is_found() {
            return Vec::new();
        }
    }

    let (qualified, position) = match reference {
        UnresolvedReference::Path { name } => {
            (gather_by_name(tree, symbols, ctx, name), ctx.position)
        }
        UnresolvedReference::MethodCall { variants, .. } => {
            // Only trait-implementation variants can be fixed by an
            // import; bounds, trait objects, and inherent impls already
            // have the method in scope.
            let needed: Vec<ItemId> = variants
                .iter()
                .filter_map(|v| match v.source {
                    MethodSource::TraitImpl(t) => Some(t),
                    MethodSource::Inherent
                    | MethodSource::TraitBound(_)
                    | MethodSource::TraitObject(_) => None,
                })
                .collect();
            if needed.is_empty() {
                return Vec::new();
            }
            if needed.iter().any(|t| ctx.traits_in_scope.contains(t)) {
                // The call will resolve once the host re-checks; there
                // is nothing to add.
                return Vec::new();
            }
            (gather_traits(tree, &needed), RefPosition::TraitRef)
        }
    };
    debug!(gathered = qualified.len(), "import candidates gathered");

    // Namespace filter.
    let qualified: Vec<QualifiedNamedItem> = qualified
        .into_iter()
        .filter(|q| position.accepts(tree.item(q.item()).kind))
        .collect();

    // Reachability: unimportable candidates drop out here.
    let candidates: Vec<ImportCandidate> = qualified
        .into_iter()
        .filter_map(|item| {
            analyze_reachability(tree, &item, &ctx.super_mods)
                .map(|info| ImportCandidate { item, info })
        })
        .collect();
    debug!(reachable = candidates.len(), "reachability analyzed");

    let candidates = filter_stdlib_mode(tree, ctx.attr_mode, candidates);
    let candidates = eliminate_redundant_paths(tree, candidates);

    // Final oracle pass: simulate post-import resolution.
    let survivors: Vec<ImportCandidate> = candidates
        .into_iter()
        .filter(|c| simulate_resolution(tree, engine, ctx, position, c))
        .collect();
    debug!(survivors = survivors.len(), "candidates validated");
    survivors
}

/// All qualified names matching a path reference: declaration sites,
/// their re-export paths, and directly indexed re-exports. Stable
/// deduplication; only paths that actually bind the referenced name
/// are kept.
fn gather_by_name(
    tree: &ModuleTree,
    symbols: &dyn SymbolSource,
    ctx: &ImportContext,
    name: &str,
) -> Vec<QualifiedNamedItem> {
    let mut out: Vec<QualifiedNamedItem> = Vec::new();
    let mut push = |q: QualifiedNamedItem| {
        if !out.contains(&q) {
            out.push(q);
        }
    };

    for item in symbols.find_declarations_by_name(name, &ctx.scope) {
        if let Some(q) = QualifiedNamedItem::explicit(tree, item) {
            for re in q.with_reexports(tree) {
                push(re);
            }
            push(q);
        }
    }
    for re in symbols.find_reexports_by_name(name, &ctx.scope) {
        if let Some(q) = QualifiedNamedItem::from_reexport(tree, re) {
            push(q);
        }
    }

    // An aliased re-export binds the alias, not the referenced name.
    out.retain(|q| q.visible_name(tree) == name);
    out
}

/// Qualified names for a set of traits (method-call fixes). Any path to
/// the trait works here, aliased or not.
fn gather_traits(tree: &ModuleTree, traits: &[ItemId]) -> Vec<QualifiedNamedItem> {
    let mut out: Vec<QualifiedNamedItem> = Vec::new();
    let mut push = |q: QualifiedNamedItem| {
        if !out.contains(&q) {
            out.push(q);
        }
    };
    for &t in traits {
        if let Some(q) = QualifiedNamedItem::explicit(tree, t) {
            for re in q.with_reexports(tree) {
                push(re);
            }
            push(q);
        }
    }
    out
}

/// The standard-library compatibility mode of a candidate's owning
/// crate, when it comes from the standard distribution.
fn stdlib_mode(tree: &ModuleTree, candidate: &ImportCandidate) -> Option<AttrMode> {
    let root = *candidate.item.super_mods().last()?;
    match tree.krate(tree.crate_of(root)).origin {
        CrateOrigin::Stdlib(mode) => Some(mode),
        CrateOrigin::Workspace => None,
    }
}

/// Standard-library mode filter. Among the paths to one underlying
/// declaration, a crate matching the file's attribute mode exactly
/// shadows the others; distinct declarations are filtered independently.
/// Stdlib paths unusable under the file's mode are then dropped, unless
/// that would leave nothing to offer. Workspace candidates pass through.
fn filter_stdlib_mode(
    tree: &ModuleTree,
    file_mode: AttrMode,
    candidates: Vec<ImportCandidate>,
) -> Vec<ImportCandidate> {
    // Declarations that have an exact-mode path.
    let exact_items: FxHashSet<ItemId> = candidates
        .iter()
        .filter(|c| stdlib_mode(tree, c) == Some(file_mode))
        .map(|c| c.item.item())
        .collect();

    let candidates: Vec<ImportCandidate> = candidates
        .into_iter()
        .filter(|c| match stdlib_mode(tree, c) {
            None => true,
            Some(mode) => mode == file_mode || !exact_items.contains(&c.item.item()),
        })
        .collect();

    // Availability cut, with a best-effort fallback when it would empty
    // the list (a std-only item in a no_std file is still worth offering
    // if nothing else matches).
    let available: Vec<ImportCandidate> = candidates
        .iter()
        .filter(|c| stdlib_mode(tree, c).is_none_or(|mode| mode >= file_mode))
        .cloned()
        .collect();
    if available.is_empty() {
        candidates
    } else {
        available
    }
}

/// Within each owning package, drop a direct path when a shorter
/// re-exported path to the same place survives: a candidate whose
/// ancestor chain contains, above its parent, the parent module of
/// another simple candidate is the longer route. Composite chains are
/// exempt.
fn eliminate_redundant_paths(
    tree: &ModuleTree,
    candidates: Vec<ImportCandidate>,
) -> Vec<ImportCandidate> {
    let package_of = |c: &ImportCandidate| {
        c.item
            .super_mods()
            .last()
            .map(|&root| tree.crate_of(root))
    };

    let mut redundant: Vec<bool> = vec![false; candidates.len()];
    for (i, a) in candidates.iter().enumerate() {
        if a.item.is_composite() {
            continue;
        }
        let deeper = candidates.iter().enumerate().any(|(j, b)| {
            j != i
                && !b.item.is_composite()
                && package_of(a) == package_of(b)
                && a.item.super_mods()[1..].contains(&b.item.parent_module())
        });
        if deeper {
            redundant[i] = true;
        }
    }

    candidates
        .into_iter()
        .zip(redundant)
        .filter_map(|(c, dropped)| (!dropped).then_some(c))
        .collect()
}

/// Resolve the candidate's path through the production engine as if the
/// import were already present, and verify the result is the expected
/// declaration, kind-compatible, and not a bare trait-body signature.
fn simulate_resolution(
    tree: &ModuleTree,
    engine: &dyn ResolutionEngine,
    ctx: &ImportContext,
    position: RefPosition,
    candidate: &ImportCandidate,
) -> bool {
    let rel = candidate.item.crate_relative_path(tree);
    // Extern candidates resolve from their own crate root so the
    // simulation does not depend on a not-yet-inserted declaration.
    let origin = match &candidate.info {
        crate::hir::ImportInfo::Local { .. } => ctx.module,
        crate::hir::ImportInfo::ExternCrate { .. } => {
            match candidate.item.super_mods().last() {
                Some(&root) => root,
                None => return false,
            }
        }
    };

    let resolved = match engine.resolve(&format!("crate::{rel}"), origin).item() {
        Some(item) => item,
        None => return false,
    };
    if resolved != candidate.item.item() {
        return false;
    }
    let item = tree.item(resolved);
    if !position.accepts(item.kind) {
        return false;
    }
    // Signatures inside a trait body are not importable targets.
    !matches!(item.container, Container::TraitBody(_))
}
