//! Path resolution — resolving path text to declarations.
//!
//! [`PathResolver`] is the production engine used both for the initial
//! "is this reference actually unresolved" check and for the oracle's
//! post-import simulation. The pipeline only depends on the
//! [`ResolutionEngine`] trait, so tests (or a host tool) can substitute
//! their own engine.

use super::ids::{ItemId, ModuleId};
use super::item::ReexportTarget;
use super::tree::ModuleTree;

/// Result of resolving a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Resolved to exactly one qualified, named declaration.
    Found(ItemId),
    /// Could not resolve the path.
    NotFound,
}

impl ResolveResult {
    /// Get the resolved item if found.
    pub fn item(self) -> Option<ItemId> {
        match self {
            ResolveResult::Found(item) => Some(item),
            ResolveResult::NotFound => None,
        }
    }

    /// Check if resolution was successful.
    pub fn is_found(self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }
}

/// The name-resolution engine consumed by the candidate pipeline.
///
/// `origin` is the module the path appears in; prefixes (`crate::`,
/// `self::`, `super::`) are interpreted relative to it.
pub trait ResolutionEngine {
    fn resolve(&self, path: &str, origin: ModuleId) -> ResolveResult;
}

/// Path resolver over a [`ModuleTree`].
#[derive(Clone, Debug)]
pub struct PathResolver<'a> {
    tree: &'a ModuleTree,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over a module tree.
    pub fn new(tree: &'a ModuleTree) -> Self {
        Self { tree }
    }

    /// Resolve path segments starting from a known module.
    fn resolve_in(&self, mut module: ModuleId, segments: &[&str]) -> ResolveResult {
        let (last, intermediate) = match segments.split_last() {
            Some(parts) => parts,
            None => return ResolveResult::NotFound,
        };

        for seg in intermediate {
            match self.tree.child_module(module, seg) {
                Some(child) => module = child,
                None => return ResolveResult::NotFound,
            }
        }

        // Final segment: a direct declaration wins over a re-export.
        for &id in self.tree.items_of(module) {
            if self.tree.item_name(id) == *last {
                return ResolveResult::Found(id);
            }
        }
        for &id in self.tree.reexports_of(module) {
            if self.tree.name_str(self.tree.reexport(id).name) == *last {
                if let Some(item) = self.follow_reexport(id) {
                    return ResolveResult::Found(item);
                }
            }
        }
        ResolveResult::NotFound
    }

    /// Follow a re-export chain to its item, bailing out on cycles.
    fn follow_reexport(&self, start: super::ids::ReexportId) -> Option<ItemId> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut current = start;
        loop {
            if !seen.insert(current) {
                return None;
            }
            match self.tree.reexport(current).target {
                ReexportTarget::Item(item) => return Some(item),
                ReexportTarget::Reexport(next) => current = next,
            }
        }
    }

    /// Interpret a leading crate alias: an extern-crate declaration in
    /// the origin's ancestor chain, or a direct dependency's name.
    fn crate_root_for_alias(&self, origin: ModuleId, alias: &str) -> Option<ModuleId> {
        let origin_crate = self.tree.crate_of(origin);
        for &m in &self.tree.super_mods(origin) {
            for decl in self.tree.extern_crates_of(m) {
                let name = decl
                    .alias
                    .clone()
                    .unwrap_or_else(|| self.tree.krate(decl.krate).normalized_name.clone());
                if name == alias {
                    return Some(self.tree.krate(decl.krate).root);
                }
            }
        }
        // 2018-style: dependency crate names are in scope without a
        // declaration.
        if self.tree.krate(origin_crate).edition.is_2018_or_later() {
            for &dep in &self.tree.krate(origin_crate).deps {
                if self.tree.krate(dep).normalized_name == alias {
                    return Some(self.tree.krate(dep).root);
                }
            }
        }
        None
    }
}

impl ResolutionEngine for PathResolver<'_> {
    fn resolve(&self, path: &str, origin: ModuleId) -> ResolveResult {
        let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return ResolveResult::NotFound;
        }

        let origin_root = match self.tree.super_mods(origin).last() {
            Some(&root) => root,
            None => return ResolveResult::NotFound,
        };

        match segments[0] {
            "crate" => self.resolve_in(origin_root, &segments[1..]),
            "self" => self.resolve_in(origin, &segments[1..]),
            "super" => {
                let mut module = origin;
                let mut rest = &segments[..];
                while rest.first() == Some(&"super") {
                    match self.tree.module(module).parent {
                        Some(parent) => module = parent,
                        None => return ResolveResult::NotFound,
                    }
                    rest = &rest[1..];
                }
                self.resolve_in(module, rest)
            }
            first => {
                // A crate alias in scope.
                if segments.len() > 1 {
                    if let Some(root) = self.crate_root_for_alias(origin, first) {
                        return self.resolve_in(root, &segments[1..]);
                    }
                }
                // Relative to the origin module.
                let relative = self.resolve_in(origin, &segments);
                if relative.is_found() {
                    return relative;
                }
                // Only the 2015 dialect additionally treats bare paths as
                // crate-relative.
                let edition = self.tree.krate(self.tree.crate_of(origin)).edition;
                if !edition.is_2018_or_later() {
                    return self.resolve_in(origin_root, &segments);
                }
                ResolveResult::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{CrateId, CrateOrigin, Edition, ItemKind, Visibility};

    fn fixture() -> (ModuleTree, CrateId, ModuleId) {
        let mut tree = ModuleTree::new();
        let krate = tree.add_crate("app", CrateOrigin::Workspace, Edition::E2018);
        let root = tree.krate(krate).root;
        (tree, krate, root)
    }

    #[test]
    fn test_resolve_crate_relative() {
        let (mut tree, _, root) = fixture();
        let util = tree.add_module(root, "util", Visibility::Pub);
        let item = tree.add_item(util, "helper", ItemKind::Function, Visibility::Pub, FileId::new(0));

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("crate::util::helper", root), ResolveResult::Found(item));
        assert_eq!(resolver.resolve("util::helper", root), ResolveResult::Found(item));
        assert_eq!(resolver.resolve("crate::util::missing", root), ResolveResult::NotFound);
    }

    #[test]
    fn test_resolve_self_and_super() {
        let (mut tree, _, root) = fixture();
        let outer = tree.add_module(root, "outer", Visibility::Pub);
        let inner = tree.add_module(outer, "inner", Visibility::Pub);
        let in_outer = tree.add_item(outer, "Thing", ItemKind::Enum, Visibility::Pub, FileId::new(0));
        let in_inner = tree.add_item(inner, "Gadget", ItemKind::Enum, Visibility::Pub, FileId::new(0));

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("self::Gadget", inner), ResolveResult::Found(in_inner));
        assert_eq!(resolver.resolve("super::Thing", inner), ResolveResult::Found(in_outer));
        assert_eq!(
            resolver.resolve("super::super::outer::Thing", inner),
            ResolveResult::Found(in_outer)
        );
    }

    #[test]
    fn test_resolve_through_reexport() {
        let (mut tree, _, root) = fixture();
        let detail = tree.add_module(root, "detail", Visibility::Private);
        let item = tree.add_item(detail, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));
        tree.add_reexport(
            root,
            "Widget",
            Visibility::Pub,
            crate::hir::ReexportTarget::Item(item),
        );

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("crate::Widget", root), ResolveResult::Found(item));
    }

    #[test]
    fn test_resolve_via_extern_crate_alias() {
        let (mut tree, _, root) = fixture();
        let dep = tree.add_crate("dep", CrateOrigin::Workspace, Edition::E2015);
        let dep_root = tree.krate(dep).root;
        let item = tree.add_item(dep_root, "Item", ItemKind::Enum, Visibility::Pub, FileId::new(1));
        tree.add_extern_crate(root, dep, Some("renamed"));

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("renamed::Item", root), ResolveResult::Found(item));
        assert_eq!(resolver.resolve("dep::Item", root), ResolveResult::NotFound);
    }

    #[test]
    fn test_resolve_via_dependency_name_2018() {
        let (mut tree, krate, root) = fixture();
        let dep = tree.add_crate("dep", CrateOrigin::Workspace, Edition::E2015);
        let dep_root = tree.krate(dep).root;
        let item = tree.add_item(dep_root, "Item", ItemKind::Enum, Visibility::Pub, FileId::new(1));
        tree.add_dep(krate, dep);

        let resolver = PathResolver::new(&tree);
        // 2018 edition: dependency names resolve without extern crate
        assert_eq!(resolver.resolve("dep::Item", root), ResolveResult::Found(item));
    }

    #[test]
    fn test_bare_name_is_not_crate_relative_on_2018() {
        let (mut tree, _, root) = fixture();
        let detail = tree.add_module(root, "detail", Visibility::Pub);
        let item = tree.add_item(detail, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));
        tree.add_reexport(
            root,
            "Widget",
            Visibility::Pub,
            crate::hir::ReexportTarget::Item(item),
        );
        let user = tree.add_module(root, "user", Visibility::Private);

        let resolver = PathResolver::new(&tree);
        // the root re-export is not in scope inside a nested module
        assert_eq!(resolver.resolve("Widget", user), ResolveResult::NotFound);
        assert_eq!(resolver.resolve("crate::Widget", user), ResolveResult::Found(item));
    }

    #[test]
    fn test_bare_path_is_crate_relative_on_2015() {
        let mut tree = ModuleTree::new();
        let krate = tree.add_crate("app", CrateOrigin::Workspace, Edition::E2015);
        let root = tree.krate(krate).root;
        let util = tree.add_module(root, "util", Visibility::Pub);
        let item = tree.add_item(util, "helper", ItemKind::Function, Visibility::Pub, FileId::new(0));
        let user = tree.add_module(root, "user", Visibility::Private);

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("util::helper", user), ResolveResult::Found(item));
    }

    #[test]
    fn test_unqualified_name_in_module() {
        let (mut tree, _, root) = fixture();
        let item = tree.add_item(root, "local", ItemKind::Function, Visibility::Private, FileId::new(0));

        let resolver = PathResolver::new(&tree);
        assert_eq!(resolver.resolve("local", root), ResolveResult::Found(item));
        assert_eq!(resolver.resolve("absent", root), ResolveResult::NotFound);
    }
}
