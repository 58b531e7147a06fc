//! The module tree — crates, modules, and the declarations they hold.
//!
//! `ModuleTree` is the workspace model everything else runs against. The
//! host tool populates it from its own project metadata; tests build it
//! directly through the same API.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{FileId, Interner, Name};
use super::ids::{CrateId, ItemId, ModuleId, ReexportId};
use super::item::{
    Container, ExternCrateDecl, Item, ItemKind, Reexport, ReexportTarget, Visibility,
};

/// Standard-library attribute mode of a file (or the mode a stdlib crate
/// corresponds to).
///
/// Ordered permissive-to-restrictive: `Normal < NoStd < NoCore`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrMode {
    /// Full standard library available.
    Normal,
    /// `#![no_std]` — only the core distribution.
    NoStd,
    /// `#![no_core]` — no standard distribution at all.
    NoCore,
}

/// Where a crate comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CrateOrigin {
    /// An ordinary workspace or registry crate.
    Workspace,
    /// Part of the standard distribution; the payload is the most
    /// restrictive attribute mode under which the crate is still
    /// available (`std` → `Normal`, `core` → `NoStd`).
    Stdlib(AttrMode),
}

/// Path-syntax dialect of a crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Edition {
    E2015,
    E2018,
}

impl Edition {
    /// Do bare crate-relative paths require a `crate::` prefix?
    #[inline]
    pub fn is_2018_or_later(self) -> bool {
        self >= Edition::E2018
    }
}

/// Per-crate metadata from the build-system workspace model.
#[derive(Clone, Debug)]
pub struct CrateInfo {
    /// Package name as the workspace spells it (may contain `-`).
    pub name: SmolStr,
    /// Name usable in source paths (`-` mapped to `_`).
    pub normalized_name: SmolStr,
    pub origin: CrateOrigin,
    pub edition: Edition,
    /// The crate root module.
    pub root: ModuleId,
    /// Crates this crate depends on.
    pub deps: Vec<CrateId>,
}

/// A module in the tree.
#[derive(Clone, Debug)]
pub struct Module {
    /// Interned module name; for crate roots this is the crate's
    /// normalized name.
    pub name: Name,
    pub visibility: Visibility,
    /// `None` for crate roots.
    pub parent: Option<ModuleId>,
    pub krate: CrateId,
}

/// Arena holding the whole workspace model.
#[derive(Default)]
pub struct ModuleTree {
    interner: Interner,
    crates: Vec<CrateInfo>,
    modules: Vec<Module>,
    items: Vec<Item>,
    reexports: Vec<Reexport>,
    extern_crates: Vec<ExternCrateDecl>,
    /// Child modules per module, in insertion order.
    children: FxHashMap<ModuleId, Vec<ModuleId>>,
    /// Items directly declared per module, in insertion order.
    module_items: FxHashMap<ModuleId, Vec<ItemId>>,
    /// Re-exports declared per module, in insertion order.
    module_reexports: FxHashMap<ModuleId, Vec<ReexportId>>,
}

impl ModuleTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Add a crate and its root module.
    pub fn add_crate(&mut self, name: &str, origin: CrateOrigin, edition: Edition) -> CrateId {
        let krate = CrateId::new(self.crates.len() as u32);
        let normalized: SmolStr = name.replace('-', "_").into();
        let root_name = self.interner.intern(&normalized);
        let root = ModuleId::new(self.modules.len() as u32);
        self.modules.push(Module {
            name: root_name,
            visibility: Visibility::Pub,
            parent: None,
            krate,
        });
        self.crates.push(CrateInfo {
            name: name.into(),
            normalized_name: normalized,
            origin,
            edition,
            root,
            deps: Vec::new(),
        });
        krate
    }

    /// Record that `from` depends on `to`.
    pub fn add_dep(&mut self, from: CrateId, to: CrateId) {
        let deps = &mut self.crates[from.index()].deps;
        if !deps.contains(&to) {
            deps.push(to);
        }
    }

    /// Add a child module.
    pub fn add_module(
        &mut self,
        parent: ModuleId,
        name: &str,
        visibility: Visibility,
    ) -> ModuleId {
        let id = ModuleId::new(self.modules.len() as u32);
        self.modules.push(Module {
            name: self.interner.intern(name),
            visibility,
            parent: Some(parent),
            krate: self.modules[parent.index()].krate,
        });
        self.children.entry(parent).or_default().push(id);
        id
    }

    /// Add an item declared directly in a module.
    pub fn add_item(
        &mut self,
        module: ModuleId,
        name: &str,
        kind: ItemKind,
        visibility: Visibility,
        file: FileId,
    ) -> ItemId {
        let id = self.push_item(name, kind, visibility, Container::Module(module), file);
        self.module_items.entry(module).or_default().push(id);
        id
    }

    /// Add an associated or detached item (not directly module-scoped).
    pub fn add_contained_item(
        &mut self,
        container: Container,
        name: &str,
        kind: ItemKind,
        visibility: Visibility,
        file: FileId,
    ) -> ItemId {
        debug_assert!(!matches!(container, Container::Module(_)));
        self.push_item(name, kind, visibility, container, file)
    }

    fn push_item(
        &mut self,
        name: &str,
        kind: ItemKind,
        visibility: Visibility,
        container: Container,
        file: FileId,
    ) -> ItemId {
        let id = ItemId::new(self.items.len() as u32);
        self.items.push(Item {
            name: self.interner.intern(name),
            kind,
            visibility,
            container,
            file,
        });
        id
    }

    /// Add a re-export directive.
    pub fn add_reexport(
        &mut self,
        module: ModuleId,
        name: &str,
        visibility: Visibility,
        target: ReexportTarget,
    ) -> ReexportId {
        let id = ReexportId::new(self.reexports.len() as u32);
        self.reexports.push(Reexport {
            module,
            name: self.interner.intern(name),
            visibility,
            target,
        });
        self.module_reexports.entry(module).or_default().push(id);
        id
    }

    /// Add an extern-crate declaration to a module.
    pub fn add_extern_crate(&mut self, module: ModuleId, krate: CrateId, alias: Option<&str>) {
        self.extern_crates.push(ExternCrateDecl {
            module,
            krate,
            alias: alias.map(SmolStr::new),
        });
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    pub fn krate(&self, id: CrateId) -> &CrateInfo {
        &self.crates[id.index()]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    pub fn reexport(&self, id: ReexportId) -> &Reexport {
        &self.reexports[id.index()]
    }

    /// Resolve an interned name back to its string.
    pub fn name_str(&self, name: Name) -> SmolStr {
        self.interner
            .lookup(name)
            .unwrap_or_else(|| SmolStr::new("<unknown>"))
    }

    /// Simple name of an item.
    pub fn item_name(&self, id: ItemId) -> SmolStr {
        self.name_str(self.item(id).name)
    }

    /// Name of a module.
    pub fn module_name(&self, id: ModuleId) -> SmolStr {
        self.name_str(self.module(id).name)
    }

    /// The crate a module belongs to.
    pub fn crate_of(&self, module: ModuleId) -> CrateId {
        self.module(module).krate
    }

    /// The crate an item belongs to, if it is attached to the tree.
    pub fn crate_of_item(&self, item: ItemId) -> Option<CrateId> {
        self.parent_module_of_item(item).map(|m| self.crate_of(m))
    }

    /// The module an item is (possibly indirectly) declared under.
    ///
    /// Walks out of trait bodies and impl blocks to the enclosing module.
    /// Returns `None` for detached items.
    pub fn parent_module_of_item(&self, item: ItemId) -> Option<ModuleId> {
        let mut current = item;
        loop {
            match self.item(current).container {
                Container::Module(m) => return Some(m),
                Container::TraitBody(owner) | Container::Impl(owner) => current = owner,
                Container::Detached => return None,
            }
        }
    }

    /// The chain of enclosing modules, innermost first, ending at the
    /// crate root. For a crate root this is the single-element chain.
    pub fn super_mods(&self, module: ModuleId) -> Vec<ModuleId> {
        let mut chain = vec![module];
        let mut current = module;
        while let Some(parent) = self.module(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Child modules, in insertion order.
    pub fn children(&self, module: ModuleId) -> &[ModuleId] {
        self.children.get(&module).map_or(&[], Vec::as_slice)
    }

    /// Find a direct child module by name.
    pub fn child_module(&self, module: ModuleId, name: &str) -> Option<ModuleId> {
        self.children(module)
            .iter()
            .copied()
            .find(|&m| self.module_name(m) == name)
    }

    /// Items directly declared in a module, in insertion order.
    pub fn items_of(&self, module: ModuleId) -> &[ItemId] {
        self.module_items.get(&module).map_or(&[], Vec::as_slice)
    }

    /// Re-exports declared in a module, in insertion order.
    pub fn reexports_of(&self, module: ModuleId) -> &[ReexportId] {
        self.module_reexports
            .get(&module)
            .map_or(&[], Vec::as_slice)
    }

    /// Extern-crate declarations held directly by a module.
    pub fn extern_crates_of(&self, module: ModuleId) -> impl Iterator<Item = &ExternCrateDecl> {
        self.extern_crates.iter().filter(move |d| d.module == module)
    }

    /// Find the extern-crate declaration for `krate` in a module, if any.
    pub fn extern_crate_in(&self, module: ModuleId, krate: CrateId) -> Option<&ExternCrateDecl> {
        self.extern_crates_of(module).find(|d| d.krate == krate)
    }

    /// Iterate all items with their ids, in declaration order.
    pub fn all_items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId::new(i as u32), item))
    }

    /// Iterate all re-exports with their ids, in declaration order.
    pub fn all_reexports(&self) -> impl Iterator<Item = (ReexportId, &Reexport)> {
        self.reexports
            .iter()
            .enumerate()
            .map(|(i, re)| (ReexportId::new(i as u32), re))
    }

    /// Number of crates in the workspace model.
    pub fn crate_count(&self) -> usize {
        self.crates.len()
    }
}

impl std::fmt::Debug for ModuleTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleTree")
            .field("crates", &self.crates.len())
            .field("modules", &self.modules.len())
            .field("items", &self.items.len())
            .field("reexports", &self.reexports.len())
            .finish()
    }
}
