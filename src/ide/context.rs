//! Import context — the immutable snapshot a resolution request runs in.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::hir::{
    AttrMode, Edition, ItemId, ItemKind, ModuleId, ModuleTree, SearchScope,
};

/// Syntactic position of the unresolved reference; determines which item
/// kinds are acceptable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefPosition {
    /// Type position (`let x: Here`, `fn f() -> Here`).
    Type,
    /// Value position (`let x = here()`).
    Value,
    /// Trait reference (`impl Here for T`, `dyn Here`).
    TraitRef,
    /// Struct-literal position (`Here { field: .. }`); requires
    /// brace-style field initialization.
    StructLiteral,
    /// Pattern-binding position (`match x { Here => .. }`).
    Pattern,
}

impl RefPosition {
    /// The namespace-compatibility predicate for this position.
    pub fn accepts(self, kind: ItemKind) -> bool {
        match self {
            RefPosition::Type => kind.is_type(),
            RefPosition::Value => kind.is_value(),
            RefPosition::TraitRef => matches!(kind, ItemKind::Trait),
            RefPosition::StructLiteral => kind.supports_struct_literal(),
            RefPosition::Pattern => matches!(
                kind,
                ItemKind::Const | ItemKind::Struct(crate::hir::FieldStyle::Unit)
            ),
        }
    }
}

/// Where a resolved method variant comes from. Only trait
/// implementations ever need an import; the other sources are already
/// usable at the call site.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodSource {
    /// Inherent `impl` — no import needed, ever.
    Inherent,
    /// A trait implementation; importing the trait makes the method
    /// callable.
    TraitImpl(ItemId),
    /// A generic bound (`T: Trait`) — the trait is necessarily in scope.
    TraitBound(ItemId),
    /// A trait object (`dyn Trait`) — likewise.
    TraitObject(ItemId),
}

/// One resolved variant of a method call, as supplied by the host's
/// typing signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MethodResolution {
    pub source: MethodSource,
}

impl MethodResolution {
    pub fn new(source: MethodSource) -> Self {
        Self { source }
    }
}

/// The unresolved reference a fix is requested for.
#[derive(Clone, Debug)]
pub enum UnresolvedReference {
    /// A path expression (`Frobnicator`, qualified or not — only the
    /// base name is searched).
    Path { name: SmolStr },
    /// A method call (`receiver.frobnicate()`), with the host's resolved
    /// variants for the receiver type.
    MethodCall {
        name: SmolStr,
        variants: Vec<MethodResolution>,
    },
}

impl UnresolvedReference {
    /// Convenience constructor for a path reference.
    pub fn path(name: &str) -> Self {
        UnresolvedReference::Path { name: name.into() }
    }

    /// The referenced simple name.
    pub fn name(&self) -> &str {
        match self {
            UnresolvedReference::Path { name }
            | UnresolvedReference::MethodCall { name, .. } => name,
        }
    }
}

/// Immutable snapshot taken when resolution is requested.
///
/// Created fresh per request and discarded afterwards; nothing here
/// persists or is shared across requests.
#[derive(Clone, Debug)]
pub struct ImportContext {
    /// The module the reference appears in.
    pub module: ModuleId,
    /// Ancestor chain of `module`, innermost first, crate root last.
    pub super_mods: Vec<ModuleId>,
    /// Workspace search scope (minus excluded packages).
    pub scope: SearchScope,
    /// Syntactic position of the reference.
    pub position: RefPosition,
    /// Standard-library attribute mode of the file.
    pub attr_mode: AttrMode,
    /// Path-syntax edition of the importing crate.
    pub edition: Edition,
    /// Traits already usable at the reference site.
    pub traits_in_scope: FxHashSet<ItemId>,
}

impl ImportContext {
    /// Snapshot a context for a reference in `module`.
    pub fn new(tree: &ModuleTree, module: ModuleId, position: RefPosition) -> Self {
        let super_mods = tree.super_mods(module);
        let edition = tree.krate(tree.crate_of(module)).edition;
        Self {
            module,
            super_mods,
            scope: SearchScope::everything(),
            position,
            attr_mode: AttrMode::Normal,
            edition,
            traits_in_scope: FxHashSet::default(),
        }
    }

    /// Restrict the search scope.
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the file's standard-library attribute mode.
    pub fn with_attr_mode(mut self, mode: AttrMode) -> Self {
        self.attr_mode = mode;
        self
    }

    /// Record a trait as already in scope at the reference site.
    pub fn with_trait_in_scope(mut self, trait_item: ItemId) -> Self {
        self.traits_in_scope.insert(trait_item);
        self
    }
}
