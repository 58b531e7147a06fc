//! Declarations, re-exports, and extern-crate records.

use smol_str::SmolStr;

use crate::base::{FileId, Name};
use super::ids::{CrateId, ItemId, ModuleId, ReexportId};

/// Declared visibility of an item, module, or re-export.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub` — visible outside the declaring module.
    Pub,
    /// Private — visible only within the declaring module tree.
    Private,
}

impl Visibility {
    /// Check for `pub` visibility.
    #[inline]
    pub fn is_pub(self) -> bool {
        matches!(self, Visibility::Pub)
    }
}

/// How a struct declares its fields.
///
/// Struct-literal positions only accept brace-style initialization, so
/// the distinction matters for namespace filtering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldStyle {
    /// `struct S { a: u32 }` — brace-initializable.
    Named,
    /// `struct S(u32);` — tuple constructor, a value.
    Tuple,
    /// `struct S;` — unit constructor, a value and a pattern.
    Unit,
}

/// The kind of a named declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Struct(FieldStyle),
    Enum,
    Union,
    Trait,
    TypeAlias,
    Function,
    Const,
    Static,
}

impl ItemKind {
    /// Does this kind live in the type namespace?
    pub fn is_type(self) -> bool {
        matches!(
            self,
            ItemKind::Struct(_)
                | ItemKind::Enum
                | ItemKind::Union
                | ItemKind::Trait
                | ItemKind::TypeAlias
        )
    }

    /// Does this kind live in the value namespace?
    ///
    /// Tuple and unit structs contribute a constructor value alongside
    /// their type, so they answer true in both namespaces.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            ItemKind::Function
                | ItemKind::Const
                | ItemKind::Static
                | ItemKind::Struct(FieldStyle::Tuple)
                | ItemKind::Struct(FieldStyle::Unit)
        )
    }

    /// Can this kind be written as a brace-style literal?
    pub fn supports_struct_literal(self) -> bool {
        matches!(self, ItemKind::Struct(FieldStyle::Named) | ItemKind::Union)
    }

    /// Short display label for messages.
    pub fn display(self) -> &'static str {
        match self {
            ItemKind::Struct(_) => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Union => "union",
            ItemKind::Trait => "trait",
            ItemKind::TypeAlias => "type alias",
            ItemKind::Function => "function",
            ItemKind::Const => "const",
            ItemKind::Static => "static",
        }
    }
}

/// The enclosing scope an item is declared in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Container {
    /// Directly inside a module.
    Module(ModuleId),
    /// Inside a `trait` definition body. Such associated items are never
    /// valid import targets (only their implementations are).
    TraitBody(ItemId),
    /// Inside an `impl` block for the given type item.
    Impl(ItemId),
    /// Detached from the module tree (loose fragment, synthetic node).
    /// Always excluded from candidacy.
    Detached,
}

/// A named declaration.
#[derive(Clone, Debug)]
pub struct Item {
    /// Interned simple name.
    pub name: Name,
    pub kind: ItemKind,
    pub visibility: Visibility,
    /// Enclosing scope; the start of the super-module chain.
    pub container: Container,
    /// File the declaration was extracted from.
    pub file: FileId,
}

/// What a re-export directive points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReexportTarget {
    /// Directly republishes a declaration.
    Item(ItemId),
    /// Republishes another re-export (a chain).
    Reexport(ReexportId),
}

/// A `pub use`-style re-export record.
///
/// Republishes an item under an additional path without moving its
/// definition. The visible name may differ from the item's own name
/// (an alias).
#[derive(Clone, Debug)]
pub struct Reexport {
    /// Module the directive is declared in.
    pub module: ModuleId,
    /// Name the target is visible under at this location.
    pub name: Name,
    pub visibility: Visibility,
    pub target: ReexportTarget,
}

/// An `extern crate`-style declaration linking a crate into a module.
#[derive(Clone, Debug)]
pub struct ExternCrateDecl {
    /// Module holding the declaration.
    pub module: ModuleId,
    /// The crate being linked.
    pub krate: CrateId,
    /// Local alias, if renamed; otherwise the crate's normalized name
    /// is in scope.
    pub alias: Option<SmolStr>,
}
