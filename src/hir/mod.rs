//! Semantic model — module trees, symbols, and reachability.
//!
//! This layer owns the crate/module/item model that import resolution
//! runs against, plus the analyses defined on it:
//!
//! - [`tree`] - the `ModuleTree` arena and workspace crate metadata
//! - [`index`] - name → declaration/re-export lookup ([`SymbolSource`])
//! - [`qualified`] - items paired with their qualified paths
//! - [`reachability`] - can this item be imported from here, and how
//! - [`resolve`] - path resolution ([`ResolutionEngine`])
//! - [`source`] - file path/contents bookkeeping
//!
//! The host's indexing engine can replace [`SymbolIndex`] and
//! [`PathResolver`] wholesale; the pipeline in `ide` only depends on the
//! [`SymbolSource`] and [`ResolutionEngine`] traits.

mod ids;
mod item;
mod qualified;
mod reachability;
mod source;
mod tree;

pub mod index;
pub mod resolve;

pub use ids::{CrateId, ItemId, ModuleId, ReexportId};
pub use index::{SearchScope, SymbolIndex, SymbolSource};
pub use item::{
    Container, ExternCrateDecl, FieldStyle, Item, ItemKind, Reexport, ReexportTarget, Visibility,
};
pub use qualified::QualifiedNamedItem;
pub use reachability::{ImportCandidate, ImportInfo, analyze_reachability};
pub use resolve::{PathResolver, ResolutionEngine, ResolveResult};
pub use source::FileSet;
pub use tree::{AttrMode, CrateInfo, CrateOrigin, Edition, Module, ModuleTree};
