//! # usefix-base
//!
//! Core library for import resolution and auto-import quick fixes.
//!
//! Given an unresolved reference in a source file, this crate discovers
//! every item in the workspace whose name matches, decides whether each
//! candidate is legally reachable (visibility, module nesting, crate
//! boundaries, trait applicability), filters and deduplicates the
//! survivors, and — once one is chosen — synthesizes the `use` and
//! `extern crate` declarations that bring the item into scope.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → quick-fix surface: candidate pipeline, applier, text edits
//!   ↓
//! hir     → semantic model: module tree, symbol index, resolution,
//!           qualified items, reachability
//!   ↓
//! base    → primitives (FileId, Name interning, text positions)
//! ```
//!
//! Parsing, indexing persistence, and the user-interaction layer live in
//! the host tool; this crate consumes them through the narrow traits in
//! [`hir::index`] and [`hir::resolve`].

/// Foundation types: FileId, text positions, Name interning
pub mod base;

/// Semantic model: module tree, symbol index, reachability analysis
pub mod hir;

/// Quick-fix surface: candidate filtering, import application
pub mod ide;

// Re-export commonly needed foundation types
pub use base::{FileId, Interner, LineCol, LineIndex, Name, TextRange, TextSize};
