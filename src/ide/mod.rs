//! Quick-fix surface — candidate computation and import application.
//!
//! This module is what the host tool's quick-fix/intention mechanism
//! calls into:
//!
//! 1. Build an [`ImportContext`] snapshot for the unresolved reference.
//! 2. Call [`import_candidates`] to get the deduplicated, validated
//!    candidate list (empty means "nothing to import" — not an error).
//! 3. Let the user pick one (or auto-pick a single survivor), wrap it in
//!    an [`ImportFix`], and apply it against a [`SourceEdit`].
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: candidate computation is read-only
//! 2. **Silent filtering**: rejected candidates never surface
//! 3. **One-shot application**: a fix fires exactly once

mod apply;
mod candidates;
mod context;
mod edit;

pub use apply::{ApplyError, FixState, ImportFix};
pub use candidates::import_candidates;
pub use context::{ImportContext, MethodResolution, MethodSource, RefPosition, UnresolvedReference};
pub use edit::{InsertionAnchors, SourceEdit, rewrite_method_call, scan_anchors};
