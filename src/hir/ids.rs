//! Semantic identifiers for the module-tree arenas.
//!
//! All four ids are plain arena indices into a [`crate::hir::ModuleTree`].
//! They are only meaningful together with the tree that produced them.

use std::fmt;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies a compilation-target crate in the workspace model.
    CrateId,
    "CrateId"
);

arena_id!(
    /// Identifies a module in the module tree.
    ModuleId,
    "ModuleId"
);

arena_id!(
    /// Identifies a named declaration (struct, fn, trait, ...).
    ItemId,
    "ItemId"
);

arena_id!(
    /// Identifies a re-export record (`pub use`-style directive).
    ReexportId,
    "ReexportId"
);
