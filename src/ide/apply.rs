//! Import application — turning a chosen candidate into text edits.
//!
//! [`ImportFix`] is a one-shot state machine: it fires exactly once,
//! queuing the use declaration (and, when needed, an external-crate
//! declaration) against a [`SourceEdit`] so both land atomically.

use text_size::TextSize;
use thiserror::Error;
use tracing::debug;

use crate::hir::{AttrMode, CrateOrigin, ImportCandidate, ImportInfo, ModuleTree};

use super::context::ImportContext;
use super::edit::{scan_anchors, SourceEdit};

/// Errors from applying an import fix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The fix has already fired.
    #[error("import fix has already been applied")]
    AlreadyApplied,
}

/// Lifecycle of an [`ImportFix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixState {
    Pending,
    Applied,
}

/// A chosen candidate, ready to be applied to the file once.
#[derive(Debug)]
pub struct ImportFix {
    candidate: ImportCandidate,
    state: FixState,
}

impl ImportFix {
    /// Wrap a chosen candidate.
    pub fn new(candidate: ImportCandidate) -> Self {
        Self {
            candidate,
            state: FixState::Pending,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FixState {
        self.state
    }

    /// The wrapped candidate.
    pub fn candidate(&self) -> &ImportCandidate {
        &self.candidate
    }

    /// Queue this import's declarations against the edit.
    ///
    /// Fires at most once; a second call returns
    /// [`ApplyError::AlreadyApplied`] and queues nothing.
    pub fn apply(
        &mut self,
        tree: &ModuleTree,
        ctx: &ImportContext,
        edit: &mut SourceEdit,
    ) -> Result<(), ApplyError> {
        if self.state == FixState::Applied {
            return Err(ApplyError::AlreadyApplied);
        }
        self.state = FixState::Applied;

        let anchors = scan_anchors(edit.text());
        let end_of_file = TextSize::of(edit.text());

        if let ImportInfo::ExternCrate {
            krate,
            crate_alias,
            needs_decl: true,
            ..
        } = &self.candidate.info
        {
            if !implicitly_available(tree, *krate, ctx.attr_mode) {
                let offset = anchors
                    .last_extern_crate_end
                    .or(anchors.first_item_start)
                    .unwrap_or(end_of_file);
                debug!(alias = %crate_alias, "inserting external-crate declaration");
                edit.insert(offset, format!("extern crate {crate_alias};\n"));
            }
        }

        let prefix = self.prefix(ctx);
        let path = format!("{prefix}{}", self.candidate.info.use_path());

        // After the last use declaration, then after the last
        // external-crate declaration, then before the first item (with a
        // blank-line separator), then at end of file.
        let (offset, text) = if let Some(at) = anchors.last_use_end {
            (at, format!("use {path};\n"))
        } else if let Some(at) = anchors.last_extern_crate_end {
            (at, format!("use {path};\n"))
        } else if let Some(at) = anchors.first_item_start {
            (at, format!("use {path};\n\n"))
        } else {
            (end_of_file, format!("use {path};\n"))
        };
        debug!(%path, "inserting use declaration");
        edit.insert(offset, text);
        Ok(())
    }

    /// Path prefix for the use declaration: `crate::` for same-crate
    /// imports under 2018-or-later path syntax, `self::`/`super::`
    /// chains when reusing an external-crate declaration found below the
    /// crate root.
    fn prefix(&self, ctx: &ImportContext) -> String {
        match &self.candidate.info {
            ImportInfo::Local { .. } => {
                if ctx.edition.is_2018_or_later() {
                    "crate::".to_owned()
                } else {
                    String::new()
                }
            }
            ImportInfo::ExternCrate { depth, .. } => match depth {
                Some(0) => "self::".to_owned(),
                Some(n) => "super::".repeat(*n as usize),
                None => String::new(),
            },
        }
    }
}

/// Standard-library crates that are in scope without a declaration:
/// `std` under normal compilation, `core` under `no_std`.
fn implicitly_available(tree: &ModuleTree, krate: crate::hir::CrateId, mode: AttrMode) -> bool {
    let info = tree.krate(krate);
    match info.origin {
        CrateOrigin::Stdlib(_) => matches!(
            (info.normalized_name.as_str(), mode),
            ("std", AttrMode::Normal) | ("core", AttrMode::NoStd)
        ),
        CrateOrigin::Workspace => false,
    }
}
