//! Source text edits.
//!
//! [`SourceEdit`] accumulates insertions and replacements against a
//! single file and commits them in one pass, so a fix that adds both an
//! external-crate declaration and a use declaration lands atomically.
//! [`scan_anchors`] finds the offsets those declarations are inserted
//! at.

use text_size::{TextRange, TextSize};

/// A pending batch of edits against one file's text.
///
/// Offsets always refer to the original text; commit order is sorted by
/// offset, stable for ties, so queuing order decides adjacency.
#[derive(Debug)]
pub struct SourceEdit {
    text: String,
    insertions: Vec<(TextSize, String)>,
    replacements: Vec<(TextRange, String)>,
}

impl SourceEdit {
    /// Start an edit over the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            insertions: Vec::new(),
            replacements: Vec::new(),
        }
    }

    /// The (unmodified) text being edited.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Queue an insertion at `offset`.
    pub fn insert(&mut self, offset: TextSize, what: impl Into<String>) {
        self.insertions.push((offset, what.into()));
    }

    /// Queue a replacement of `range`.
    pub fn replace(&mut self, range: TextRange, what: impl Into<String>) {
        self.replacements.push((range, what.into()));
    }

    /// Is there anything queued?
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.replacements.is_empty()
    }

    /// Apply all queued edits and return the new text.
    ///
    /// Replacements must not overlap each other or span an insertion
    /// point; this holds for the edits the applier produces.
    pub fn commit(mut self) -> String {
        // Uniform (range, text) form; insertions are empty ranges.
        let mut edits: Vec<(TextRange, String)> = self
            .insertions
            .drain(..)
            .map(|(at, s)| (TextRange::empty(at), s))
            .chain(self.replacements.drain(..))
            .collect();
        edits.sort_by_key(|(range, _)| range.start());

        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0usize;
        for (range, replacement) in edits {
            let start = u32::from(range.start()) as usize;
            let end = u32::from(range.end()) as usize;
            out.push_str(&self.text[cursor..start]);
            out.push_str(&replacement);
            cursor = end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }
}

/// Offsets a new declaration can be inserted at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionAnchors {
    /// End of the last use declaration (just past its newline).
    pub last_use_end: Option<TextSize>,
    /// End of the last external-crate declaration.
    pub last_extern_crate_end: Option<TextSize>,
    /// Start of the first substantive item in the file.
    pub first_item_start: Option<TextSize>,
}

/// Scan file text for the insertion anchors.
///
/// Line-based: leading comments, attributes, and blank lines are skipped
/// when looking for the first item; a declaration continued across lines
/// ends at its terminating semicolon.
pub fn scan_anchors(text: &str) -> InsertionAnchors {
    let mut anchors = InsertionAnchors::default();
    let mut offset = 0usize;
    let mut lines = text.split_inclusive('\n');

    while let Some(line) = lines.next() {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
            continue;
        }

        let is_use = trimmed.starts_with("use ") || trimmed.starts_with("pub use ");
        let is_extern = trimmed.starts_with("extern crate ");

        if is_use || is_extern {
            // Consume continuation lines up to the semicolon.
            let mut end = offset;
            let mut body = trimmed.to_owned();
            while !body.contains(';') {
                match lines.next() {
                    Some(cont) => {
                        body.push_str(cont);
                        offset += cont.len();
                        end = offset;
                    }
                    None => break,
                }
            }
            let end = TextSize::new(end as u32);
            if is_use {
                anchors.last_use_end = Some(end);
            } else {
                anchors.last_extern_crate_end = Some(end);
            }
            continue;
        }

        if anchors.first_item_start.is_none() {
            anchors.first_item_start = Some(TextSize::new(start as u32));
        }
    }
    anchors
}

/// Replace a partially typed method call with `name()` and return the
/// caret offset just inside the parentheses.
///
/// `partial` is the range of the typed method text after the dot.
pub fn rewrite_method_call(
    edit: &mut SourceEdit,
    partial: TextRange,
    name: &str,
) -> TextSize {
    edit.replace(partial, format!("{name}()"));
    partial.start() + TextSize::of(name) + TextSize::new(1)
}
