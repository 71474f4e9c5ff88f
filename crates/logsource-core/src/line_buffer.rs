//! Reassembly of arbitrarily segmented text into complete lines
//!
//! A line-oriented sink only accepts whole records, but a push-style writer
//! may deliver a line across several calls, or several lines in one call.
//! [`LineBuffer`] keeps the unterminated tail (`pending`) and the lines that
//! are complete but not yet drained (`completed`).
//!
//! `\n` is the terminator. A `\r\n` pair is one terminator: the `\r` is
//! removed from the line it terminates, even when the two characters arrive
//! in separate fragments.

use std::mem;

const TERMINATOR: char = '\n';
const CARRIAGE_RETURN: char = '\r';

/// Accumulates fragments and yields complete lines in arrival order
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    pending: String,
    completed: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment that may contain any number of terminators
    ///
    /// Text after the last terminator stays pending until a later call
    /// terminates it.
    pub fn append(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }

        let mut pieces = fragment.split(TERMINATOR);
        // split always yields at least one piece
        if let Some(first) = pieces.next() {
            self.pending.push_str(first);
        }

        let Some(mut last) = pieces.next() else {
            // There was no terminator
            return;
        };

        let head = mem::take(&mut self.pending);
        self.complete(head);
        for piece in pieces {
            self.complete(last.to_string());
            last = piece;
        }
        self.pending.push_str(last);
    }

    /// Add a fragment, then terminate whatever is pending (even if empty)
    pub fn append_line(&mut self, fragment: &str) {
        self.append(fragment);
        self.force_break();
    }

    /// Terminate the pending fragment as a line, even if it is empty
    pub fn force_break(&mut self) {
        let line = mem::take(&mut self.pending);
        self.completed.push(line);
    }

    /// Check whether an unterminated fragment is waiting
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The unterminated fragment accumulated so far
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Take every completed line, leaving the pending fragment in place
    pub fn drain(&mut self) -> Vec<String> {
        mem::take(&mut self.completed)
    }

    fn complete(&mut self, mut line: String) {
        if line.ends_with(CARRIAGE_RETURN) {
            line.pop();
        }
        self.completed.push(line);
    }
}
