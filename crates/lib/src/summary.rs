//! Human-readable record of what an install run did.

use serde::Serialize;

/// Ordered actions taken plus notes the operator should read.
///
/// Each step of the install returns its own summary; the caller folds them
/// together in call order with [`RunSummary::extend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub actions: Vec<String>,
  pub notes: Vec<String>,
}

impl RunSummary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Summary holding a single action.
  pub fn action(action: impl Into<String>) -> Self {
    Self {
      actions: vec![action.into()],
      notes: Vec::new(),
    }
  }

  /// Summary holding a single note.
  pub fn note(note: impl Into<String>) -> Self {
    Self {
      actions: Vec::new(),
      notes: vec![note.into()],
    }
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  /// Append another summary after this one, keeping order.
  pub fn extend(&mut self, other: RunSummary) {
    self.actions.extend(other.actions);
    self.notes.extend(other.notes);
  }
}
