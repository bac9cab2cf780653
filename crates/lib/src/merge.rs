//! Structural merge of two documents.
//!
//! `merge(target, source)` deep-fills `target` with whatever `source` has that
//! `target` lacks. Rules, first match wins:
//!
//! - sequence + sequence: union by value, target elements first, no duplicates
//! - mapping + mapping: every target key kept, missing source keys appended,
//!   shared keys merged recursively
//! - anything else: target wins unless it is null

use crate::document::{Document, Mapping};

/// Merge `source` into `target`, returning the combined document.
///
/// Never fails and never drops a key or element present in `target`.
pub fn merge(target: Document, source: &Document) -> Document {
  match (target, source) {
    (Document::Sequence(target), Document::Sequence(source)) => Document::Sequence(union(target, source)),
    (Document::Mapping(target), Document::Mapping(source)) => Document::Mapping(merge_mappings(target, source)),
    (Document::Null, source) => source.clone(),
    (target, _) => target,
  }
}

fn union(target: Vec<Document>, source: &[Document]) -> Vec<Document> {
  let mut out: Vec<Document> = Vec::with_capacity(target.len() + source.len());
  for item in target.into_iter().chain(source.iter().cloned()) {
    if !out.contains(&item) {
      out.push(item);
    }
  }
  out
}

fn merge_mappings(mut target: Mapping, source: &Mapping) -> Mapping {
  for (key, value) in source.iter() {
    match target.get_mut(key) {
      Some(slot) => {
        let current = std::mem::take(slot);
        *slot = merge(current, value);
      }
      None => {
        target.insert(key, value.clone());
      }
    }
  }
  target
}
