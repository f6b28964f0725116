//! # Content Transformer Module
//!
//! This module provides the two edits headersync ever makes to a file: prepending
//! a rendered header, and rewriting the copyright line of an existing one.
//! Both leave every other byte of the content untouched.

use crate::header::{FoundHeader, HeaderPattern};

/// Content transformation utilities for header processing.
///
/// The `ContentTransformer` handles:
/// - Prepending a rendered header, separated from the old content by one blank line
/// - Extending the year range in a found copyright line
pub struct ContentTransformer<'p> {
  pattern: &'p HeaderPattern,
}

impl<'p> ContentTransformer<'p> {
  pub const fn new(pattern: &'p HeaderPattern) -> Self {
    Self { pattern }
  }

  /// Prepends `header` to `content`.
  ///
  /// The header is expected to end with a newline; one more newline is added
  /// so that a blank line separates it from the original content.
  pub fn insert_header(header: &str, content: &str) -> String {
    let mut result = String::with_capacity(header.len() + 1 + content.len());
    result.push_str(header);
    result.push('\n');
    result.push_str(content);
    result
  }

  /// Rewrites the found copyright line so its range ends in `target_year`.
  ///
  /// Returns the new content and the rewritten line. Lines other than the
  /// found one are copied verbatim, including their line terminators.
  pub fn update_year(&self, content: &str, found: &FoundHeader<'_>, target_year: &str) -> (String, String) {
    let term = found.copyright.updated_term(target_year);
    let new_line = self.pattern.replace_in_line(found.line, &term).into_owned();

    let end = found.offset + found.line.len();
    let mut result = String::with_capacity(content.len() + new_line.len());
    result.push_str(&content[..found.offset]);
    result.push_str(&new_line);
    result.push_str(&content[end..]);

    (result, new_line)
  }
}
