//! # Header Module
//!
//! Detection of copyright lines and the year-range rewrite applied to stale
//! headers.
//!
//! A copyright line looks like `Copyright (C) 2019-2021 Example Corp`: the
//! word "copyright" in any case, anything, a creation year, an optional
//! modification year and then the configured company.

use std::borrow::Cow;

use regex::{NoExpand, Regex};

/// Number of leading lines searched for a copyright line.
pub const HEADER_SCAN_LINES: usize = 10;

/// Compiled pattern matching the copyright line of one company.
#[derive(Debug, Clone)]
pub struct HeaderPattern {
  regex: Regex,
}

/// The parts of a matched copyright line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightMatch<'a> {
  pub creation_year: &'a str,
  pub modification_year: Option<&'a str>,
  pub company: &'a str,
}

/// A copyright line found in the scanned window of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundHeader<'a> {
  /// Zero-based line number within the file
  pub line_index: usize,
  /// Byte offset of the line start within the content
  pub offset: usize,
  /// The full line, including its line terminator if any
  pub line: &'a str,
  pub copyright: CopyrightMatch<'a>,
}

impl HeaderPattern {
  /// Builds the pattern for `company`.
  ///
  /// The company is matched literally; regex metacharacters in it carry no
  /// special meaning.
  ///
  /// # Errors
  ///
  /// Returns an error only if the escaped company makes the regex exceed the
  /// engine's size limits.
  pub fn new(company: &str) -> Result<Self, regex::Error> {
    let pattern = format!(
      r"(?i:copyright).*?(19[0-9]{{2}}|20[0-9]{{2}}) ?-? ?(19[0-9]{{2}}|20[0-9]{{2}})? ({})",
      regex::escape(company)
    );
    Ok(Self {
      regex: Regex::new(&pattern)?,
    })
  }

  /// Matches a single line.
  pub fn find_copyright<'a>(&self, line: &'a str) -> Option<CopyrightMatch<'a>> {
    let caps = self.regex.captures(line)?;
    Some(CopyrightMatch {
      creation_year: caps.get(1)?.as_str(),
      modification_year: caps.get(2).map(|m| m.as_str()),
      company: caps.get(3)?.as_str(),
    })
  }

  /// Searches the first [`HEADER_SCAN_LINES`] lines of `content`.
  ///
  /// Stops at the first matching line or at the end of the content.
  pub fn scan<'a>(&self, content: &'a str) -> Option<FoundHeader<'a>> {
    let mut offset = 0;
    for (line_index, line) in content.split_inclusive('\n').take(HEADER_SCAN_LINES).enumerate() {
      if let Some(copyright) = self.find_copyright(line) {
        return Some(FoundHeader {
          line_index,
          offset,
          line,
          copyright,
        });
      }
      offset += line.len();
    }
    None
  }

  /// Replaces every copyright clause in `line` with `term`.
  ///
  /// Text before the word "copyright" (comment markers) and after the company
  /// is left as is.
  pub fn replace_in_line<'a>(&self, line: &'a str, term: &str) -> Cow<'a, str> {
    self.regex.replace_all(line, NoExpand(term))
  }
}

impl CopyrightMatch<'_> {
  /// Whether the header's year range ends before `target_year`.
  ///
  /// Years are fixed-width four digit strings, so string order is numeric
  /// order. A header with only a creation year equal to the target is
  /// current.
  pub fn is_stale(&self, target_year: &str) -> bool {
    match self.modification_year {
      Some(modified) => modified < target_year,
      None => self.creation_year < target_year,
    }
  }

  /// The most recent year the header claims.
  pub fn last_year(&self) -> &str {
    self.modification_year.unwrap_or(self.creation_year)
  }

  /// The replacement clause for a header updated to `target_year`.
  pub fn updated_term(&self, target_year: &str) -> String {
    format!("Copyright (C) {}-{} {}", self.creation_year, target_year, self.company)
  }
}

/// Validates a year argument: four digits within 1900–2099.
pub fn parse_year(value: &str) -> Result<String, String> {
  let valid = value.len() == 4
    && value.bytes().all(|b| b.is_ascii_digit())
    && (value.starts_with("19") || value.starts_with("20"));
  if valid {
    Ok(value.to_string())
  } else {
    Err(format!("'{value}' is not a year between 1900 and 2099"))
  }
}
