//! # Templates Module
//!
//! This module provides the license header templates that get inserted into
//! files which do not carry a copyright header yet.
//!
//! Templates are keyed by file suffix and [`Licence`]. Two sources exist:
//! - [`BuiltinTemplates`] wraps the embedded license texts in the comment
//!   style of the target language
//! - [`DirectoryTemplates`] reads `<dir>/<licence>/template<suffix>` files from
//!   disk, for projects that maintain their own header wording
//!
//! Both produce text containing the `<company>` and `<year>` placeholders,
//! which [`render_header`] substitutes literally.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use headersync::licence::Licence;
//! use headersync::templates::{BuiltinTemplates, HeaderData, render_header};
//!
//! let data = HeaderData {
//!   company: "Example Corp",
//!   year: "2023",
//! };
//! let header = render_header(&BuiltinTemplates, Path::new("main.go"), Licence::Gpl3OrLater, &data)?;
//! assert!(header.starts_with("// Copyright (C) 2023 Example Corp\n"));
//! # Ok::<(), headersync::error::HeaderError>(())
//! ```

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::HeaderError;
use crate::licence::{Licence, file_suffix, is_supported_suffix};

/// Placeholder replaced by the company name.
pub const COMPANY_PLACEHOLDER: &str = "<company>";

/// Placeholder replaced by the copyright year.
pub const YEAR_PLACEHOLDER: &str = "<year>";

/// Data used to fill out a header template.
#[derive(Debug, Clone, Copy)]
pub struct HeaderData<'a> {
  /// The company holding the copyright
  pub company: &'a str,
  /// The copyright year
  pub year: &'a str,
}

/// A source of raw (unrendered) header templates.
pub trait TemplateSource: Send + Sync {
  /// Returns the template text for a supported suffix and licence.
  ///
  /// `path` is the file the header is meant for; it is only used for error
  /// reporting. Callers check the suffix against the supported set before
  /// asking.
  fn template(&self, path: &Path, suffix: &str, licence: Licence) -> Result<String, HeaderError>;
}

/// Renders the header for `path`, substituting company and year.
///
/// # Errors
///
/// - [`HeaderError::UnsupportedExtension`] if the suffix has no template
/// - [`HeaderError::MissingTemplateResource`] if the source cannot find the
///   template for the suffix and licence
pub fn render_header(
  source: &dyn TemplateSource,
  path: &Path,
  licence: Licence,
  data: &HeaderData<'_>,
) -> Result<String, HeaderError> {
  let suffix = file_suffix(path);
  if !is_supported_suffix(&suffix) {
    return Err(HeaderError::UnsupportedExtension {
      path: path.to_path_buf(),
      suffix,
    });
  }

  let template = source.template(path, &suffix, licence)?;
  trace!("Rendering {} template for {} with year {}", licence, suffix, data.year);

  Ok(
    template
      .replace(COMPANY_PLACEHOLDER, data.company)
      .replace(YEAR_PLACEHOLDER, data.year),
  )
}

/// Defines the comment style used to wrap a license text.
///
/// # Fields
///
/// * `top` - A line emitted before the text (e.g. "/*"), empty for none
/// * `middle` - The prefix for each line of text (e.g. " * ")
/// * `bottom` - A line emitted after the text (e.g. " */"), empty for none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  pub top: &'static str,
  pub middle: &'static str,
  pub bottom: &'static str,
}

impl CommentStyle {
  /// Create a line-comment style (no top/bottom markers).
  pub const fn line(prefix: &'static str) -> Self {
    Self {
      top: "",
      middle: prefix,
      bottom: "",
    }
  }

  /// Create a block-comment style.
  pub const fn block(top: &'static str, middle: &'static str, bottom: &'static str) -> Self {
    Self { top, middle, bottom }
  }
}

/// Returns the comment style for a supported suffix.
///
/// Python headers open with the coding declaration, which has to stay on one
/// of the first two lines.
pub fn comment_style_for_suffix(suffix: &str) -> Option<CommentStyle> {
  let style = match suffix {
    ".py" => CommentStyle::block("# -*- coding: utf-8 -*-", "# ", ""),
    ".bash" | ".sh" | ".cmake" | ".txt" | ".nasl" | ".po" => CommentStyle::line("# "),
    ".c" | ".h" | ".js" => CommentStyle::block("/*", " * ", " */"),
    ".go" => CommentStyle::line("// "),
    ".xml" | ".xsl" => CommentStyle::block("<!--", "", "-->"),
    _ => return None,
  };
  Some(style)
}

/// Formats license text with the given comment style.
///
/// Empty text lines become the trimmed middle marker, so blank lines in a
/// `# ` block render as `#`. The result always ends with a single newline.
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut result = String::with_capacity(license_text.len() * 2);

  if !style.top.is_empty() {
    result.push_str(style.top);
    result.push('\n');
  }

  for line in license_text.lines() {
    if line.is_empty() {
      result.push_str(style.middle.trim_end());
    } else {
      result.push_str(style.middle);
      result.push_str(line);
    }
    result.push('\n');
  }

  if !style.bottom.is_empty() {
    result.push_str(style.bottom);
    result.push('\n');
  }

  result
}

/// Returns the embedded license text for a licence.
pub const fn licence_text(licence: Licence) -> &'static str {
  match licence {
    Licence::Agpl3OrLater => include_str!("../licenses/AGPL-3.0-or-later.txt"),
    Licence::Gpl2Only => include_str!("../licenses/GPL-2.0-only.txt"),
    Licence::Gpl2OrLater => include_str!("../licenses/GPL-2.0-or-later.txt"),
    Licence::Gpl3OrLater => include_str!("../licenses/GPL-3.0-or-later.txt"),
  }
}

/// Templates built from the embedded license texts.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
  fn template(&self, path: &Path, suffix: &str, licence: Licence) -> Result<String, HeaderError> {
    let style = comment_style_for_suffix(suffix).ok_or_else(|| HeaderError::UnsupportedExtension {
      path: path.to_path_buf(),
      suffix: suffix.to_string(),
    })?;
    Ok(format_with_comment_style(licence_text(licence), &style))
  }
}

/// Templates read from a directory tree laid out as
/// `<root>/<licence>/template<suffix>`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
  root: PathBuf,
}

impl DirectoryTemplates {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Location of the template for a suffix and licence.
  pub fn template_path(&self, suffix: &str, licence: Licence) -> PathBuf {
    self.root.join(licence.spdx_id()).join(format!("template{suffix}"))
  }
}

impl TemplateSource for DirectoryTemplates {
  fn template(&self, path: &Path, suffix: &str, licence: Licence) -> Result<String, HeaderError> {
    let template = self.template_path(suffix, licence);
    debug!("Loading template from: {}", template.display());

    std::fs::read_to_string(&template).map_err(|source| match source.kind() {
      IoErrorKind::NotFound => HeaderError::MissingTemplateResource {
        path: path.to_path_buf(),
        licence,
        template: template.clone(),
      },
      _ => HeaderError::Io {
        path: template.clone(),
        action: "Reading template",
        source,
      },
    })
  }
}
