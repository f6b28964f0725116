use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use headersync::error::{ErrorKind, HeaderError};
use headersync::licence::Licence;
use headersync::output::{Level, RecordingOutput};
use headersync::processor::{HeaderSync, SyncConfig, Targets};
use headersync::report::FileOutcome;
use headersync::templates::{BuiltinTemplates, HeaderData, render_header};
use tempfile::tempdir;

const COMPANY: &str = "Example Corp";

fn sync(year: &str) -> HeaderSync {
  HeaderSync::new(SyncConfig {
    year: year.to_string(),
    licence: Licence::Gpl3OrLater,
    company: COMPANY.to_string(),
    changed: false,
  })
  .unwrap()
}

fn process(sync: &HeaderSync, path: &Path) -> (Result<FileOutcome, HeaderError>, RecordingOutput) {
  let mut out = RecordingOutput::new();
  let result = sync.process_file(path, &mut out);
  (result, out)
}

#[test]
fn test_year_updated_on_second_line() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("module.py");
  fs::write(
    &file,
    "# -*- coding: utf-8 -*-\n# Copyright (C) 2019-2021 Example Corp\n#\n# SPDX-License-Identifier: GPL-3.0-or-later\n\nimport os\n",
  )?;

  let (result, out) = process(&sync("2023"), &file);
  assert_eq!(
    result?,
    FileOutcome::YearUpdated {
      previous: "2021".to_string(),
      year: "2023".to_string(),
    }
  );
  assert_eq!(
    fs::read_to_string(&file)?,
    "# -*- coding: utf-8 -*-\n# Copyright (C) 2019-2023 Example Corp\n#\n# SPDX-License-Identifier: GPL-3.0-or-later\n\nimport os\n"
  );
  assert_eq!(out.lines.len(), 1);

  Ok(())
}

#[test]
fn test_single_year_header_is_extended() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("tool.sh");
  fs::write(&file, "#!/bin/sh\n# copyright 2020 Example Corp\necho\n")?;

  let (result, out) = process(&sync("2022"), &file);
  assert!(matches!(result?, FileOutcome::YearUpdated { ref previous, .. } if previous == "2020"));
  assert_eq!(
    fs::read_to_string(&file)?,
    "#!/bin/sh\n# Copyright (C) 2020-2022 Example Corp\necho\n"
  );
  assert!(out.contains("Changed Licence Header Copyright Year 2020 -> 2022"));

  Ok(())
}

#[test]
fn test_current_headers_are_left_alone() -> Result<()> {
  let temp_dir = tempdir()?;
  let cases = [
    ("range.c", "/* Copyright (C) 2020-2023 Example Corp */\nint x;\n"),
    ("single.c", "/* Copyright (C) 2023 Example Corp */\nint x;\n"),
    ("future.c", "/* Copyright (C) 2020-2030 Example Corp */\nint x;\n"),
  ];

  let sync = sync("2023");
  for (name, content) in cases {
    let file = temp_dir.path().join(name);
    fs::write(&file, content)?;

    let (result, out) = process(&sync, &file);
    assert_eq!(result?, FileOutcome::AlreadyCurrent, "{name}");
    assert_eq!(fs::read_to_string(&file)?, content, "{name}");
    assert_eq!(out.messages(Level::Ok), vec![format!("{}: Licence Header is ok.", file.display())]);
  }

  Ok(())
}

#[test]
fn test_empty_python_file_gets_template() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("empty.py");
  fs::write(&file, "")?;

  let (result, _) = process(&sync("2023"), &file);
  assert_eq!(result?, FileOutcome::HeaderInserted);

  let data = HeaderData {
    company: COMPANY,
    year: "2023",
  };
  let header = render_header(&BuiltinTemplates, &file, Licence::Gpl3OrLater, &data)?;
  assert_eq!(fs::read_to_string(&file)?, format!("{header}\n"));
  assert!(header.starts_with("# -*- coding: utf-8 -*-\n# Copyright (C) 2023 Example Corp\n"));

  Ok(())
}

#[test]
fn test_inserted_header_preserves_original_bytes() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("page.xml");
  let original = "<?xml version=\"1.0\"?>\r\n<root>\r\n  <child/>\r\n</root>";
  fs::write(&file, original)?;

  let (result, _) = process(&sync("2021"), &file);
  assert_eq!(result?, FileOutcome::HeaderInserted);

  let content = fs::read_to_string(&file)?;
  assert!(content.starts_with("<!--\nCopyright (C) 2021 Example Corp\n"));
  assert!(content.ends_with(&format!("-->\n\n{original}")));

  Ok(())
}

#[test]
fn test_header_below_scan_window_is_not_found() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("late.go");
  let original = format!("{}// Copyright (C) 2019 Example Corp\n", "// filler\n".repeat(10));
  fs::write(&file, &original)?;

  let (result, _) = process(&sync("2023"), &file);
  assert_eq!(result?, FileOutcome::HeaderInserted);

  let content = fs::read_to_string(&file)?;
  assert!(content.starts_with("// Copyright (C) 2023 Example Corp\n"));
  assert!(content.ends_with(&original));

  Ok(())
}

#[test]
fn test_other_company_is_not_a_match() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("other.js");
  fs::write(&file, "// Copyright (C) 2015 Someone Else\n")?;

  let (result, _) = process(&sync("2023"), &file);
  assert_eq!(result?, FileOutcome::HeaderInserted);
  assert!(fs::read_to_string(&file)?.ends_with("*/\n\n// Copyright (C) 2015 Someone Else\n"));

  Ok(())
}

#[test]
fn test_unsupported_extension_leaves_file_unchanged() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("test.pppy");
  fs::write(&file, "print('x')\n")?;

  let (result, out) = process(&sync("2023"), &file);
  let err = result.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::UnsupportedExtension);
  assert_eq!(fs::read_to_string(&file)?, "print('x')\n");
  assert_eq!(
    out.messages(Level::Error),
    vec![format!("{}: No licence header for the format .pppy found.", file.display())]
  );

  Ok(())
}

#[test]
fn test_unsupported_extension_with_header_is_still_updated() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("lib.rs");
  fs::write(&file, "// Copyright (C) 2019 Example Corp\nfn f() {}\n")?;

  let (result, _) = process(&sync("2023"), &file);
  assert!(matches!(result?, FileOutcome::YearUpdated { .. }));
  assert_eq!(
    fs::read_to_string(&file)?,
    "// Copyright (C) 2019-2023 Example Corp\nfn f() {}\n"
  );

  Ok(())
}

#[test]
fn test_missing_and_binary_files() -> Result<()> {
  let temp_dir = tempdir()?;
  let binary = temp_dir.path().join("image.c");
  fs::write(&binary, b"\x89PNG\r\n\x1a\n\xff")?;

  let sync = sync("2023");

  let (result, out) = process(&sync, &temp_dir.path().join("gone.py"));
  assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
  assert_eq!(out.messages(Level::Error).len(), 1);

  let (result, out) = process(&sync, &binary);
  assert_eq!(result.unwrap_err().kind(), ErrorKind::BinaryContent);
  assert_eq!(
    out.messages(Level::Info),
    vec![format!("{}: Ignoring binary file.", binary.display())]
  );
  assert_eq!(fs::read(&binary)?, b"\x89PNG\r\n\x1a\n\xff");

  Ok(())
}

#[test]
fn test_run_skips_excluded_files() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  fs::create_dir_all(root.join("gen/deep"))?;
  fs::write(root.join("gen/deep/out.c"), "/* Copyright (C) 2010 Example Corp */\n")?;
  fs::write(root.join("keep.c"), "/* Copyright (C) 2010 Example Corp */\n")?;
  fs::write(root.join("skip.txt"), "notes\n")?;

  let exclude_file = root.join("exclude.lst");
  fs::write(&exclude_file, "gen\n*.txt\nexclude.lst\n")?;

  let mut out = RecordingOutput::new();
  let run = sync("2023").run(
    &Targets::Directories(vec![root.to_path_buf()]),
    Some(&exclude_file),
    &mut out,
  )?;

  assert_eq!(run.exit_code, 0);
  assert_eq!(fs::read_to_string(root.join("gen/deep/out.c"))?, "/* Copyright (C) 2010 Example Corp */\n");
  assert_eq!(fs::read_to_string(root.join("skip.txt"))?, "notes\n");
  assert_eq!(
    fs::read_to_string(root.join("keep.c"))?,
    "/* Copyright (C) 2010-2023 Example Corp */\n"
  );

  let excluded: Vec<PathBuf> = run
    .reports
    .iter()
    .filter(|r| r.outcome == FileOutcome::IgnoredExcluded)
    .map(|r| r.path.clone())
    .collect();
  assert_eq!(
    excluded,
    vec![root.join("exclude.lst"), root.join("gen/deep/out.c"), root.join("skip.txt")]
  );
  assert_eq!(run.summary.ignored, 3);
  assert_eq!(run.summary.updated, 1);

  Ok(())
}

#[test]
fn test_run_processes_duplicates_again() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("a.py");
  fs::write(&file, "")?;

  let mut out = RecordingOutput::new();
  let run = sync("2023").run(&Targets::Files(vec![file.clone(), file.clone()]), None, &mut out)?;

  let outcomes: Vec<&FileOutcome> = run.reports.iter().map(|r| &r.outcome).collect();
  assert_eq!(outcomes, vec![&FileOutcome::HeaderInserted, &FileOutcome::AlreadyCurrent]);
  assert_eq!(run.summary.total_files, 2);

  Ok(())
}

#[test]
fn test_company_with_regex_metacharacters() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = temp_dir.path().join("a.h");
  fs::write(&file, "/* Copyright 2018 Foo (Bar) Inc. */\n")?;

  let sync = HeaderSync::new(SyncConfig {
    year: "2020".to_string(),
    licence: Licence::Gpl2OrLater,
    company: "Foo (Bar) Inc.".to_string(),
    changed: false,
  })?;
  let (result, _) = process(&sync, &file);

  assert!(matches!(result?, FileOutcome::YearUpdated { .. }));
  assert_eq!(fs::read_to_string(&file)?, "/* Copyright (C) 2018-2020 Foo (Bar) Inc. */\n");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_processes_symlinked_files_in_directories() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  fs::create_dir_all(root.join("src"))?;
  fs::write(root.join("real.py"), "# Copyright (C) 2020 Example Corp\n")?;
  std::os::unix::fs::symlink("../real.py", root.join("src/link.py"))?;

  let mut out = RecordingOutput::new();
  let run = sync("2023").run(&Targets::Directories(vec![root.join("src")]), None, &mut out)?;

  assert_eq!(run.exit_code, 0);
  assert_eq!(run.reports.len(), 1);
  assert_eq!(run.reports[0].path, root.join("src/link.py"));
  assert_eq!(run.summary.updated, 1);
  assert_eq!(fs::read_to_string(root.join("real.py"))?, "# Copyright (C) 2020-2023 Example Corp\n");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_continues_after_write_failure() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = tempdir()?;
  let locked = temp_dir.path().join("locked.sh");
  let next = temp_dir.path().join("next.sh");
  fs::write(&locked, "echo locked\n")?;
  fs::write(&next, "echo next\n")?;
  fs::set_permissions(&locked, fs::Permissions::from_mode(0o444))?;

  // Permission bits do not stop privileged users
  if fs::OpenOptions::new().append(true).open(&locked).is_ok() {
    eprintln!("Skipping test: read-only files are writable for this user");
    return Ok(());
  }

  let mut out = RecordingOutput::new();
  let run = sync("2023").run(&Targets::Files(vec![locked.clone(), next.clone()]), None, &mut out)?;

  let outcomes: Vec<&FileOutcome> = run.reports.iter().map(|r| &r.outcome).collect();
  assert_eq!(
    outcomes,
    vec![&FileOutcome::Error { kind: ErrorKind::Io }, &FileOutcome::HeaderInserted]
  );
  assert_eq!(run.exit_code, 0);
  assert_eq!(run.summary.failed, 1);
  assert_eq!(fs::read_to_string(&locked)?, "echo locked\n");
  assert!(fs::read_to_string(&next)?.ends_with("\n\necho next\n"));
  assert_eq!(out.messages(Level::Error).len(), 1);

  Ok(())
}
