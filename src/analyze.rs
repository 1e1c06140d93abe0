// Copyright (c) 2026 LinkMap Analyzer Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Whole-file fold that turns a linker map into a `LinkMap`.
use std::collections::BTreeMap;
use std::fs::File;

use log::debug;
use memmap2::Mmap;
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::encoding::decode_mac_roman;
use crate::extract::{parse_object_file_line, parse_symbol_line};
use crate::linkmap::{LinkMap, ObjectFile};
use crate::section::Section;

/// The sole error kind of `analyze`: the file could not be read, or it
/// is structurally not a linker map (no recognized section header).
/// Line-level extraction failures never surface here.
#[derive(Debug, Error)]
#[error("invalid link map source {path}: {reason}")]
pub struct InvalidSource {
    pub path: String,
    pub reason: String,
}

/// Distinguishes a finished parse from a cancelled one. Cancellation is
/// not an error and produces no partial result.
#[derive(Debug)]
pub enum AnalyzeOutcome {
    Complete(LinkMap),
    Cancelled,
}

impl AnalyzeOutcome {
    pub fn into_linkmap(self) -> Option<LinkMap> {
        match self {
            AnalyzeOutcome::Complete(map) => Some(map),
            AnalyzeOutcome::Cancelled => None,
        }
    }
}

/// Parse the map file at `path`.
///
/// The bytes are decoded as Mac Roman, which accepts any byte sequence,
/// so symbol names with embedded non-UTF-8 data survive. The fold is
/// forgiving line by line: malformed content lines are skipped (debug
/// log), a symbol entry whose `[N]` index matches no known object file
/// is dropped silently. Only a missing/unreadable file or a file with
/// no recognized section header at all fails the call.
///
/// `cancel` is checked once per line; a multi-hundred-thousand-line map
/// stops promptly once the token fires.
pub fn analyze(path: &str, cancel: &CancelToken) -> Result<AnalyzeOutcome, InvalidSource> {
    let file = File::open(path).map_err(|e| InvalidSource {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    // The map can run to hundreds of MB for a large app; map it rather
    // than reading it into an extra buffer.
    let mapped = unsafe { Mmap::map(&file) }.map_err(|e| InvalidSource {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let contents = decode_mac_roman(&mapped);

    let mut object_files: BTreeMap<u32, ObjectFile> = BTreeMap::new();
    let mut section = Section::None;

    for line in contents.lines() {
        if cancel.is_cancelled() {
            return Ok(AnalyzeOutcome::Cancelled);
        }
        if line.starts_with('#') {
            section = section.transition(line);
            if section == Section::DeadStripped {
                // Dead-stripped analysis is not implemented; nothing
                // after this header is parsed.
                break;
            }
            continue;
        }
        match section {
            Section::ObjectFiles => match parse_object_file_line(line) {
                Some(obj) => {
                    object_files.insert(obj.index, obj);
                }
                None => debug!("object file extract fail: {line}"),
            },
            Section::Symbols => match parse_symbol_line(line) {
                Some((index, sym)) => {
                    // Unknown index: the forgiving-parser policy drops
                    // the entry rather than failing the scan.
                    if let Some(obj) = object_files.get_mut(&index) {
                        obj.symbols.insert(sym.name.clone(), sym);
                    }
                }
                None => {
                    // Sections end with an empty line; only genuinely
                    // malformed lines merit a diagnostic.
                    if !line.is_empty() {
                        debug!("symbol extract fail: {line}");
                    }
                }
            },
            // Section table contents are out of scope.
            Section::None | Section::Sections | Section::DeadStripped => {}
        }
    }

    if cancel.is_cancelled() {
        return Ok(AnalyzeOutcome::Cancelled);
    }
    if section == Section::None {
        return Err(InvalidSource {
            path: path.to_string(),
            reason: "no recognized section header".to_string(),
        });
    }
    Ok(AnalyzeOutcome::Complete(LinkMap::new(
        path.to_string(),
        object_files,
    )))
}
