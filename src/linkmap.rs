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

use std::collections::BTreeMap;

/// A named code or data unit with its contribution to the final binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub start: u64,
    pub size: u64,
}

/// One compiled translation unit (or archive member) from the
/// `# Object files:` section. Owns its own symbol table; symbol names
/// are unique within it, last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectFile {
    /// Index assigned by the map file's own `[N]` numbering, not by scan
    /// order. May be sparse.
    pub index: u32,
    pub path: String,
    pub symbols: BTreeMap<String, Symbol>,
}

impl ObjectFile {
    pub fn new(index: u32, path: String) -> Self {
        Self {
            index,
            path,
            symbols: BTreeMap::new(),
        }
    }

    /// Sum of all symbol sizes. Always recomputed, never cached.
    pub fn total(&self) -> u64 {
        self.symbols.values().map(|s| s.size).sum()
    }

    /// Last path component, e.g. `x.o` or `liba.a(x.o)`.
    pub fn name(&self) -> &str {
        last_component(&self.path)
    }

    /// Grouping key for the library view. Archive members like
    /// `/a/liba.a(x.o)` group under `liba.a`; loose object files group
    /// under their containing directory.
    pub fn library_name(&self) -> &str {
        match self.path.find('(') {
            Some(paren) => last_component(&self.path[..paren]),
            None => match self.path.rfind('/') {
                Some(0) => "/",
                Some(slash) => last_component(&self.path[..slash]),
                None => &self.path,
            },
        }
    }
}

fn last_component(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The fully parsed map file. Built once per analyze call and never
/// mutated afterwards; a new file selection produces a brand-new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMap {
    pub path: String,
    pub object_files: BTreeMap<u32, ObjectFile>,
}

impl LinkMap {
    pub fn new(path: String, object_files: BTreeMap<u32, ObjectFile>) -> Self {
        Self { path, object_files }
    }

    /// Sum of every symbol size across all object files.
    pub fn total(&self) -> u64 {
        self.object_files.values().map(|o| o.total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(path: &str) -> ObjectFile {
        ObjectFile::new(0, path.to_string())
    }

    #[test]
    fn name_is_last_component() {
        assert_eq!(obj("/a/b/x.o").name(), "x.o");
        assert_eq!(obj("/a/liba.a(x.o)").name(), "liba.a(x.o)");
        assert_eq!(obj("x.o").name(), "x.o");
    }

    #[test]
    fn library_name_from_archive_member() {
        assert_eq!(obj("/a/liba.a(x.o)").library_name(), "liba.a");
        assert_eq!(obj("liba.a(x.o)").library_name(), "liba.a");
    }

    #[test]
    fn library_name_from_directory() {
        assert_eq!(obj("/build/objs/x.o").library_name(), "objs");
        assert_eq!(obj("/x.o").library_name(), "/");
        assert_eq!(obj("x.o").library_name(), "x.o");
    }

    #[test]
    fn total_sums_symbol_sizes() {
        let mut o = obj("/a/x.o");
        o.symbols.insert(
            "_foo".to_string(),
            Symbol {
                name: "_foo".to_string(),
                start: 0x1000,
                size: 0x100,
            },
        );
        o.symbols.insert(
            "_bar".to_string(),
            Symbol {
                name: "_bar".to_string(),
                start: 0x2000,
                size: 0x20,
            },
        );
        assert_eq!(o.total(), 0x120);
    }
}
