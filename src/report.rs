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

/// Query-dependent projection of an immutable `LinkMap` into ranked
/// size rows. Pure reads only, safe to re-run on every query change.
use serde::Serialize;

use crate::format::format_size;
use crate::linkmap::LinkMap;

/// Grouping axis for the size report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Library,
    Object,
    Symbol,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Library => "library",
            Category::Object => "object",
            Category::Symbol => "symbol",
        };
        f.write_str(s)
    }
}

/// View configuration: grouping axis plus a case-sensitive substring
/// filter over row names ("" matches everything).
#[derive(Debug, Clone)]
pub struct SizeQuery {
    pub filter: String,
    pub category: Category,
}

impl SizeQuery {
    pub fn new(category: Category) -> Self {
        Self {
            filter: String::new(),
            category,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.filter.is_empty() || name.contains(&self.filter)
    }
}

/// One report row. `id` is stable across re-renders of the same query so
/// a diffing presentation layer can reuse rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRow {
    pub id: String,
    pub size: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,
}

impl SizeRow {
    pub fn size_str(&self) -> String {
        format_size(self.size)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub rows: Vec<SizeRow>,
    pub total_size: u64,
}

impl SizeReport {
    pub fn summary(&self) -> String {
        format!("total: {}", format_size(self.total_size))
    }
}

/// Build the filtered, size-descending report for one query.
///
/// - `Object`: one row per object file, id = path.
/// - `Symbol`: one row per symbol; id = name + owning path so that
///   same-named symbols in different objects stay distinct.
/// - `Library`: object-file totals folded by library name.
///
/// `total_size` counts post-filter rows only. Ties in size keep the
/// LinkMap's deterministic iteration order (stable sort over BTreeMap
/// traversal), so identical inputs render identically.
pub fn build_report(linkmap: &LinkMap, query: &SizeQuery) -> SizeReport {
    let mut rows: Vec<SizeRow> = match query.category {
        Category::Object => linkmap
            .object_files
            .values()
            .filter(|obj| query.matches(obj.name()))
            .map(|obj| SizeRow {
                id: obj.path.clone(),
                size: obj.total(),
                name: obj.name().to_string(),
                lib: None,
            })
            .collect(),
        Category::Symbol => linkmap
            .object_files
            .values()
            .flat_map(|obj| {
                obj.symbols
                    .values()
                    .filter(move |sym| query.matches(&sym.name))
                    .map(move |sym| SizeRow {
                        id: format!("{}{}", sym.name, obj.path),
                        size: sym.size,
                        name: sym.name.clone(),
                        lib: Some(obj.library_name().to_string()),
                    })
            })
            .collect(),
        Category::Library => {
            // Fold object totals by library key first, then filter, so a
            // group's size never depends on which member matched.
            let mut groups: std::collections::BTreeMap<&str, u64> =
                std::collections::BTreeMap::new();
            for obj in linkmap.object_files.values() {
                *groups.entry(obj.library_name()).or_insert(0) += obj.total();
            }
            groups
                .into_iter()
                .filter(|(name, _)| query.matches(name))
                .map(|(name, size)| SizeRow {
                    id: name.to_string(),
                    size,
                    name: name.to_string(),
                    lib: None,
                })
                .collect()
        }
    };
    rows.sort_by_key(|row| std::cmp::Reverse(row.size));
    let total_size = rows.iter().map(|row| row.size).sum();
    SizeReport { rows, total_size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkmap::{ObjectFile, Symbol};
    use std::collections::BTreeMap;

    fn sym(name: &str, size: u64) -> Symbol {
        Symbol {
            name: name.to_string(),
            start: 0,
            size,
        }
    }

    fn sample() -> LinkMap {
        let mut objs = BTreeMap::new();
        let mut a = ObjectFile::new(0, "/a/liba.a(x.o)".to_string());
        a.symbols.insert("_foo".to_string(), sym("_foo", 0x100));
        a.symbols.insert("_shared".to_string(), sym("_shared", 8));
        let mut b = ObjectFile::new(1, "/a/liba.a(y.o)".to_string());
        b.symbols.insert("_bar".to_string(), sym("_bar", 0x200));
        b.symbols.insert("_shared".to_string(), sym("_shared", 8));
        let mut c = ObjectFile::new(5, "/build/objs/main.o".to_string());
        c.symbols.insert("_main".to_string(), sym("_main", 0x50));
        objs.insert(0, a);
        objs.insert(1, b);
        objs.insert(5, c);
        LinkMap::new("/tmp/App-LinkMap.txt".to_string(), objs)
    }

    #[test]
    fn object_rows_sorted_by_size_desc() {
        let report = build_report(&sample(), &SizeQuery::new(Category::Object));
        let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["y.o", "x.o", "main.o"]);
        assert_eq!(report.rows[0].size, 0x208);
        assert_eq!(report.rows[0].id, "/a/liba.a(y.o)");
        assert_eq!(report.total_size, 0x208 + 0x108 + 0x50);
    }

    #[test]
    fn symbol_rows_disambiguate_same_name() {
        let report = build_report(&sample(), &SizeQuery::new(Category::Symbol));
        let shared: Vec<&SizeRow> = report
            .rows
            .iter()
            .filter(|r| r.name == "_shared")
            .collect();
        assert_eq!(shared.len(), 2);
        assert_ne!(shared[0].id, shared[1].id);
        assert_eq!(shared[0].lib.as_deref(), Some("liba.a"));
    }

    #[test]
    fn library_rows_fold_archive_members() {
        let report = build_report(&sample(), &SizeQuery::new(Category::Library));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "liba.a");
        assert_eq!(report.rows[0].size, 0x100 + 8 + 0x200 + 8);
        assert_eq!(report.rows[1].name, "objs");
        assert_eq!(report.rows[1].size, 0x50);
    }

    #[test]
    fn filter_is_case_sensitive_substring() {
        let mut query = SizeQuery::new(Category::Symbol);
        query.filter = "_sha".to_string();
        let report = build_report(&sample(), &query);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_size, 16);

        query.filter = "_SHA".to_string();
        let report = build_report(&sample(), &query);
        assert!(report.rows.is_empty());
        assert_eq!(report.total_size, 0);
    }

    #[test]
    fn total_conserved_across_groupings() {
        let lm = sample();
        let by_obj = build_report(&lm, &SizeQuery::new(Category::Object));
        let by_sym = build_report(&lm, &SizeQuery::new(Category::Symbol));
        let by_lib = build_report(&lm, &SizeQuery::new(Category::Library));
        assert_eq!(by_obj.total_size, lm.total());
        assert_eq!(by_sym.total_size, lm.total());
        assert_eq!(by_lib.total_size, lm.total());
    }

    #[test]
    fn summary_uses_formatted_total() {
        let report = SizeReport {
            rows: Vec::new(),
            total_size: 1536,
        };
        assert_eq!(report.summary(), "total: 1.50 KB");
    }
}
