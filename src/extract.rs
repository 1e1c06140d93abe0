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

/// Entry extractors for single map-file lines.
///
/// All of these are forgiving: a line that does not match the expected
/// shape yields `None`, never an error. The builder decides whether a
/// miss is worth a diagnostic.
use crate::linkmap::{ObjectFile, Symbol};

/// Parse an integer in decimal or `0x`-prefixed hex (prefix-detected,
/// the two radixes the linker emits).
pub fn parse_int(field: &str) -> Option<u64> {
    let s = field.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        s.parse::<u64>().ok()
    }
}

/// Shared primitive for the `[N] rest` shape used by both object-file
/// lines and the file field of symbol lines. Yields the bracketed index
/// and everything after the closing bracket (one separating space
/// stripped).
pub fn extract_index_and_rest(line: &str) -> Option<(u32, &str)> {
    let inner = line.strip_prefix('[')?;
    let close = inner.find(']')?;
    let index = u32::try_from(parse_int(&inner[..close])?).ok()?;
    let rest = inner[close + 1..].strip_prefix(' ').unwrap_or(&inner[close + 1..]);
    Some((index, rest))
}

/// An object-file line: `[N] /path/to/liba.a(x.o)`. The whole remainder
/// is the path.
pub fn parse_object_file_line(line: &str) -> Option<ObjectFile> {
    let (index, path) = extract_index_and_rest(line)?;
    Some(ObjectFile::new(index, path.to_string()))
}

/// A symbol line: `<start>\t<size>\t[N] <name>`, exactly three
/// tab-separated fields. Returns the owning object-file index alongside
/// the symbol.
pub fn parse_symbol_line(line: &str) -> Option<(u32, Symbol)> {
    let mut fields = line.splitn(4, '\t');
    let start_field = fields.next()?;
    let size_field = fields.next()?;
    let name_field = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    let (index, name) = extract_index_and_rest(name_field)?;
    let start = parse_int(start_field)?;
    let size = parse_int(size_field)?;
    Some((
        index,
        Symbol {
            name: name.to_string(),
            start,
            size,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_decimal_and_hex() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("0x2A"), Some(42));
        assert_eq!(parse_int("0X2a"), Some(42));
        assert_eq!(parse_int(" 0x1000 "), Some(0x1000));
        assert_eq!(parse_int("nope"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("0x"), None);
    }

    #[test]
    fn bracketed_index_shapes() {
        assert_eq!(extract_index_and_rest("[3] /a/x.o"), Some((3, "/a/x.o")));
        assert_eq!(extract_index_and_rest("[0x10] _foo"), Some((16, "_foo")));
        assert_eq!(extract_index_and_rest("[7]"), Some((7, "")));
        assert_eq!(extract_index_and_rest("no brackets"), None);
        assert_eq!(extract_index_and_rest("[xyz] path"), None);
        assert_eq!(extract_index_and_rest("[3 path"), None);
        assert_eq!(extract_index_and_rest(""), None);
    }

    #[test]
    fn object_file_line() {
        let o = parse_object_file_line("[2] /a/liba.a(x.o)").unwrap();
        assert_eq!(o.index, 2);
        assert_eq!(o.path, "/a/liba.a(x.o)");
        assert!(o.symbols.is_empty());
        assert!(parse_object_file_line("# Object files:").is_none());
    }

    #[test]
    fn symbol_line_well_formed() {
        let (index, sym) = parse_symbol_line("0x1000\t0x0100\t[0] _foo").unwrap();
        assert_eq!(index, 0);
        assert_eq!(sym.name, "_foo");
        assert_eq!(sym.start, 0x1000);
        assert_eq!(sym.size, 0x100);
    }

    #[test]
    fn symbol_line_field_count_must_be_three() {
        assert!(parse_symbol_line("0x1000\t0x0100").is_none());
        assert!(parse_symbol_line("0x1000\t0x0100\t[0] _foo\textra").is_none());
        assert!(parse_symbol_line("").is_none());
    }

    #[test]
    fn symbol_line_sub_parse_failures() {
        assert!(parse_symbol_line("oops\t0x0100\t[0] _foo").is_none());
        assert!(parse_symbol_line("0x1000\toops\t[0] _foo").is_none());
        assert!(parse_symbol_line("0x1000\t0x0100\t_foo").is_none());
    }

    #[test]
    fn symbol_name_keeps_spaces() {
        let (_, sym) = parse_symbol_line("0x10\t0x2\t[1] literal string: a b").unwrap();
        assert_eq!(sym.name, "literal string: a b");
    }
}
