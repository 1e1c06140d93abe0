/// Section classifier for the line-oriented linker map format.
///
/// Header lines all start with `#`; the four recognized headers switch
/// the state used to parse subsequent content lines. Header lines carry
/// no content themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    ObjectFiles,
    Sections,
    Symbols,
    /// Terminal: the scan stops as soon as this header is seen.
    DeadStripped,
}

impl Section {
    /// Applies a header line to the current state. Returns the state for
    /// parsing following content lines; unrecognized `#` lines (column
    /// headers like `# Address Size File Name`) leave it unchanged.
    pub fn transition(self, line: &str) -> Section {
        if line.starts_with("# Object files:") {
            Section::ObjectFiles
        } else if line.starts_with("# Sections:") {
            Section::Sections
        } else if line.starts_with("# Symbols:") {
            Section::Symbols
        } else if line.starts_with("# Dead Stripped Symbols:") {
            Section::DeadStripped
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_headers_switch_state() {
        let s = Section::None.transition("# Object files:");
        assert_eq!(s, Section::ObjectFiles);
        let s = s.transition("# Sections:");
        assert_eq!(s, Section::Sections);
        let s = s.transition("# Symbols:");
        assert_eq!(s, Section::Symbols);
        let s = s.transition("# Dead Stripped Symbols:");
        assert_eq!(s, Section::DeadStripped);
    }

    #[test]
    fn unrecognized_header_keeps_state() {
        let s = Section::Symbols.transition("# Address\tSize    \tFile  Name");
        assert_eq!(s, Section::Symbols);
        assert_eq!(Section::None.transition("# Path: /tmp/app"), Section::None);
    }
}
