//! Prototype discovery in suite declaration files.

use smol_str::SmolStr;

/// Substring that marks a declaration line as a test prototype.
const PROTOTYPE_MARKER: &str = "void ";

/// Resumable, forward-only scanner over the lines of a declarations file.
///
/// Each call to [`next_prototype`](Self::next_prototype) advances the cursor
/// strictly forward; once the input is exhausted every later call keeps
/// returning `None`.
pub struct PrototypeScanner<'a> {
    lines: &'a [&'a str],
    cursor: usize,
}

impl<'a> PrototypeScanner<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, cursor: 0 }
    }

    /// Index of the next line containing the prototype marker, at or after
    /// the cursor.
    pub fn next_prototype(&mut self) -> Option<usize> {
        while self.cursor < self.lines.len() {
            let idx = self.cursor;
            self.cursor += 1;
            if self.lines[idx].contains(PROTOTYPE_MARKER) {
                return Some(idx);
            }
        }
        None
    }
}

/// Extract the function name from a prototype line: the rightmost
/// space-preceded run of identifier characters immediately followed by `(`.
pub fn prototype_name(line: &str) -> Option<SmolStr> {
    let bytes = line.as_bytes();
    for (paren, _) in line.match_indices('(').rev() {
        let mut start = paren;
        while start > 0 && is_ident_byte(bytes[start - 1]) {
            start -= 1;
        }
        if start == paren || start == 0 {
            continue;
        }
        if bytes[start - 1] == b' ' {
            return Some(SmolStr::new(&line[start..paren]));
        }
    }
    None
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
