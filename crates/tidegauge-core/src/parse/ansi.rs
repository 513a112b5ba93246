use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    // 7-bit C1 Fe escapes and CSI sequences (colours, cursor movement)
    static ref ANSI_ESCAPE: Regex =
        Regex::new(r"\x1B(?:[\x40-\x5A\x5C-\x5F]|\[[\x30-\x3F]*[\x20-\x2F]*[\x40-\x7E])").unwrap();
}

/// Remove terminal escape sequences, borrowing when there are none
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.contains('\x1B') {
        return Cow::Borrowed(line);
    }
    ANSI_ESCAPE.replace_all(line, "")
}
