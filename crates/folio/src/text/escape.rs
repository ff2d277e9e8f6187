use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static ESCAPED_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[nt]").expect("Escaped control regex pattern is valid and should compile"));

/// Turn literal `\n` and `\t` two-character sequences into a real newline
/// and tab. Other backslash sequences are left alone.
///
/// Borrows the input when there is nothing to replace.
///
/// ```rust
/// use folio::text::unescape_control_sequences;
///
/// assert_eq!(unescape_control_sequences(r"a\nb\tc"), "a\nb\tc");
/// assert_eq!(unescape_control_sequences(r"C:\path"), r"C:\path");
/// ```
pub fn unescape_control_sequences(text: &str) -> Cow<'_, str> {
    ESCAPED_CONTROL.replace_all(text, |caps: &regex::Captures<'_>| match &caps[0] {
        r"\n" => "\n",
        _ => "\t",
    })
}
