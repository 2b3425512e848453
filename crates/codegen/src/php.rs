//! PHP literal helpers shared by the emitters.

use crate::writer::CodeWriter;

/// Escape text for a single-quoted PHP string.
///
/// Backslashes and single quotes are escaped and line breaks collapse to a
/// single space, so the result always stays on one line.
pub fn escape(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    flattened.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Wrap text in single quotes, escaping as needed
pub fn quote(text: &str) -> String {
    format!("'{}'", escape(text))
}

/// Render a PHP array literal of quoted strings (`['a', 'b']`)
pub fn string_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| quote(i.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Write a `/** ... */` doc block.
///
/// Each paragraph line of `text` becomes one ` * ` line; a blank line in the
/// text becomes a bare ` *`.
pub fn doc_block(w: &mut CodeWriter, text: &str) {
    w.line("/**");
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            w.line(" *");
        } else {
            // A literal "*/" would end the comment early
            w.line(format!(" * {}", line.replace("*/", "* /")));
        }
    }
    w.line(" */");
}
