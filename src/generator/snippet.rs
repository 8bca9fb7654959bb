use std::io::{self, Write};

/// First line of every printed snippet.
pub const SNIPPET_START: &str = "// Copy starts here >>>";
/// Last line of every printed snippet.
pub const SNIPPET_END: &str = "// Copy end here <<<";

/// Prints integration snippets for shared files the generator never edits.
///
/// The aggregate database trait and the API router collect every entity, so
/// changing them means editing existing source. Instead the rendered block is
/// written to an output channel between two marker lines for a human to paste.
pub struct SnippetPrinter<'w> {
    out: &'w mut dyn Write,
}

impl<'w> SnippetPrinter<'w> {
    /// Print to `out` (standard output in the CLI).
    #[must_use]
    pub fn new(out: &'w mut dyn Write) -> Self {
        SnippetPrinter { out }
    }

    /// Write `heading` (when non-empty), the start marker, `snippet` verbatim and the end marker.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn emit(&mut self, heading: &str, snippet: &str) -> io::Result<()> {
        writeln!(self.out)?;
        if !heading.is_empty() {
            writeln!(self.out, "{heading}")?;
        }
        writeln!(self.out, "{SNIPPET_START}")?;
        writeln!(self.out)?;
        self.out.write_all(snippet.as_bytes())?;
        if !snippet.ends_with('\n') {
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{SNIPPET_END}")?;
        self.out.flush()
    }
}

/// Return the text strictly between the first start marker and the following end marker.
///
/// Used to read a snippet back out of captured output.
#[must_use]
pub fn extract_snippet(output: &str) -> Option<&str> {
    let start = output.find(SNIPPET_START)? + SNIPPET_START.len();
    let end = start + output[start..].find(SNIPPET_END)?;
    Some(&output[start..end])
}
