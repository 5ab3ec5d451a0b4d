//! Error rendering using ariadne
//!
//! Definition errors point at the line of design code that made the
//! offending call. When that file can be read, errors are rendered with a
//! source snippet and the enclosing declarations as secondary labels.
//! Otherwise they fall back to a plain `file:line:column` listing.

use std::io::Write;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use blueprint_core::{DefinitionError, Error};
use hashbrown::HashMap;
use miette::Diagnostic;

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use blueprint::{Eval, Primitive, render_error};
///
/// let mut d = Eval::new();
/// d.user_type("Dup", |d| d.attribute("a", Primitive::Int));
/// d.user_type("Dup", |_| {});
/// if let Err(e) = d.finish() {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    writeln!(writer, "{}", error)?;
    let mut sources = Sources::default();
    for definition in error.errors() {
        match sources.get(definition.location.file()) {
            Some(source) => render_definition(definition, source, writer, use_color)?,
            None => render_plain(definition, writer)?,
        }
    }
    Ok(())
}

/// Design files read so far. `None` marks a file that could not be read.
#[derive(Default)]
struct Sources {
    files: HashMap<&'static str, Option<String>>,
}

impl Sources {
    fn get(&mut self, file: &'static str) -> Option<&str> {
        self.files
            .entry(file)
            .or_insert_with(|| std::fs::read_to_string(file).ok())
            .as_deref()
    }
}

/// Character range of the call starting at `line`:`column`, up to the end
/// of that line. Both `\n` and `\r\n` line endings are counted.
fn span(source: &str, line: u32, column: u32) -> Option<std::ops::Range<usize>> {
    let mut offset = 0;
    for (n, raw) in source.split_inclusive('\n').enumerate() {
        let text = raw.trim_end_matches(['\n', '\r']);
        if n + 1 == line as usize {
            let len = text.chars().count();
            let start = (column as usize).saturating_sub(1).min(len);
            let end = text.trim_end().chars().count().max(start + 1);
            return Some(offset + start..offset + end);
        }
        offset += raw.chars().count();
    }
    None
}

fn render_definition(
    error: &DefinitionError,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let file = error.location.file();
    let Some(primary) = span(source, error.location.line(), error.location.column()) else {
        return render_plain(error, writer);
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let message = error.to_string();
    let mut report = Report::build(ReportKind::Error, (file, primary.clone()))
        .with_message(&message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = error.code() {
        report = report.with_code(code.to_string());
    }

    report = report.with_label(
        Label::new((file, primary))
            .with_message(&message)
            .with_color(colors.next()),
    );

    // Enclosing declarations in the same file as secondary labels.
    for context in error.context.iter().filter(|c| c.location.file() == file) {
        if let Some(range) = span(source, context.location.line(), context.location.column()) {
            report = report.with_label(
                Label::new((file, range))
                    .with_message(format!("in {}", context.what))
                    .with_color(colors.next()),
            );
        }
    }

    if let Some(help) = error.help() {
        report = report.with_help(help.to_string());
    }

    report.finish().write((file, Source::from(source)), &mut *writer)
}

fn render_plain(error: &DefinitionError, writer: &mut dyn Write) -> std::io::Result<()> {
    let code = error
        .code()
        .map(|c| format!("[{}]", c))
        .unwrap_or_default();
    writeln!(writer, "{}: error{}: {}", error.location, code, error)?;
    for context in &error.context {
        writeln!(writer, "  {}", context)?;
    }
    if let Some(help) = error.help() {
        writeln!(writer, "  help: {}", help)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::{Eval, Primitive};

    fn failing_design() -> Error {
        let mut d = Eval::new();
        d.user_type("Dup", |d| d.attribute("a", Primitive::Int));
        d.user_type("Dup", |_| {});
        d.finish().unwrap_err()
    }

    #[test]
    fn test_render_definition_error() {
        let output = render_error_to_string_no_color(&failing_design());

        assert!(output.contains("design evaluation failed with 1 error(s)"));
        assert!(output.contains("E002"));
        assert!(output.contains("type \"Dup\" is already declared"));
    }

    #[test]
    fn test_render_plain_fallback() {
        let error = failing_design();
        let mut buf = Vec::new();
        render_plain(&error.errors()[0], &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.starts_with(file!()));
        assert!(output.contains(": error[E002]: type \"Dup\" is already declared"));
        assert!(output.contains("help: The first declaration is kept"));
    }

    #[test]
    fn test_span_covers_rest_of_line() {
        let source = "fn main() {\n    d.user_type(\"A\", |_| {});\n}\n";
        // Second line starts after "fn main() {\n" (12 chars).
        assert_eq!(span(source, 2, 5), Some(16..41));
        assert_eq!(span(source, 9, 1), None);
    }

    #[test]
    fn test_span_with_crlf_line_endings() {
        let source = "fn main() {\r\n    d.user_type(\"A\", |_| {});\r\n}\r\n";
        // Second line starts after "fn main() {\r\n" (13 chars).
        assert_eq!(span(source, 2, 5), Some(17..42));
        assert_eq!(span(source, 3, 1), Some(44..45));
    }
}
