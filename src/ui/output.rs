use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::Write;

/// Write one line of human output unless `quiet`
fn write_line(out: &mut impl Write, quiet: bool, line: impl Display) -> std::io::Result<()> {
    if quiet {
        return Ok(());
    }
    writeln!(out, "{}", line)
}

fn emit(line: impl Display) {
    // stdout closed under us (e.g. `| head`); nothing useful to report
    let _ = write_line(&mut std::io::stdout().lock(), is_quiet(), line);
}

pub fn header(text: &str) {
    emit(format_args!("{} {}", Icons::ROCKET, text.style(theme().header.clone())));
}

pub fn success(label: &str) {
    emit(format_args!("{} {}", Icons::CHECK, label.style(theme().success.clone())));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    emit(format_args!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    ));
}

pub fn section(title: &str) {
    emit("");
    emit(format_args!("━{}━", title.style(theme().header.clone())));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    emit(format_args!("  {} {}", label.style(theme().dim.clone()), value));
}

/// Placeholder line for an empty listing
pub fn empty(message: &str) {
    emit(format_args!("∅ {}", message));
}

/// Print a rendered block (table, version banner) as-is
pub fn block(content: impl Display) {
    emit(content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_writes_nothing() {
        let mut out = Vec::new();
        write_line(&mut out, true, "  description: errors").unwrap();
        write_line(&mut out, true, format_args!("∅ {}", "No saved searches.")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_loud_writes_line() {
        let mut out = Vec::new();
        write_line(&mut out, false, "  query: lang:go").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  query: lang:go\n");
    }
}
