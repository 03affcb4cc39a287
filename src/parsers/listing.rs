//! Dependency-listing line grammar.
//!
//! Maven's `dependency:list` writes one dependency per line in the form
//! `group:artifact:packaging:version:scope`, optionally followed by free
//! annotation text (module info and the like). Lines may carry embedded ANSI
//! color escapes, which are stripped before matching. Anything that does not
//! match the grammar is not an error: listing files mix dependency lines
//! with headers and blank lines.

use crate::model::Coordinate;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static regex"));

static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^\s*
        (?P<group>[A-Za-z0-9_.-]+):
        (?P<artifact>[A-Za-z0-9_.-]+):
        (?P<packaging>[A-Za-z0-9_.-]+):
        (?P<version>[A-Za-z0-9_.+-]+):
        (?P<scope>[A-Za-z0-9_.-]+)",
    )
    .expect("static regex")
});

/// Remove ANSI color escape sequences from a listing line.
#[must_use]
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(line, "")
}

/// Parse one listing line into a coordinate.
///
/// Returns `None` for lines that do not match the five-field grammar and for
/// entries whose packaging is not `jar` (compared case-insensitively);
/// poms, test-jars and the like are not subject to the age policy.
#[must_use]
pub fn parse_line(raw: &str) -> Option<Coordinate> {
    let line = strip_ansi(raw);
    let caps = COORD_RE.captures(line.trim())?;
    if !caps["packaging"].eq_ignore_ascii_case("jar") {
        return None;
    }
    Some(Coordinate::new(
        &caps["group"],
        &caps["artifact"],
        &caps["version"],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dependency_line() {
        let c = parse_line("   org.slf4j:slf4j-api:jar:2.0.17:compile").unwrap();
        assert_eq!(c, Coordinate::new("org.slf4j", "slf4j-api", "2.0.17"));
    }

    #[test]
    fn trailing_annotation_is_ignored() {
        let c = parse_line("org.slf4j:slf4j-api:jar:2.0.17:compile -- module org.slf4j [auto]")
            .unwrap();
        assert_eq!(c.gav(), "org.slf4j:slf4j-api:2.0.17");
    }

    #[test]
    fn ansi_codes_are_stripped_before_matching() {
        let line = "\u{1b}[36morg.slf4j:slf4j-api:jar:2.0.17:compile\u{1b}[0m";
        assert!(parse_line(line).is_some());
    }

    #[test]
    fn packaging_compare_is_case_insensitive() {
        assert!(parse_line("g:a:JAR:1.0:compile").is_some());
        assert!(parse_line("g:a:Jar:1.0:compile").is_some());
    }

    #[test]
    fn non_jar_packaging_is_excluded() {
        assert!(parse_line("g:a:pom:1.0:compile").is_none());
        assert!(parse_line("g:a:test-jar:1.0:test").is_none());
        assert!(parse_line("g:a:war:1.0:runtime").is_none());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("The following files have been resolved:").is_none());
        assert!(parse_line("g:a:jar:1.0").is_none()); // missing scope
        assert!(parse_line("none").is_none());
    }

    #[test]
    fn version_may_contain_plus_suffix() {
        let c = parse_line("g:a:jar:1.0.0+b42:runtime").unwrap();
        assert_eq!(c.version, "1.0.0+b42");
    }
}
