use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
    insta::assert_snapshot!(format!("{}", Severity::Critical), @"critical");
}

#[test]
fn severity_ordering() {
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Critical);
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::GarbageAtEnd, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(
        diagnostics.last().unwrap().message(),
        @"garbage at end of input"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 3))
        .message("`foo`, expecting one of: 'hello'")
        .emit();

    insta::assert_snapshot!(
        diagnostics.last().unwrap().message(),
        @"unexpected token: `foo`, expecting one of: 'hello'"
    );
}

#[test]
fn custom_templates() {
    assert_eq!(
        DiagnosticKind::UnknownTokenKind.message(Some("money")),
        "`$money` is not a declared token kind"
    );
    assert_eq!(
        DiagnosticKind::ActionFailed.message(Some("division by zero")),
        "division by zero"
    );
    assert_eq!(
        DiagnosticKind::KeywordExpected.message(None),
        "keyword expected"
    );
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownTokenKind, range(0, 1))
        .message("money")
        .emit();

    let diag = diagnostics.last().unwrap();
    assert_eq!(
        diag.hints(),
        ["declare the kind before using it in a pattern"]
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .warning(DiagnosticKind::InvalidCharacter, range(2, 3))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn recoverable_kinds_default_to_warnings() {
    let mut diagnostics = Diagnostics::new();
    for kind in [
        DiagnosticKind::UnterminatedString,
        DiagnosticKind::InvalidCharacter,
        DiagnosticKind::UnknownTokenKind,
    ] {
        diagnostics.report(kind, range(0, 1)).emit();
    }

    assert_eq!(diagnostics.warning_count(), 3);
    assert!(!diagnostics.has_errors());
    assert_eq!(
        DiagnosticKind::GarbageAtEnd.default_severity(),
        Severity::Error
    );
}

#[test]
fn critical_counts_as_error() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ActionFailed, range(0, 1))
        .severity(Severity::Critical)
        .emit();

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn display_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::KeywordExpected, range(6, 11))
        .message("'to', found 'into'")
        .related_to("pattern selected here", range(0, 5))
        .hint("did you mean 'to'?")
        .emit();
    diagnostics
        .warning(DiagnosticKind::InvalidCharacter, range(12, 13))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error[keyword-expected] at 6..11: keyword expected: 'to', found 'into' (related: pattern selected here at 0..5) (hint: did you mean 'to'?)
    warning[invalid-character] at 12..13: invalid character
    ");
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    let result = diagnostics.render("source");
    assert!(result.is_empty());
}

#[test]
fn printer_with_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 5))
        .message("`hello`")
        .emit();

    let result = diagnostics.render("hello world");
    assert!(result.contains("unexpected-token"));
    assert!(result.contains("unexpected token: `hello`"));
    assert!(result.contains("1 | hello world"));
    assert!(result.contains("^^^^^"));
}

#[test]
fn printer_with_path_and_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::GarbageAtEnd, range(6, 11))
        .hint("remove the trailing input")
        .emit();

    let result = diagnostics
        .printer()
        .source("hello world")
        .path("input.txt")
        .render();
    assert!(result.contains("input.txt:1:7"));
    assert!(result.contains("remove the trailing input"));
}

#[test]
fn printer_zero_width_span_at_end() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, TextRange::empty(5.into()))
        .message("end of input")
        .emit();

    // Must not panic on a span past the last byte.
    let result = diagnostics.render("hello");
    assert!(result.contains("unexpected token: end of input"));
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TokenTypeExpected, range(0, 5))
        .message("test")
        .emit();

    let result = diagnostics.render_colored("hello", true);
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn collection_methods() {
    let mut first = Diagnostics::new();
    first
        .report(DiagnosticKind::UnexpectedToken, range(0, 1))
        .emit();

    let mut second = Diagnostics::new();
    second
        .warning(DiagnosticKind::InvalidCharacter, range(1, 2))
        .emit();
    second
        .report(DiagnosticKind::GarbageAtEnd, range(2, 3))
        .emit();

    first.extend(second);
    assert_eq!(first.len(), 3);

    let kinds: Vec<_> = (&first).into_iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::UnexpectedToken,
            DiagnosticKind::InvalidCharacter,
            DiagnosticKind::GarbageAtEnd,
        ]
    );

    first.clear();
    assert!(first.is_empty());
}
