use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grammar::{Element, Grammar, GrammarError, RuleId};
use crate::scanner::TokenKind;

/// Validate the elements of one rule.
///
/// An undeclared token kind is reported and checking continues, since the
/// pattern can still be dispatched on its other keys. An undefined rule
/// reference is a broken grammar and stops the check.
pub fn check_rule(
    grammar: &Grammar,
    rule: RuleId,
    diagnostics: &mut Diagnostics,
) -> Result<(), GrammarError> {
    for pattern in grammar.rule(rule).patterns() {
        for element in pattern.elements() {
            match element {
                Element::Variable(kind @ TokenKind::Variable(sym)) if !grammar.is_declared(*kind) => {
                    diagnostics
                        .report(DiagnosticKind::UnknownTokenKind, TextRange::default())
                        .message(grammar.resolve(*sym))
                        .hint(format!("used by rule `{}`", grammar.rule_name(rule)))
                        .emit();
                }
                Element::Reference(sym) if grammar.rule_by_symbol(*sym).is_none() => {
                    return Err(GrammarError::UnknownRule {
                        rule: grammar.rule_name(rule).to_owned(),
                        referenced: grammar.resolve(*sym).to_owned(),
                    });
                }
                _ => {}
            }
        }
    }
    Ok(())
}
