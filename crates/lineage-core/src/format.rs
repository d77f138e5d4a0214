//! Presentation helpers. Pure, no failure modes.

use lineage_types::RelationshipKind;

/// Display label for a relationship kind, e.g. `"Inspired By"`.
pub fn relationship_label(kind: RelationshipKind) -> &'static str {
    kind.label()
}

/// Display label for a generation: `"Original"` for 0, otherwise an English
/// ordinal such as `"2nd Generation"` or `"11th Generation"`.
pub fn format_generation(generation: u64) -> String {
    if generation == 0 {
        return "Original".to_owned();
    }
    format!("{generation}{} Generation", ordinal_suffix(generation))
}

fn ordinal_suffix(n: u64) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
