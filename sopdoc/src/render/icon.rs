//! Keyword-based icon selection
//!
//! Maps a tab label to a symbolic icon id through ordered keyword rules.
//! Purely presentational: callers may rely on *some* icon being chosen,
//! never on which one.

/// Ordered keyword rules; the first matching keyword wins
const ICON_RULES: &[(&str, &str)] = &[
    ("deploy", "rocket"),
    ("technical", "wrench"),
    ("engineer", "wrench"),
    ("onboard", "handshake"),
    ("client", "users"),
    ("payment", "credit-card"),
    ("invoice", "credit-card"),
    ("security", "shield"),
    ("incident", "siren"),
    ("report", "chart-bar"),
    ("checklist", "list-check"),
    ("legal", "scale"),
];

/// Fallback when no rule matches
const DEFAULT_ICON: &str = "file-text";

/// Choose a symbolic icon id for a label
pub fn icon_for_label(label: &str) -> &'static str {
    let lowered = label.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
