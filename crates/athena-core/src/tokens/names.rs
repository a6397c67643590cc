//! Group/name split shared by token and style exports.

pub const UNGROUPED: &str = "Ungrouped";
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub group_name: String,
    pub token_name: String,
}

/// Split `Group/Rest/Of/Name` on the first `/`
pub fn split_variable_name(raw: Option<&str>) -> NameParts {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return NameParts {
            group_name: UNGROUPED.to_string(),
            token_name: UNTITLED.to_string(),
        };
    }
    match trimmed.split_once('/') {
        None => NameParts {
            group_name: UNGROUPED.to_string(),
            token_name: trimmed.to_string(),
        },
        Some((group, rest)) => NameParts {
            group_name: non_empty_or(group, UNGROUPED),
            token_name: non_empty_or(rest, UNTITLED),
        },
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
