//! Node paths and their canonical form.
//!
//! A path is the ` / `-joined chain of names from the structure root to a
//! node. Variants of one component set have differently named roots, so
//! matching happens on the canonical form, where the root segment is
//! replaced by [`ROOT_SEGMENT`].

pub const PATH_SEPARATOR: &str = " / ";
pub const ROOT_SEGMENT: &str = "@root";

/// Path of a child named `name` under `parent_path` (root when `None`)
pub fn make_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}{PATH_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

/// Replace the first segment with the root sentinel
pub fn canonical_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    match path.split_once(PATH_SEPARATOR) {
        Some((_, rest)) => format!("{ROOT_SEGMENT}{PATH_SEPARATOR}{rest}"),
        None => ROOT_SEGMENT.to_string(),
    }
}
