//! Design token export.
//!
//! Local variable collections are exported with their modes and values.
//! Aliases into a published library are replaced by the library's value
//! when the library document (see [`remote`]) has it.

pub mod alias;
pub mod export;
pub mod model;
pub mod names;
pub mod remote;

pub use alias::{extract_alias_key, AliasResolver};
pub use export::collect_tokens;
pub use model::{
    CodeSyntax, TokenCollectionExport, TokenExportMeta, TokenExportPayload, TokenVariableExport,
};
pub use names::{split_variable_name, NameParts};
pub use remote::{FileTokenSource, HttpTokenSource, RemoteTokenSource};
