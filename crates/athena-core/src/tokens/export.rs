//! Local variables into a token export.

use crate::color::to_hex;
use crate::errors::{AthenaError, Result};
use crate::host::{Document, Variable, VariableValue};
use crate::tokens::alias::{AliasResolver, Resolution};
use crate::tokens::model::{
    CodeSyntax, TokenCollectionExport, TokenExportMeta, TokenExportPayload, TokenVariableExport,
};
use crate::tokens::names::split_variable_name;
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, HashMap};

pub const NO_COLLECTION: &str = "No collection";

/// Export every local variable collection of `document`
///
/// # Errors
///
/// [`AthenaError::CapabilityMissing`] when the document exposes no
/// variables API. Remote alias failures are not errors.
pub async fn collect_tokens(
    document: &Document,
    resolver: &AliasResolver,
) -> Result<TokenExportPayload> {
    log_op_start!("collect_tokens");
    let start = std::time::Instant::now();

    let Some(api) = document.variables.as_ref() else {
        let err = AthenaError::CapabilityMissing {
            capability: "variables".to_string(),
        };
        log_op_error!(
            "collect_tokens",
            err.clone(),
            started = start
        );
        return Err(err);
    };

    let by_id: HashMap<&str, &Variable> = api.variables.iter().map(|v| (v.id.as_str(), v)).collect();
    let resolution = resolver.prepare().await;

    let collections: Vec<TokenCollectionExport> = api
        .collections
        .iter()
        .map(|collection| {
            let collection_name = if collection.name.is_empty() {
                collection.key.as_str()
            } else {
                collection.name.as_str()
            };
            TokenCollectionExport {
                id: collection.id.clone(),
                name: collection.name.clone(),
                key: collection.key.clone(),
                default_mode_id: collection.default_mode_id.clone(),
                hidden_from_publishing: collection.hidden_from_publishing,
                remote: collection.remote,
                modes: collection.modes.clone(),
                variables: collection
                    .variable_ids
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()))
                    .map(|variable| serialize_variable(variable, collection_name, &resolution))
                    .collect(),
            }
        })
        .collect();

    let payload = TokenExportPayload {
        meta: TokenExportMeta {
            generated_at: chrono::Utc::now().to_rfc3339(),
            file_name: document.name.clone(),
            library: document.name.clone(),
        },
        collections,
    };

    log_op_end!(
        "collect_tokens",
        started = start,
        collection_count = payload.collections.len()
    );
    Ok(payload)
}

fn serialize_variable(
    variable: &Variable,
    collection_name: &str,
    resolution: &Resolution<'_>,
) -> TokenVariableExport {
    let raw_name: &str = if variable.name.is_empty() {
        &variable.key
    } else {
        &variable.name
    };
    let parts = split_variable_name(Some(raw_name));

    let values_by_mode: BTreeMap<String, VariableValue> = variable
        .values_by_mode
        .iter()
        .map(|(mode, value)| (mode.clone(), resolution.resolve(value)))
        .collect();
    let hex_by_mode = values_by_mode
        .iter()
        .filter_map(|(mode, value)| match value {
            VariableValue::Color(c) => Some((mode.clone(), to_hex(c.r, c.g, c.b))),
            _ => None,
        })
        .collect();

    TokenVariableExport {
        id: variable.id.clone(),
        name: variable.name.clone(),
        description: variable.description.clone(),
        hidden_from_publishing: variable.hidden_from_publishing,
        remote: variable.remote,
        key: variable.key.clone(),
        resolved_type: variable.resolved_type,
        variable_collection_id: variable.variable_collection_id.clone(),
        scopes: variable.scopes.clone(),
        code_syntax: code_syntax(&variable.code_syntax),
        values_by_mode,
        hex_by_mode,
        collection_name: if collection_name.is_empty() {
            NO_COLLECTION.to_string()
        } else {
            collection_name.to_string()
        },
        group_name: parts.group_name,
        token_name: parts.token_name,
    }
}

fn code_syntax(source: &BTreeMap<String, String>) -> CodeSyntax {
    let pick = |platform: &str| source.get(platform).filter(|s| !s.is_empty()).cloned();
    CodeSyntax {
        web: pick("WEB"),
        android: pick("ANDROID"),
        ios: pick("iOS"),
    }
}
