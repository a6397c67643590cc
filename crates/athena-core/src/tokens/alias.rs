//! Resolution of aliases that point into a remote token library.

use crate::host::VariableValue;
use crate::tokens::remote::RemoteTokenSource;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

const VARIABLE_ID_PREFIX: &str = "VariableID:";

/// Library key of an alias id: `VariableID:<key>/<suffix>` -> `<key>`
pub fn extract_alias_key(alias_id: &str) -> Option<&str> {
    let without_prefix = alias_id.strip_prefix(VARIABLE_ID_PREFIX).unwrap_or(alias_id);
    let key = without_prefix.split('/').next().unwrap_or_default();
    (!key.is_empty()).then_some(key)
}

/// Resolves library aliases against a remote token document
///
/// The document is fetched on first use and kept for the resolver's
/// lifetime. A failed fetch or an unparsable document is logged and leaves
/// every alias unresolved; it is not retried.
pub struct AliasResolver {
    source: Arc<dyn RemoteTokenSource>,
    library: OnceCell<HashMap<String, VariableValue>>,
}

impl AliasResolver {
    pub fn new(source: Arc<dyn RemoteTokenSource>) -> Self {
        Self {
            source,
            library: OnceCell::new(),
        }
    }

    /// A resolver that never resolves anything
    pub fn disabled() -> Self {
        let library = OnceCell::new_with(Some(HashMap::new()));
        Self {
            source: Arc::new(NoSource),
            library,
        }
    }

    async fn library(&self) -> &HashMap<String, VariableValue> {
        self.library
            .get_or_init(|| async {
                match self.source.fetch().await {
                    Ok(text) => match parse_library(&text) {
                        Ok(map) => {
                            tracing::debug!(
                                source = %self.source.location(),
                                variables = map.len(),
                                "remote token library loaded"
                            );
                            map
                        }
                        Err(err) => {
                            tracing::warn!(source = %self.source.location(), error = %err, "remote token library unparsable");
                            HashMap::new()
                        }
                    },
                    Err(err) => {
                        tracing::warn!(source = %self.source.location(), error = %err, "remote token library unavailable");
                        HashMap::new()
                    }
                }
            })
            .await
    }

    /// Make sure the library is loaded before resolving synchronously
    pub async fn prepare(&self) -> Resolution<'_> {
        Resolution {
            library: self.library().await,
        }
    }
}

/// A loaded library
pub struct Resolution<'a> {
    library: &'a HashMap<String, VariableValue>,
}

impl Resolution<'_> {
    /// The library's value for an alias, or the value itself
    pub fn resolve(&self, value: &VariableValue) -> VariableValue {
        let VariableValue::Alias(alias) = value else {
            return value.clone();
        };
        extract_alias_key(&alias.id)
            .and_then(|key| self.library.get(key))
            .cloned()
            .unwrap_or_else(|| value.clone())
    }
}

struct NoSource;

#[async_trait::async_trait]
impl RemoteTokenSource for NoSource {
    async fn fetch(&self) -> crate::errors::Result<String> {
        Ok(String::new())
    }

    fn location(&self) -> String {
        "none".to_string()
    }
}

#[derive(Deserialize)]
struct RemoteDocument {
    #[serde(default)]
    collections: Vec<RemoteCollection>,
}

#[derive(Deserialize)]
struct RemoteCollection {
    #[serde(default)]
    variables: Vec<RemoteVariable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteVariable {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    values_by_mode: OrderedValues,
}

/// Mode values in document order
#[derive(Default)]
struct OrderedValues(Vec<serde_json::Value>);

impl<'de> Deserialize<'de> for OrderedValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of mode id to value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some((_mode, value)) = map.next_entry::<String, serde_json::Value>()? {
                    values.push(value);
                }
                Ok(OrderedValues(values))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Library key -> first mode value that is defined
fn parse_library(text: &str) -> serde_json::Result<HashMap<String, VariableValue>> {
    let document: RemoteDocument = serde_json::from_str(text)?;
    let mut map = HashMap::new();
    for variable in document.collections.into_iter().flat_map(|c| c.variables) {
        let Some(key) = variable.key.filter(|k| !k.is_empty()) else {
            continue;
        };
        let first = variable
            .values_by_mode
            .0
            .into_iter()
            .filter(|v| !v.is_null())
            .find_map(|v| serde_json::from_value::<VariableValue>(v).ok());
        if let Some(value) = first {
            map.insert(key, value);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AthenaError, Result};
    use crate::host::variables::{AliasTag, AliasValue, ColorValue};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        body: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteTokenSource for CountingSource {
        async fn fetch(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone().ok_or_else(|| AthenaError::RemoteSource {
                url: "mem".into(),
                reason: "offline".into(),
            })
        }

        fn location(&self) -> String {
            "mem".into()
        }
    }

    fn alias(id: &str) -> VariableValue {
        VariableValue::Alias(AliasValue {
            kind: AliasTag::VariableAlias,
            id: id.into(),
        })
    }

    /// Raw text keeps mode order; `json!` would sort the keys
    fn library_json() -> String {
        r#"{
            "collections": [{
                "variables": [{
                    "key": "abc123",
                    "valuesByMode": {"9:1": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}, "9:0": "late"}
                }, {
                    "valuesByMode": {"9:0": true}
                }]
            }]
        }"#
        .to_string()
    }

    #[test]
    fn test_extract_alias_key() {
        assert_eq!(extract_alias_key("VariableID:abc123/45:6"), Some("abc123"));
        assert_eq!(extract_alias_key("abc123"), Some("abc123"));
        assert_eq!(extract_alias_key("VariableID:/x"), None);
    }

    #[tokio::test]
    async fn test_resolves_to_first_mode_value() {
        let source = Arc::new(CountingSource {
            body: Some(library_json()),
            calls: AtomicUsize::new(0),
        });
        let resolver = AliasResolver::new(source.clone());

        let resolution = resolver.prepare().await;
        let resolved = resolution.resolve(&alias("VariableID:abc123/1:2"));
        assert_eq!(
            resolved,
            VariableValue::Color(ColorValue {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: Some(1.0)
            })
        );
        assert_eq!(resolution.resolve(&alias("VariableID:zzz/1:2")), alias("VariableID:zzz/1:2"));
        assert_eq!(resolution.resolve(&VariableValue::Bool(true)), VariableValue::Bool(true));

        resolver.prepare().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_aliases_and_is_not_retried() {
        let source = Arc::new(CountingSource {
            body: None,
            calls: AtomicUsize::new(0),
        });
        let resolver = AliasResolver::new(source.clone());

        let value = alias("VariableID:abc123/1:2");
        assert_eq!(resolver.prepare().await.resolve(&value), value);
        assert_eq!(resolver.prepare().await.resolve(&value), value);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_garbage_document_resolves_nothing() {
        let resolver = AliasResolver::new(Arc::new(CountingSource {
            body: Some("<html>".into()),
            calls: AtomicUsize::new(0),
        }));
        let value = alias("VariableID:abc123/1:2");
        assert_eq!(resolver.prepare().await.resolve(&value), value);
    }
}
