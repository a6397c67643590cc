//! The host's "mixed" sentinel.
//!
//! Properties that can differ across a selection (e.g. per-character font
//! size) come back from the host as a sentinel instead of a value. In JSON
//! dumps the sentinel is spelled [`MIXED_SENTINEL`].

use serde::{Deserialize, Deserializer};

pub const MIXED_SENTINEL: &str = "__mixed__";

/// A host property that is either uniform or mixed
#[derive(Debug, Clone, PartialEq)]
pub enum Mixable<T> {
    Mixed,
    Uniform(T),
}

impl<T> Mixable<T> {
    pub fn uniform(&self) -> Option<&T> {
        match self {
            Mixable::Uniform(value) => Some(value),
            Mixable::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Mixable::Mixed)
    }
}

impl<T> From<T> for Mixable<T> {
    fn from(value: T) -> Self {
        Mixable::Uniform(value)
    }
}

#[derive(Deserialize)]
enum MixedMarker {
    #[serde(rename = "__mixed__")]
    Mixed,
}

impl<'de, T> Deserialize<'de> for Mixable<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Mixed(MixedMarker),
            Uniform(T),
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Mixed(MixedMarker::Mixed) => Mixable::Mixed,
            Repr::Uniform(value) => Mixable::Uniform(value),
        })
    }
}

/// Uniform value of an optional mixable property
pub(crate) fn uniform<T>(value: &Option<Mixable<T>>) -> Option<&T> {
    value.as_ref().and_then(Mixable::uniform)
}
