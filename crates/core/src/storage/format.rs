use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::CoreError;

/// Persisted collection codec: each namespace key maps to one flat JSON
/// array of records.
///
/// This is the typed boundary between raw stored blobs and model types —
/// malformed input surfaces here as a `CoreError`, and the layer above
/// decides whether to propagate or degrade.
pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<String, CoreError> {
    serde_json::to_string(items)
        .map_err(|e| CoreError::Serialization(format!("Failed to encode collection: {e}")))
}

/// Decode a stored blob back into a collection.
pub fn decode_collection<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Deserialization(format!("Failed to decode collection: {e}")))
}
