use super::errors::CollectionStoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single control parameter passed to a transformer call.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Value type of a declared transformer parameter.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Boolean,
    Int,
    Double,
    String,
}

/// A control declared by a transformer, as advertised in its
/// [`TransformerInfo`].
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Parameter {
    /// Name the control must use
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Whether omitting this control fails the call
    pub required: bool,
    /// Value used when the control is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub allowed_values: Vec<String>,
}

/// Role of a transformer in the catalog. Producers build collections from
/// controls alone; transformers and filters require an input collection.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransformerFunction {
    Producer,
    Transformer,
    Filter,
    Aggregator,
}

/// Descriptive record of an available transformer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct TransformerInfo {
    /// Unique name used to invoke the transformer
    pub name: String,
    /// Short human-readable label
    pub label: String,
    pub description: String,
    pub version: String,
    pub function: TransformerFunction,
    /// Controls the transformer accepts
    pub parameters: Vec<Parameter>,
}

/// Request to invoke a named transformer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct TransformerQuery {
    /// Name of the transformer to invoke
    pub name: String,
    /// Input collection; required for filters and transformers, ignored by
    /// producers
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub collection_id: Option<String>,
    /// Control values for the call
    #[serde(default)]
    pub controls: Vec<Property>,
}

/// Set operation applied by an aggregation.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AggregationOperation {
    Union,
    Intersection,
    Difference,
    #[serde(rename = "symmetric difference")]
    SymmetricDifference,
}

impl AggregationOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationOperation::Union => "union",
            AggregationOperation::Intersection => "intersection",
            AggregationOperation::Difference => "difference",
            AggregationOperation::SymmetricDifference => "symmetric difference",
        }
    }
}

/// Request to combine existing collections into a new one.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AggregationQuery {
    pub operation: AggregationOperation,
    /// Collections to combine, in order; the first one anchors difference
    /// semantics and the element class of the result
    pub collection_ids: Vec<String>,
}

/// Reference to a stored collection of elements.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CollectionInfo {
    /// Identifier of the collection
    pub id: String,
    /// Number of elements in the collection
    pub size: usize,
    /// Class shared by the collection's elements
    pub element_class: String,
    /// Location the collection can be fetched from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Transformer or operation that produced the collection
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<Attribute>,
}

/// A name and its synonyms as reported by one source.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Names {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub source: String,
}

/// A named annotation attached to an element or collection.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub source: String,
    /// Transformer that attached the attribute
    pub provided_by: String,
}

/// A single member of a collection.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Element {
    /// Primary identifier, usually a CURIE
    pub id: String,
    pub biolink_class: String,
    /// Identifiers of the element keyed by namespace
    #[serde(default)]
    pub identifiers: HashMap<String, String>,
    #[serde(default)]
    pub names_synonyms: Vec<Names>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub source: String,
}

/// Error-response body emitted by the HTTP layer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ErrorMsg {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

/// Trait for collection storage operations.
#[async_trait::async_trait]
pub trait CollectionStore {
    /// Stores a new collection and returns its descriptor.
    async fn save_collection(
        &self,
        element_class: String,
        source: String,
        elements: Vec<Element>,
    ) -> Result<CollectionInfo, CollectionStoreError>;

    /// Retrieves the descriptor of a stored collection.
    async fn get_collection_info(&self, id: &str) -> Result<CollectionInfo, CollectionStoreError>;

    /// Retrieves the elements of a stored collection.
    async fn get_elements(&self, id: &str) -> Result<Vec<Element>, CollectionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_operation_wire_names() {
        let op: AggregationOperation = serde_json::from_str("\"symmetric difference\"").unwrap();
        assert_eq!(op, AggregationOperation::SymmetricDifference);
        assert_eq!(
            serde_json::to_string(&AggregationOperation::Union).unwrap(),
            "\"union\""
        );
    }

    #[test]
    fn transformer_query_defaults_optional_fields() {
        let query: TransformerQuery =
            serde_json::from_str("{\"name\":\"element list producer\"}").unwrap();
        assert_eq!(query.name, "element list producer");
        assert!(query.collection_id.is_none());
        assert!(query.controls.is_empty());
    }
}
