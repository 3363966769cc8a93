use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::registry::TransformerRegistry;
use super::transformers::{ElementAttributeFilter, ElementListProducer};
use crate::domain::errors::{AggregationError, TransformerError};
use crate::domain::models::{
    AggregationOperation, AggregationQuery, CollectionInfo, CollectionStore, Element,
    TransformerFunction, TransformerInfo, TransformerQuery,
};
use crate::infrastructure::memory::InMemoryCollections;
use typed_builder::TypedBuilder;

/// The API contract a routing layer dispatches requests to. Each operation is
/// stateless per call and independently invocable; no ordering is required
/// between them.
#[async_trait::async_trait]
pub trait TransformersApi {
    /// Combines existing collections with a set operation into a new one.
    async fn aggregate(&self, query: AggregationQuery)
        -> Result<CollectionInfo, AggregationError>;

    /// Invokes a named transformer and stores its output as a new collection.
    async fn transform(&self, query: TransformerQuery)
        -> Result<CollectionInfo, TransformerError>;

    /// Lists the available transformers in catalog order.
    async fn transformers(&self) -> Result<Vec<TransformerInfo>, TransformerError>;
}

/// Builds the catalog of built-in transformers.
pub fn default_registry() -> TransformerRegistry {
    let mut registry = TransformerRegistry::new();
    registry.register(Arc::new(ElementListProducer));
    registry.register(Arc::new(ElementAttributeFilter));
    registry
}

#[derive(Clone, TypedBuilder)]
pub struct App<S> {
    store: Arc<S>,
    registry: TransformerRegistry,
}

impl App<InMemoryCollections> {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryCollections::default()),
            registry: default_registry(),
        }
    }
}

impl Default for App<InMemoryCollections> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<S> TransformersApi for App<S>
where
    S: CollectionStore + Send + Sync + 'static,
{
    async fn aggregate(
        &self,
        query: AggregationQuery,
    ) -> Result<CollectionInfo, AggregationError> {
        tracing::info!(
            "Aggregating {} collections with operation {}",
            query.collection_ids.len(),
            query.operation.as_str()
        );
        if query.collection_ids.is_empty() {
            return Err(AggregationError::EmptyCollectionList);
        }
        let mut collections = Vec::with_capacity(query.collection_ids.len());
        for id in &query.collection_ids {
            collections.push(self.store.get_elements(id).await?);
        }
        let element_class = self
            .store
            .get_collection_info(&query.collection_ids[0])
            .await?
            .element_class;
        let elements = apply_operation(query.operation, &collections);
        let info = self
            .store
            .save_collection(element_class, query.operation.as_str().to_string(), elements)
            .await?;
        Ok(info)
    }

    async fn transform(
        &self,
        query: TransformerQuery,
    ) -> Result<CollectionInfo, TransformerError> {
        tracing::info!("Running transformer {}", query.name);
        let transformer = self
            .registry
            .get(&query.name)
            .ok_or_else(|| TransformerError::UnknownTransformer(query.name.clone()))?;
        let info = transformer.info();
        // Producers build collections from controls alone
        let input = match info.function {
            TransformerFunction::Producer => Vec::new(),
            _ => {
                let collection_id = query
                    .collection_id
                    .as_deref()
                    .ok_or_else(|| TransformerError::MissingInputCollection(info.name.clone()))?;
                self.store.get_elements(collection_id).await?
            }
        };
        let elements = transformer.transform(&query.controls, &input).await?;
        let element_class = elements
            .first()
            .map(|e| e.biolink_class.clone())
            .unwrap_or_else(|| "NamedThing".to_string());
        let info = self
            .store
            .save_collection(element_class, info.name, elements)
            .await?;
        Ok(info)
    }

    async fn transformers(&self) -> Result<Vec<TransformerInfo>, TransformerError> {
        tracing::info!("Listing transformer catalog");
        Ok(self.registry.list())
    }
}

fn id_set(collection: &[Element]) -> HashSet<&str> {
    collection.iter().map(|e| e.id.as_str()).collect()
}

/// Applies a set operation over element ids, keeping the first occurrence of
/// each surviving id in first-seen order.
fn apply_operation(
    operation: AggregationOperation,
    collections: &[Vec<Element>],
) -> Vec<Element> {
    let mut seen: HashSet<&str> = HashSet::new();
    match operation {
        AggregationOperation::Union => collections
            .iter()
            .flatten()
            .filter(|e| seen.insert(e.id.as_str()))
            .cloned()
            .collect(),
        AggregationOperation::Intersection => {
            let (first, rest) = collections
                .split_first()
                .expect("collection list checked non-empty");
            let rest_sets: Vec<HashSet<&str>> = rest.iter().map(|c| id_set(c)).collect();
            first
                .iter()
                .filter(|e| rest_sets.iter().all(|s| s.contains(e.id.as_str())))
                .filter(|e| seen.insert(e.id.as_str()))
                .cloned()
                .collect()
        }
        AggregationOperation::Difference => {
            let (first, rest) = collections
                .split_first()
                .expect("collection list checked non-empty");
            let rest_sets: Vec<HashSet<&str>> = rest.iter().map(|c| id_set(c)).collect();
            first
                .iter()
                .filter(|e| rest_sets.iter().all(|s| !s.contains(e.id.as_str())))
                .filter(|e| seen.insert(e.id.as_str()))
                .cloned()
                .collect()
        }
        AggregationOperation::SymmetricDifference => {
            // Membership count per collection, not per occurrence
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for collection in collections {
                for id in id_set(collection) {
                    *counts.entry(id).or_default() += 1;
                }
            }
            collections
                .iter()
                .flatten()
                .filter(|e| counts.get(e.id.as_str()).is_some_and(|c| c % 2 == 1))
                .filter(|e| seen.insert(e.id.as_str()))
                .cloned()
                .collect()
        }
    }
}
