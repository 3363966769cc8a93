use crate::domain::{
    errors::CollectionStoreError,
    models::{CollectionInfo, CollectionStore, Element},
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone)]
struct StoredCollection {
    info: CollectionInfo,
    elements: Vec<Element>,
}

#[derive(Default)]
pub struct InMemoryCollections {
    // collection id -> stored collection
    collections: DashMap<String, StoredCollection>,
    next_id: AtomicU64,
}

#[async_trait::async_trait]
impl CollectionStore for InMemoryCollections {
    async fn save_collection(
        &self,
        element_class: String,
        source: String,
        elements: Vec<Element>,
    ) -> Result<CollectionInfo, CollectionStoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = id.to_string();
        let info = CollectionInfo {
            id: id.clone(),
            size: elements.len(),
            element_class,
            url: Some(format!("/collections/{}", id)),
            source,
            attributes: vec![],
        };
        self.collections.insert(
            id,
            StoredCollection {
                info: info.clone(),
                elements,
            },
        );
        Ok(info)
    }

    async fn get_collection_info(&self, id: &str) -> Result<CollectionInfo, CollectionStoreError> {
        self.collections
            .get(id)
            .map(|v| v.value().info.clone())
            .ok_or(CollectionStoreError::CollectionNotFound(id.to_string()))
    }

    async fn get_elements(&self, id: &str) -> Result<Vec<Element>, CollectionStoreError> {
        self.collections
            .get(id)
            .map(|v| v.value().elements.clone())
            .ok_or(CollectionStoreError::CollectionNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str) -> Element {
        Element {
            id: id.to_string(),
            biolink_class: "NamedThing".to_string(),
            identifiers: Default::default(),
            names_synonyms: vec![],
            attributes: vec![],
            source: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn saves_and_retrieves_collections() {
        let store = InMemoryCollections::default();
        let info = store
            .save_collection(
                "NamedThing".to_string(),
                "test".to_string(),
                vec![element("a"), element("b")],
            )
            .await
            .unwrap();
        assert_eq!(info.size, 2);
        assert_eq!(info.url.as_deref(), Some("/collections/1"));

        let fetched = store.get_collection_info(&info.id).await.unwrap();
        assert_eq!(fetched.element_class, "NamedThing");
        let elements = store.get_elements(&info.id).await.unwrap();
        assert_eq!(elements.len(), 2);
    }

    #[tokio::test]
    async fn generates_unique_ids() {
        let store = InMemoryCollections::default();
        let first = store
            .save_collection("NamedThing".to_string(), "test".to_string(), vec![])
            .await
            .unwrap();
        let second = store
            .save_collection("NamedThing".to_string(), "test".to_string(), vec![])
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn missing_collection_is_an_error() {
        let store = InMemoryCollections::default();
        let err = store.get_elements("42").await.unwrap_err();
        assert!(matches!(err, CollectionStoreError::CollectionNotFound(id) if id == "42"));
    }
}
