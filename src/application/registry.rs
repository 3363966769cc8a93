use super::Transformer;
use crate::domain::models::TransformerInfo;
use std::sync::Arc;

/// Ordered catalog of transformers. Registration order is the order the
/// catalog is listed in.
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    transformers: Vec<Arc<dyn Transformer + Send + Sync>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transformer to the catalog. Registering a second transformer
    /// under an already-known name is ignored; the first registration wins.
    pub fn register(&mut self, transformer: Arc<dyn Transformer + Send + Sync>) {
        let name = transformer.info().name;
        if self.transformers.iter().any(|t| t.info().name == name) {
            tracing::warn!("Transformer already registered: {}", name);
            return;
        }
        self.transformers.push(transformer);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Transformer + Send + Sync>> {
        self.transformers
            .iter()
            .find(|t| t.info().name == name)
            .cloned()
    }

    /// Lists the catalog in registration order.
    pub fn list(&self) -> Vec<TransformerInfo> {
        self.transformers.iter().map(|t| t.info()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::transformers::{ElementAttributeFilter, ElementListProducer};

    fn registry() -> TransformerRegistry {
        let mut registry = TransformerRegistry::new();
        registry.register(Arc::new(ElementListProducer));
        registry.register(Arc::new(ElementAttributeFilter));
        registry
    }

    #[test]
    fn lists_in_registration_order() {
        let names: Vec<String> = registry().list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["element list producer", "element attribute filter"]);
    }

    #[test]
    fn looks_up_by_name() {
        let registry = registry();
        assert!(registry.get("element attribute filter").is_some());
        assert!(registry.get("no such transformer").is_none());
    }

    #[test]
    fn first_registration_wins_on_duplicate_name() {
        let mut registry = registry();
        registry.register(Arc::new(ElementListProducer));
        assert_eq!(registry.list().len(), 2);
    }
}
