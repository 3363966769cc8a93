use super::{control_value, Transformer};
use crate::domain::errors::TransformerError;
use crate::domain::models::{
    Attribute, Element, Names, Parameter, ParameterType, Property, TransformerFunction,
    TransformerInfo,
};
use std::collections::HashMap;

const PRODUCER_NAME: &str = "element list producer";
const FILTER_NAME: &str = "element attribute filter";
const VERSION: &str = "1.0.0";

/// Producer that builds one element per entry of a semicolon-separated
/// `elements` control. Each produced element carries a `query name` attribute
/// naming the entry that produced it.
pub struct ElementListProducer;

impl ElementListProducer {
    fn element(&self, name: &str, biolink_class: &str) -> Element {
        let mut identifiers = HashMap::new();
        identifiers.insert("primary".to_string(), name.to_string());
        Element {
            id: name.to_string(),
            biolink_class: biolink_class.to_string(),
            identifiers,
            names_synonyms: vec![Names {
                name: Some(name.to_string()),
                synonyms: vec![],
                source: PRODUCER_NAME.to_string(),
            }],
            attributes: vec![Attribute {
                name: "query name".to_string(),
                value: name.to_string(),
                source: PRODUCER_NAME.to_string(),
                provided_by: PRODUCER_NAME.to_string(),
            }],
            source: PRODUCER_NAME.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Transformer for ElementListProducer {
    fn info(&self) -> TransformerInfo {
        TransformerInfo {
            name: PRODUCER_NAME.to_string(),
            label: "Element list".to_string(),
            description: "Produces a collection from a semicolon-separated list of identifiers"
                .to_string(),
            version: VERSION.to_string(),
            function: TransformerFunction::Producer,
            parameters: vec![
                Parameter {
                    name: "elements".to_string(),
                    parameter_type: ParameterType::String,
                    required: true,
                    default: None,
                    example: Some("ChEMBL:CHEMBL25; ChEMBL:CHEMBL112".to_string()),
                    allowed_values: vec![],
                },
                Parameter {
                    name: "element_class".to_string(),
                    parameter_type: ParameterType::String,
                    required: false,
                    default: Some("NamedThing".to_string()),
                    example: Some("ChemicalSubstance".to_string()),
                    allowed_values: vec![],
                },
            ],
        }
    }

    async fn transform(
        &self,
        controls: &[Property],
        _input: &[Element],
    ) -> Result<Vec<Element>, TransformerError> {
        let info = self.info();
        let names = control_value(&info, controls, "elements")?;
        let biolink_class = control_value(&info, controls, "element_class")?;
        let mut elements = Vec::new();
        for name in names.split(';') {
            let name = name.trim();
            if name.is_empty() {
                return Err(TransformerError::InvalidControl {
                    control: "elements".to_string(),
                    reason: "empty entry in identifier list".to_string(),
                });
            }
            elements.push(self.element(name, &biolink_class));
        }
        Ok(elements)
    }
}

/// Filter that keeps the input elements carrying an attribute with the given
/// `name` and `value`.
pub struct ElementAttributeFilter;

#[async_trait::async_trait]
impl Transformer for ElementAttributeFilter {
    fn info(&self) -> TransformerInfo {
        TransformerInfo {
            name: FILTER_NAME.to_string(),
            label: "Attribute filter".to_string(),
            description: "Keeps elements of the input collection carrying a matching attribute"
                .to_string(),
            version: VERSION.to_string(),
            function: TransformerFunction::Filter,
            parameters: vec![
                Parameter {
                    name: "name".to_string(),
                    parameter_type: ParameterType::String,
                    required: true,
                    default: None,
                    example: Some("query name".to_string()),
                    allowed_values: vec![],
                },
                Parameter {
                    name: "value".to_string(),
                    parameter_type: ParameterType::String,
                    required: true,
                    default: None,
                    example: Some("aspirin".to_string()),
                    allowed_values: vec![],
                },
            ],
        }
    }

    async fn transform(
        &self,
        controls: &[Property],
        input: &[Element],
    ) -> Result<Vec<Element>, TransformerError> {
        let info = self.info();
        let name = control_value(&info, controls, "name")?;
        let value = control_value(&info, controls, "value")?;
        Ok(input
            .iter()
            .filter(|element| {
                element
                    .attributes
                    .iter()
                    .any(|a| a.name == name && a.value == value)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(pairs: &[(&str, &str)]) -> Vec<Property> {
        pairs.iter().map(|(n, v)| Property::new(*n, *v)).collect()
    }

    #[tokio::test]
    async fn producer_splits_and_trims_entries() {
        let elements = ElementListProducer
            .transform(&controls(&[("elements", "ChEMBL:CHEMBL25; ChEMBL:CHEMBL112")]), &[])
            .await
            .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, "ChEMBL:CHEMBL25");
        assert_eq!(elements[1].id, "ChEMBL:CHEMBL112");
        assert_eq!(elements[0].biolink_class, "NamedThing");
        assert_eq!(elements[0].attributes[0].name, "query name");
        assert_eq!(elements[0].attributes[0].value, "ChEMBL:CHEMBL25");
    }

    #[tokio::test]
    async fn producer_honors_element_class_control() {
        let elements = ElementListProducer
            .transform(
                &controls(&[("elements", "ChEMBL:CHEMBL25"), ("element_class", "ChemicalSubstance")]),
                &[],
            )
            .await
            .unwrap();
        assert_eq!(elements[0].biolink_class, "ChemicalSubstance");
    }

    #[tokio::test]
    async fn producer_rejects_missing_control() {
        let err = ElementListProducer.transform(&[], &[]).await.unwrap_err();
        assert!(matches!(err, TransformerError::MissingControl(name) if name == "elements"));
    }

    #[tokio::test]
    async fn producer_rejects_empty_entry() {
        let err = ElementListProducer
            .transform(&controls(&[("elements", "a;;b")]), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, TransformerError::InvalidControl { control, .. } if control == "elements"));
    }

    #[tokio::test]
    async fn filter_keeps_matching_elements() {
        let input = ElementListProducer
            .transform(&controls(&[("elements", "a; b; c")]), &[])
            .await
            .unwrap();
        let kept = ElementAttributeFilter
            .transform(&controls(&[("name", "query name"), ("value", "b")]), &input)
            .await
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }
}
