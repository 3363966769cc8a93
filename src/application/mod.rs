use crate::domain::errors::TransformerError;
use crate::domain::models::{Element, Property, TransformerInfo};

pub mod app;
pub mod registry;
pub mod transformers;

/// The `Transformer` trait defines a single entry of the transformer catalog.
///
/// Implementors of this trait describe themselves through [`TransformerInfo`]
/// and turn a set of control properties, plus the elements of an optional
/// input collection, into the elements of a new collection. Producers receive
/// an empty input slice; filters and transformers receive the elements of the
/// collection named in the query.
///
/// # Examples
///
/// ```ignore
/// use crate::application::Transformer;
/// use crate::domain::errors::TransformerError;
/// use crate::domain::models::{Element, Property, TransformerInfo};
///
/// struct MyProducer;
///
/// #[async_trait]
/// impl Transformer for MyProducer {
///     fn info(&self) -> TransformerInfo {
///         // Describe the transformer here
///         unimplemented!()
///     }
///
///     async fn transform(
///         &self,
///         controls: &[Property],
///         input: &[Element],
///     ) -> Result<Vec<Element>, TransformerError> {
///         // Implement transformation logic here
///         Ok(vec![])
///     }
/// }
/// ```
///
/// # Errors
///
/// The `transform` method returns a `Result` where the `Err` variant is a
/// `TransformerError`. This allows for proper error handling and propagation
/// throughout the application.
#[async_trait::async_trait]
pub trait Transformer {
    /// Descriptive record advertised through the catalog.
    fn info(&self) -> TransformerInfo;

    /// Produces the elements of a new collection from the given controls and
    /// input elements.
    async fn transform(
        &self,
        controls: &[Property],
        input: &[Element],
    ) -> Result<Vec<Element>, TransformerError>;
}

/// Looks up the value of a named control, falling back to the declared
/// default of the matching parameter in `info`.
pub(crate) fn control_value(
    info: &TransformerInfo,
    controls: &[Property],
    name: &str,
) -> Result<String, TransformerError> {
    if let Some(property) = controls.iter().find(|p| p.name == name) {
        return Ok(property.value.clone());
    }
    let parameter = info.parameters.iter().find(|p| p.name == name);
    if let Some(default) = parameter.and_then(|p| p.default.clone()) {
        return Ok(default);
    }
    Err(TransformerError::MissingControl(name.to_string()))
}
