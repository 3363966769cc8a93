use crate::{
    application::app::TransformersApi,
    domain::{
        errors::{AggregationError, CollectionStoreError, TransformerError},
        models::{AggregationQuery, CollectionInfo, ErrorMsg, TransformerInfo, TransformerQuery},
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

pub async fn start_server(
    shutdown: broadcast::Sender<()>,
    app: Arc<impl TransformersApi + Send + Sync + 'static>,
    port: u16,
) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/aggregate", post(aggregate))
        .route("/transform", post(transform))
        .route("/transformers", get(transformers))
        .with_state(app)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    let server = axum::serve(listener, app);

    tracing::info!("API server started on port {}", port);

    let mut shutdown_rx = shutdown.subscribe();

    tokio::select! {
        _ = shutdown_rx.recv() => {
            tracing::warn!("API server received shutdown signal");
        }
        _ = server => {
            tracing::warn!("API server stopped unexpectedly");
        }
    }

    Ok(())
}

type ErrorResponse = (StatusCode, Json<ErrorMsg>);

fn error_response(status: StatusCode, detail: String) -> ErrorResponse {
    let body = ErrorMsg {
        status: status.as_u16(),
        title: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        detail,
    };
    (status, Json(body))
}

fn transformer_error(err: TransformerError) -> ErrorResponse {
    let status = match &err {
        TransformerError::UnknownTransformer(_) => StatusCode::NOT_FOUND,
        TransformerError::MissingControl(_)
        | TransformerError::InvalidControl { .. }
        | TransformerError::MissingInputCollection(_) => StatusCode::BAD_REQUEST,
        TransformerError::FailedCollectionStore(CollectionStoreError::CollectionNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        TransformerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

fn aggregation_error(err: AggregationError) -> ErrorResponse {
    let status = match &err {
        AggregationError::EmptyCollectionList => StatusCode::BAD_REQUEST,
        AggregationError::FailedCollectionStore(CollectionStoreError::CollectionNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
    };
    error_response(status, err.to_string())
}

async fn aggregate(
    State(app_state): State<Arc<impl TransformersApi>>,
    Json(query): Json<AggregationQuery>,
) -> Result<Json<CollectionInfo>, ErrorResponse> {
    app_state
        .aggregate(query)
        .await
        .map(Json)
        .map_err(aggregation_error)
}

async fn transform(
    State(app_state): State<Arc<impl TransformersApi>>,
    Json(query): Json<TransformerQuery>,
) -> Result<Json<CollectionInfo>, ErrorResponse> {
    app_state
        .transform(query)
        .await
        .map(Json)
        .map_err(transformer_error)
}

async fn transformers(
    State(app_state): State<Arc<impl TransformersApi>>,
) -> Result<Json<Vec<TransformerInfo>>, ErrorResponse> {
    app_state
        .transformers()
        .await
        .map(Json)
        .map_err(transformer_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformer_errors_map_to_statuses() {
        let (status, body) =
            transformer_error(TransformerError::UnknownTransformer("x".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.status, 404);
        assert_eq!(body.0.detail, "Unknown transformer: x");

        let (status, _) = transformer_error(TransformerError::MissingControl("c".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = transformer_error(TransformerError::Internal(anyhow::anyhow!("boom")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn aggregation_errors_map_to_statuses() {
        let (status, _) = aggregation_error(AggregationError::EmptyCollectionList);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = aggregation_error(AggregationError::FailedCollectionStore(
            CollectionStoreError::CollectionNotFound("1".to_string()),
        ));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
