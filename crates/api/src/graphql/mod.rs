//! GraphQL surface.
//!
//! `POST /graphql` executes queries, `GET /graphql` serves GraphiQL. The
//! schema holds the shared [`OrderService`]; every request additionally gets
//! its own [`ShippingLoader`] as request data, so shipping lookups made
//! while resolving one document share batches and nothing leaks between
//! requests.

mod mutation;
mod query;
pub mod types;

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::services::{OrderService, ServiceError};
use crate::state::AppState;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type OrderSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over an order service.
#[must_use]
pub fn build_schema(orders: Arc<dyn OrderService>) -> OrderSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(orders)
        .finish()
}

/// Execute a GraphQL request with a fresh shipping loader.
pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let loader = state.orders().shipping_loader();
    state
        .schema()
        .execute(req.into_inner().data(loader))
        .await
        .into()
}

/// Serve the GraphiQL IDE.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

fn order_service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<dyn OrderService>> {
    ctx.data::<Arc<dyn OrderService>>()
}

/// Convert a service error into a client-facing GraphQL error.
///
/// Server-side failures are logged and captured to Sentry; the client only
/// sees the generic message and an error code.
fn service_error(err: ServiceError) -> async_graphql::Error {
    let code = if err.is_client_error() {
        "BAD_USER_INPUT"
    } else {
        let event_id = sentry::capture_error(&err);
        tracing::error!(
            error = %err,
            sentry_event_id = %event_id,
            "GraphQL resolver error"
        );
        "INTERNAL_SERVER_ERROR"
    };

    async_graphql::Error::new(err.public_message()).extend_with(|_, ext| ext.set("code", code))
}

#[cfg(test)]
mod tests {
    use ordergraph_core::ValidationError;

    use super::*;
    use crate::db::RepositoryError;

    #[test]
    fn test_service_error_messages() {
        let err = service_error(ValidationError::InvalidPageSize(0).into());
        assert_eq!(err.message, "first must be a positive integer (got 0)");

        let err = service_error(ServiceError::Pagination(RepositoryError::Database(
            sqlx::Error::Protocol("secret detail".to_string()),
        )));
        assert_eq!(err.message, "Failed to fetch orders with pagination");
    }

    #[test]
    fn test_schema_sdl_naming() {
        let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish();
        let sdl = schema.sdl();

        for expected in [
            "type RootQueryType",
            "ordersPaginated(",
            "customer_id: Int!",
            "first: Int! = 10",
            "minPrice: Float",
            "sortOrder: String",
            "shipping_details: ShippingDetails",
            "tracking_number: String",
            "pageInfo: PageInfo!",
            "endCursor: String",
            "hasNextPage: Boolean!",
        ] {
            assert!(sdl.contains(expected), "missing `{expected}` in SDL");
        }
    }
}
