//! Axum server setup and router construction.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::catalog;

/// Build the full axum router.
///
/// - `/api/ai-providers`, `/api/generate-email`: generation
/// - `/api/clients`, `/api/products`, `/api/copywriters`: catalog CRUD
pub fn build_router(state: AppState) -> Router {
    // The form may be served from a different origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let generation = Router::new()
        .route("/api/ai-providers", get(api::list_providers))
        .route("/api/generate-email", post(api::generate_email));

    let clients = Router::new()
        .route(
            "/api/clients",
            get(catalog::list_clients).post(catalog::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(catalog::get_client)
                .put(catalog::update_client)
                .delete(catalog::delete_client),
        )
        .route("/api/clients/{id}/products", get(catalog::client_products));

    let products = Router::new()
        .route(
            "/api/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/api/products/{id}",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::delete_product),
        );

    let copywriters = Router::new()
        .route(
            "/api/copywriters",
            get(catalog::list_copywriters).post(catalog::create_copywriter),
        )
        .route("/api/copywriters/active", get(catalog::active_copywriters))
        .route(
            "/api/copywriters/{id}",
            get(catalog::get_copywriter)
                .put(catalog::update_copywriter)
                .delete(catalog::delete_copywriter),
        );

    Router::new()
        .merge(generation)
        .merge(clients)
        .merge(products)
        .merge(copywriters)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind `bind_addr`, spawn the server in the background and return the
/// bound address (useful with port 0).
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "HTTP server stopped");
        }
    });

    info!("Listening on http://{addr}");
    Ok(addr)
}

/// Serve in the foreground until Ctrl-C.
pub async fn serve(router: Router, bind_addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}
