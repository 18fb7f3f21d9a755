//! HTTP server
//!
//! Route table, cross-cutting layers and the serve loop.

use std::future::Future;
use std::path::Path;

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};

use crate::handlers::{events, liveness, orders, rsvps};
use crate::middleware::{enforce_guard, log_requests, AuthGuard};
use crate::state::AppState;

/// Build the application router.
///
/// Every route under `/api` declares its guard here; the web client bundle
/// is served for everything else unless running in `dev`.
pub fn create_router(state: AppState) -> Router {
    let guarded =
        |guard: AuthGuard| middleware::from_fn_with_state((state.clone(), guard), enforce_guard);
    let public = || guarded(AuthGuard::None);
    let user = || guarded(AuthGuard::Authenticated);
    let admin = || guarded(AuthGuard::admin(&state));

    let api = Router::new()
        .route("/", get(liveness))
        .route("/events", get(events::list_events).route_layer(public()))
        .route(
            "/events/admin",
            get(events::list_admin_events).route_layer(admin()),
        )
        .route(
            "/events/{user_id}",
            get(events::list_upcoming_for_user).route_layer(user()),
        )
        .route("/event/new", post(events::create_event).route_layer(admin()))
        .route("/event/{id}", get(events::get_event).route_layer(user()))
        .route(
            "/event/{id}",
            put(events::update_event)
                .delete(events::delete_event)
                .route_layer(admin()),
        )
        .route(
            "/event/{id}/rsvps",
            get(events::list_event_rsvps).route_layer(user()),
        )
        .route("/rsvp/new", post(rsvps::create_rsvp).route_layer(user()))
        .route("/rsvp/{id}", put(rsvps::update_rsvp).route_layer(user()))
        .route("/orders", get(orders::list_orders).route_layer(public()))
        .route(
            "/order-validate",
            post(orders::validate_order).route_layer(public()),
        )
        .with_state(state.clone());

    // `nest` matches `/api` but not `/api/`
    let mut router = Router::new()
        .route("/api/", get(liveness))
        .nest("/api", api);

    if state.settings.serves_static_files() {
        if let Some(static_dir) = &state.settings.server.static_dir {
            let static_dir = Path::new(static_dir);
            info!(path = %static_dir.display(), "Serving web client");
            let serve_dir = ServeDir::new(static_dir)
                .fallback(ServeFile::new(static_dir.join("index.html")));
            router = router.fallback_service(serve_dir);
        }
    }

    router
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}

/// Serve the application until `shutdown` resolves
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);

    if let Ok(address) = listener.local_addr() {
        info!(address = %address, "Server listening");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
