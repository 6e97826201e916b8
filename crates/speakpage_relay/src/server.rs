use std::future::Future;
use std::sync::Arc;

use engine_logging::engine_info;
use tokio::net::TcpListener;

use crate::config::PROXY_PATH;
use crate::routes::{create_router, RelayState};

/// Serve the relay on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: RelayState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    engine_info!(
        "Relay listening on http://{}{}",
        listener.local_addr()?,
        PROXY_PATH
    );
    axum::serve(listener, create_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown)
        .await
}
