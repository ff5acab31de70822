//! Process lifecycle: bring the globe up, tear it down cleanly.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::GlobeConfig;
use crate::error::StartupError;
use crate::frame_scheduler::{FrameScheduler, RenderStats};
use crate::http::{self, AppState};
use crate::output::{OutputDriver, OutputWorker};
use crate::renderer::Renderer;
use crate::state::StateStore;

/// A running globe: render engine plus HTTP control surface
pub struct Globe {
    local_addr: SocketAddr,
    store: StateStore,
    stats: Arc<RenderStats>,
    cancel: CancellationToken,
    server: JoinHandle<std::io::Result<()>>,
    engine: JoinHandle<()>,
}

impl Globe {
    /// Validate `config`, take ownership of `driver` and start serving
    pub async fn start<O: OutputDriver>(config: &GlobeConfig, driver: O) -> Result<Self, StartupError> {
        config.validate()?;
        let renderer_config = config.renderer_config()?;
        let store = StateStore::new(config.initial_state()?);

        let listener = TcpListener::bind(&config.http.bind)
            .await
            .map_err(|source| StartupError::Bind {
                addr: config.http.bind.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
            addr: config.http.bind.clone(),
            source,
        })?;

        let output = OutputWorker::spawn(driver, renderer_config.led_count)?;
        let scheduler = FrameScheduler::with_frame_duration(
            Renderer::new(&renderer_config),
            store.clone(),
            output,
            config.render.frame_duration(),
        )
        .with_driver_timeout(config.render.driver_timeout());
        let stats = scheduler.stats();

        let cancel = CancellationToken::new();
        let engine = tokio::spawn(scheduler.run(cancel.child_token()));

        let app = http::router(AppState::new(store.clone(), Arc::clone(&stats)));
        let server_cancel = cancel.child_token();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_cancel.cancelled().await })
                .await
        });

        info!(%local_addr, "globe listening");
        Ok(Self {
            local_addr,
            store,
            stats,
            cancel,
            server,
            engine,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn stats(&self) -> Arc<RenderStats> {
        Arc::clone(&self.stats)
    }

    /// Stop HTTP, stop the render loop, then blank and release the driver
    pub async fn shutdown(self) {
        info!("shutting down");
        self.cancel.cancel();

        match self.server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "HTTP server failed"),
            Err(e) => error!(error = %e, "HTTP server task failed"),
        }
        if let Err(e) = self.engine.await {
            error!(error = %e, "render engine task failed");
        }

        info!("shutdown complete");
    }
}
