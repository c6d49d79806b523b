//! # Example: service
//!
//! A small service wired through the runtime:
//! - a preload hook validating configuration,
//! - a heartbeat activity that runs until cancelled,
//! - a flaky activity that fails once and a buggy one that panics,
//! - a teardown hook,
//! - [`Runtime::run`] as the top-level loop (Ctrl-C, or stops by itself after 2s).
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example service
//! ```

use std::time::Duration;

use runvisor::{ActivityFn, Env, Identity, Launch, Runtime, Scene, TaskError};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct ServiceConfig {
    heartbeat: Duration,
    lifetime: Duration,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rt = Runtime::<ServiceConfig>::builder()
        .preload(|env| async move {
            if env.config().heartbeat.is_zero() {
                return Err(TaskError::fail("heartbeat interval must be positive"));
            }
            info!(parent: env.span(), "configuration validated");
            Ok(())
        })
        .co([
            Some(ActivityFn::arc(
                "heartbeat",
                |ctx: CancellationToken, env: Env<ServiceConfig>| async move {
                    let mut beats = 0u64;
                    loop {
                        tokio::select! {
                            _ = ctx.cancelled() => break,
                            _ = tokio::time::sleep(env.config().heartbeat) => {
                                beats += 1;
                                info!(parent: env.span(), beats, "heartbeat");
                            }
                        }
                    }
                    Err(TaskError::Canceled)
                },
            )),
            Some(ActivityFn::arc("flaky", |_ctx, _env: Env<ServiceConfig>| async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Err(TaskError::fail("upstream refused connection"))
            })),
            Some(ActivityFn::arc("buggy", |_ctx, _env: Env<ServiceConfig>| async {
                let shards: Vec<u32> = Vec::new();
                info!(first = shards[0], "first shard");
                Ok(())
            })),
            None,
        ])
        .defer(|span| span.in_scope(|| info!("flushing buffers")))
        .defer(|span| span.in_scope(|| info!("closing connections")))
        .build();

    let cfg = ServiceConfig {
        heartbeat: Duration::from_millis(250),
        lifetime: Duration::from_secs(2),
    };
    let token = CancellationToken::new();
    {
        let token = token.clone();
        let lifetime = cfg.lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            token.cancel();
        });
    }

    let launch = Launch::new(token, cfg)
        .with_identity(Identity::new("demo-1", "demo-service", env!("CARGO_PKG_VERSION")))
        .with_build("local", "unknown")
        .with_scene(Scene::Dev);

    rt.run(launch).await?;
    info!(uptime = ?rt.uptime(), "service stopped");
    Ok(())
}
