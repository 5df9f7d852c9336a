use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use sysinfo::System;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

/// Filter used when `RUST_LOG` is unset
fn default_filter(level: &str) -> String {
    format!("{level},hyper=warn,tower_http=info")
}

/// Install the global subscriber: JSON lines by default, human-readable
/// output when `server.log_json` is off.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&server.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if server.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Host load reported by `/health`, both in percent
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SystemLoad {
    pub cpu_load: f64,
    pub ram_load: f64,
}

/// Samples host CPU and memory usage.
///
/// CPU usage is measured between consecutive samples, so the monitor keeps
/// its `System` across requests instead of blocking for a fresh interval.
pub struct SystemMonitor {
    system: Mutex<System>,
}

impl SystemMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self {
            system: Mutex::new(system),
        }
    }

    pub fn sample(&self) -> SystemLoad {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_cpu_usage();
        system.refresh_memory();

        let total = system.total_memory();
        let ram_load = if total == 0 {
            0.0
        } else {
            system.used_memory() as f64 / total as f64 * 100.0
        };

        SystemLoad {
            cpu_load: percent(f64::from(system.global_cpu_usage())),
            ram_load: percent(ram_load),
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps NaN out of the JSON body
fn percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
        "ctrl_c"
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
        "sigterm"
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! { s = ctrl_c => s, s = terminate => s };
    info!(signal = received, "shutdown signal received, draining requests");
}
