use crate::config::run_async_watcher;
use crate::events::AppEvent;
use crate::sys::server::run_server;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Serves the control socket and watches the config file off the GTK thread. Everything
/// they produce reaches the wheel through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("colorwheel-io".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                tokio::join!(run_server(tx.clone()), run_async_watcher(tx));
            });
            log::warn!("Background services stopped");
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
