/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use anyhow::anyhow;
use log::info;
use tokio::sync::watch;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        use tokio::signal::unix::{SignalKind, signal};

        pub(crate) fn setup_and_spawn(quit: watch::Sender<bool>) -> anyhow::Result<()> {
            let kinds = [
                (SignalKind::interrupt(), "SIGINT"),
                (SignalKind::terminate(), "SIGTERM"),
                (SignalKind::quit(), "SIGQUIT"),
            ];
            for (kind, name) in kinds {
                let mut sig = signal(kind)
                    .map_err(|e| anyhow!("failed to create {name} listener: {e}"))?;
                let quit = quit.clone();
                tokio::spawn(async move {
                    if sig.recv().await.is_some() {
                        info!("got quit signal");
                        let _ = quit.send(true);
                    }
                });
            }
            Ok(())
        }
    } else {
        pub(crate) fn setup_and_spawn(quit: watch::Sender<bool>) -> anyhow::Result<()> {
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("got quit signal");
                    let _ = quit.send(true);
                }
            });
            Ok(())
        }
    }
}
