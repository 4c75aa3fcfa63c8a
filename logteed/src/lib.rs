/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::Arc;

use ::log::{debug, warn};
use anyhow::Context;
use slog::slog_info;
use tokio::sync::watch;

pub mod config;
pub mod log;
pub mod opts;

mod build;
mod service;
mod signal;
mod worker;

use opts::ProcArgs;
use service::{Greeter, LogGreeter};
use worker::Worker;

pub async fn run(_proc_args: &ProcArgs) -> anyhow::Result<()> {
    let log_config = config::log::get_config();
    let loggers = log::create_loggers(&log_config).context("failed to set up the log router")?;

    slog_info!(
        loggers.host,
        "===================================================================="
    );
    slog_info!(
        loggers.host,
        "application {} starts, version {}",
        build::PKG_NAME,
        build::VERSION
    );

    let greeter: Arc<dyn Greeter> = Arc::new(LogGreeter::new(loggers.greeter.clone()));
    let (quit_sender, quit_receiver) = watch::channel(false);
    let mut worker_handle = Worker::new(loggers.worker.clone(), greeter).spawn(quit_receiver.clone());

    signal::setup_and_spawn(quit_sender).context("failed to setup signal handler")?;

    let mut quit_receiver = quit_receiver;
    while !*quit_receiver.borrow_and_update() {
        if quit_receiver.changed().await.is_err() {
            break;
        }
    }

    let quit_timeout = config::worker::get_config().quit_timeout;
    if tokio::time::timeout(quit_timeout, &mut worker_handle)
        .await
        .is_err()
    {
        warn!("worker did not stop within {quit_timeout:?}, aborting it");
        worker_handle.abort();
    }

    slog_info!(loggers.host, "application {} stops", build::PKG_NAME);
    for (name, snapshot) in logtee_route::registry::snapshot_all() {
        debug!(
            "sink {name}: {} of {} events written, {} bytes, {} write failures",
            snapshot.io.passed, snapshot.io.total, snapshot.io.size, snapshot.drop.write_failed
        );
    }

    // loggers go out of scope here: the router and every sink file are
    // flushed and closed on this path and on the error paths above alike
    Ok(())
}
