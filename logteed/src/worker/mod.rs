/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::Arc;

use slog::{Logger, slog_info};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use logtee_types::log::context;

use crate::service::Greeter;

/// The tag property the worker attaches to everything it emits while
/// greeting. The stock sink pair splits on exactly this key.
const TAG_KEY: &str = "foobar";

pub(crate) struct Worker {
    logger: Logger,
    greeter: Arc<dyn Greeter>,
}

impl Worker {
    pub(crate) fn new(logger: Logger, greeter: Arc<dyn Greeter>) -> Self {
        Worker { logger, greeter }
    }

    pub(crate) fn spawn(self, mut quit: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.greet_once();

            while !*quit.borrow_and_update() {
                if quit.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    fn greet_once(&self) {
        // scope guard must not live across an await
        let _scope = context::push(TAG_KEY, 1i64);
        slog_info!(self.logger, "foo");
        self.greeter.greet();
    }
}
