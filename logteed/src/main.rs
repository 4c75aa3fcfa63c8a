/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use anyhow::Context;
use log::{debug, error, info};

fn main() -> anyhow::Result<()> {
    let proc_args =
        logteed::opts::parse_clap().context("failed to parse command line options")?;

    // set up process logger early, only proc args is used inside
    let _log_guard =
        logteed::log::process::setup(&proc_args).context("failed to setup logger")?;

    match logteed::config::load().context("failed to load config")? {
        Some(config_file) => debug!("loaded config from {}", config_file.display()),
        None => debug!("no config file set, using built-in defaults"),
    }

    if proc_args.test_config {
        info!("the format of the config file is ok");
        return Ok(());
    }

    let ret = tokio_run(&proc_args);
    match ret {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("host terminated unexpectedly: {e:?}");
            Err(e)
        }
    }
}

fn tokio_run(args: &logteed::opts::ProcArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    rt.block_on(logteed::run(args))
}
