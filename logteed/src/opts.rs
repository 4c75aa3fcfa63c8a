/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgAction, Command, ValueHint, value_parser};

const GLOBAL_ARG_VERBOSE: &str = "verbose";
const GLOBAL_ARG_CONFIG_FILE: &str = "config-file";
const GLOBAL_ARG_TEST_CONFIG: &str = "test-config";

#[derive(Debug, Default)]
pub struct ProcArgs {
    pub verbose_level: u8,
    pub test_config: bool,
}

pub fn parse_clap() -> anyhow::Result<ProcArgs> {
    let args = Command::new(crate::build::PKG_NAME)
        .version(crate::build::VERSION)
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("Show verbose output")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .long(GLOBAL_ARG_VERBOSE),
        )
        .arg(
            Arg::new(GLOBAL_ARG_CONFIG_FILE)
                .help("Config file path")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .short('c')
                .long(GLOBAL_ARG_CONFIG_FILE),
        )
        .arg(
            Arg::new(GLOBAL_ARG_TEST_CONFIG)
                .help("Test the format of config file and exit")
                .action(ArgAction::SetTrue)
                .short('t')
                .long(GLOBAL_ARG_TEST_CONFIG),
        )
        .get_matches();

    let mut proc_args = ProcArgs::default();
    if let Some(verbose_level) = args.get_one::<u8>(GLOBAL_ARG_VERBOSE) {
        proc_args.verbose_level = *verbose_level;
    }
    if args.get_flag(GLOBAL_ARG_TEST_CONFIG) {
        proc_args.test_config = true;
    }
    if let Some(config_file) = args.get_one::<PathBuf>(GLOBAL_ARG_CONFIG_FILE) {
        crate::config::validate_and_set_config_file(config_file).context(format!(
            "failed to set config file {}",
            config_file.display()
        ))?;
    }
    Ok(proc_args)
}
