/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

mod fs;
mod primary;

pub use fs::as_path;
pub use primary::{as_bool, as_string, as_u64, as_usize};

#[cfg(feature = "log")]
mod level;
#[cfg(feature = "log")]
pub use level::as_log_level;
