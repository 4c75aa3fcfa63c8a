/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use chrono::format::Numeric::*;
use chrono::format::{Item, Pad};

/// Calendar-day rotation bucket, encoded into rotated file names.
pub const DAY: &[Item<'static>] = &[
    Item::Numeric(Year, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Month, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Day, Pad::Zero),
];

/// Calendar-hour rotation bucket, encoded into rotated file names.
pub const HOUR: &[Item<'static>] = &[
    Item::Numeric(Year, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Month, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Day, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Hour, Pad::Zero),
];
