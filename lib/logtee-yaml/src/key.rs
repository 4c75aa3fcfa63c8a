/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t() {
        assert_eq!(normalize("RetainedFileCount"), "retainedfilecount");
        assert_eq!(normalize("minimum-level"), "minimum_level");
        assert_eq!(normalize("Source-Overrides"), "source_overrides");
    }
}
