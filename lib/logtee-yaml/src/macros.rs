/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

/// Parse an inline yaml string into a single `Yaml` document, for tests.
#[macro_export]
macro_rules! yaml_doc {
    ($s:expr) => {{
        let mut docs = yaml_rust::YamlLoader::load_from_str($s).unwrap();
        assert_eq!(docs.len(), 1);
        docs.pop().unwrap()
    }};
}
