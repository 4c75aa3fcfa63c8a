/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::path::Path;

use anyhow::anyhow;
use yaml_rust::{Yaml, YamlLoader};

/// Load a config file holding exactly one yaml document.
pub fn load_doc(path: &Path) -> anyhow::Result<Yaml> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
    let mut docs = YamlLoader::load_from_str(&contents)
        .map_err(|e| anyhow!("invalid yaml file {}: {e}", path.display()))?;
    match docs.len() {
        0 => Err(anyhow!("no yaml doc found in {}", path.display())),
        1 => Ok(docs.pop().unwrap()),
        n => Err(anyhow!(
            "{n} yaml docs found in {}, expected a single doc",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn single_doc() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "logger: ~").unwrap();
        let doc = load_doc(f.path()).unwrap();
        assert!(doc.as_hash().is_some());
    }

    #[test]
    fn multiple_docs_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "a: 1\n---\nb: 2").unwrap();
        assert!(load_doc(f.path()).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(load_doc(Path::new("/nonexistent/logteed.yaml")).is_err());
    }
}
