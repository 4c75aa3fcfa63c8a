/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use super::{FileSinkBuilder, RollInterval};

impl FileSinkBuilder {
    /// Parse a file sink config value. A bare string is a path with default
    /// rotation; a map accepts `path`, `rotate` and `retained_file_count`.
    /// Relative paths resolve against `lookup_dir`.
    pub fn parse_yaml(v: &Yaml, lookup_dir: &Path) -> anyhow::Result<Self> {
        match v {
            Yaml::String(_) => {
                let path = logtee_yaml::value::as_path(v, lookup_dir)?;
                Ok(FileSinkBuilder::with_path(path))
            }
            Yaml::Hash(map) => {
                let mut path: Option<PathBuf> = None;
                let mut roll = RollInterval::Day;
                let mut retain: Option<usize> = None;
                logtee_yaml::foreach_kv(map, |k, v| match logtee_yaml::key::normalize(k).as_str() {
                    "path" => {
                        path = Some(
                            logtee_yaml::value::as_path(v, lookup_dir)
                                .context(format!("invalid path value for key {k}"))?,
                        );
                        Ok(())
                    }
                    "rotate" | "roll_interval" => {
                        let s = logtee_yaml::value::as_string(v)
                            .context(format!("invalid string value for key {k}"))?;
                        roll = RollInterval::from_str(&s)
                            .map_err(|_| anyhow!("unsupported roll interval: {s}"))?;
                        Ok(())
                    }
                    "retained_file_count" | "retain" => {
                        let count = logtee_yaml::value::as_usize(v)
                            .context(format!("invalid usize value for key {k}"))?;
                        if count == 0 {
                            return Err(anyhow!(
                                "retained file count should not be 0, omit the key to keep all files"
                            ));
                        }
                        retain = Some(count);
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;

                let path = path.ok_or_else(|| anyhow!("no path set for file sink"))?;
                let mut builder = FileSinkBuilder::with_path(path);
                builder.set_roll_interval(roll);
                builder.set_retained_file_count(retain);
                Ok(builder)
            }
            _ => Err(anyhow!(
                "yaml value type for 'FileSinkBuilder' should be 'string' or 'map'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logtee_yaml::yaml_doc;

    #[test]
    fn string_shorthand() {
        let v = yaml_doc!("logs/log.txt");
        let builder = FileSinkBuilder::parse_yaml(&v, Path::new("/etc/logteed")).unwrap();
        assert_eq!(builder.path(), Path::new("/etc/logteed/logs/log.txt"));
    }

    #[test]
    fn full_map() {
        let v = yaml_doc!(
            "path: /var/log/logteed/foobar.txt\nrotate: hour\nretained-file-count: 366"
        );
        let builder = FileSinkBuilder::parse_yaml(&v, Path::new("/etc/logteed")).unwrap();
        let mut expected = FileSinkBuilder::with_path("/var/log/logteed/foobar.txt");
        expected.set_roll_interval(RollInterval::Hour);
        expected.set_retained_file_count(Some(366));
        assert_eq!(builder, expected);
    }

    #[test]
    fn rejects_bad_values() {
        let dir = Path::new("/etc/logteed");
        assert!(FileSinkBuilder::parse_yaml(&yaml_doc!("rotate: day"), dir).is_err());
        assert!(
            FileSinkBuilder::parse_yaml(&yaml_doc!("path: a.txt\nrotate: weekly"), dir).is_err()
        );
        assert!(
            FileSinkBuilder::parse_yaml(&yaml_doc!("path: a.txt\nretain: 0"), dir).is_err()
        );
        assert!(
            FileSinkBuilder::parse_yaml(&yaml_doc!("path: a.txt\nflush: always"), dir).is_err()
        );
        assert!(FileSinkBuilder::parse_yaml(&Yaml::Integer(1), dir).is_err());
    }
}
