/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use slog::Level;
use yaml_rust::Yaml;

use logtee_filelog::{FileSinkBuilder, RollInterval};
use logtee_route::PropertyMatch;

/// The context property the stock configuration splits on, as pushed by
/// the worker around its greeting.
const DEFAULT_TAG_KEY: &str = "foobar";
const DEFAULT_RETAINED_FILE_COUNT: usize = 366;

#[derive(Clone)]
pub struct LogConfig {
    pub min_level: Level,
    pub source_overrides: Vec<(String, Level)>,
    pub sinks: Vec<SinkConfig>,
}

#[derive(Clone)]
pub struct SinkConfig {
    pub name: String,
    pub min_level: Level,
    pub matcher: PropertyMatch,
    pub file: FileSinkBuilder,
}

impl LogConfig {
    /// The configuration the original deployment shipped with: everything
    /// without the tag into `log.txt`, tagged events into `foobar.txt`,
    /// one file per day, a year of files kept.
    pub fn default_tag_split(log_dir: &Path) -> Self {
        let file_sink = |file_name: &str| {
            let mut builder = FileSinkBuilder::with_path(log_dir.join(file_name));
            builder.set_roll_interval(RollInterval::Day);
            builder.set_retained_file_count(Some(DEFAULT_RETAINED_FILE_COUNT));
            builder
        };
        LogConfig {
            min_level: Level::Info,
            source_overrides: Vec::new(),
            sinks: vec![
                SinkConfig {
                    name: "primary".to_string(),
                    min_level: Level::Info,
                    matcher: PropertyMatch::LacksKey(DEFAULT_TAG_KEY.to_string()),
                    file: file_sink("log.txt"),
                },
                SinkConfig {
                    name: "tagged".to_string(),
                    min_level: Level::Info,
                    matcher: PropertyMatch::HasKey(DEFAULT_TAG_KEY.to_string()),
                    file: file_sink("foobar.txt"),
                },
            ],
        }
    }

    fn parse_yaml(v: &Yaml, conf_dir: &Path) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!("yaml value type for 'logger' should be 'map'"));
        };

        let mut min_level = Level::Info;
        let mut source_overrides = Vec::new();
        let mut sinks = Vec::new();
        logtee_yaml::foreach_kv(map, |k, v| match logtee_yaml::key::normalize(k).as_str() {
            "minimum_level" | "level" => {
                min_level = logtee_yaml::value::as_log_level(v)
                    .context(format!("invalid log level value for key {k}"))?;
                Ok(())
            }
            "source_overrides" | "overrides" => {
                let Yaml::Hash(map) = v else {
                    return Err(anyhow!("yaml value type for key {k} should be 'map'"));
                };
                logtee_yaml::foreach_kv(map, |prefix, v| {
                    let floor = logtee_yaml::value::as_log_level(v)
                        .context(format!("invalid log level value for source {prefix}"))?;
                    source_overrides.push((prefix.to_string(), floor));
                    Ok(())
                })
            }
            "sinks" => {
                let Yaml::Array(seq) = v else {
                    return Err(anyhow!("yaml value type for key {k} should be 'seq'"));
                };
                for (i, item) in seq.iter().enumerate() {
                    let sink = SinkConfig::parse_yaml(item, conf_dir)
                        .context(format!("invalid sink config #{i}"))?;
                    if sinks.iter().any(|s: &SinkConfig| s.name == sink.name) {
                        return Err(anyhow!("duplicate sink name {}", sink.name));
                    }
                    sinks.push(sink);
                }
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        })?;

        if sinks.is_empty() {
            return Err(anyhow!("no sinks set in logger config"));
        }
        Ok(LogConfig {
            min_level,
            source_overrides,
            sinks,
        })
    }
}

impl SinkConfig {
    fn parse_yaml(v: &Yaml, conf_dir: &Path) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!("yaml value type for sink should be 'map'"));
        };

        let name = logtee_yaml::get_required_str(map, "name")?.to_string();
        let mut min_level = Level::Info;
        let mut include_key: Option<String> = None;
        let mut exclude_key: Option<String> = None;
        let mut file: Option<FileSinkBuilder> = None;
        logtee_yaml::foreach_kv(map, |k, v| match logtee_yaml::key::normalize(k).as_str() {
            "name" => Ok(()),
            "minimum_level" | "level" => {
                min_level = logtee_yaml::value::as_log_level(v)
                    .context(format!("invalid log level value for key {k}"))?;
                Ok(())
            }
            "include_key" => {
                include_key = Some(
                    logtee_yaml::value::as_string(v)
                        .context(format!("invalid string value for key {k}"))?,
                );
                Ok(())
            }
            "exclude_key" => {
                exclude_key = Some(
                    logtee_yaml::value::as_string(v)
                        .context(format!("invalid string value for key {k}"))?,
                );
                Ok(())
            }
            "file" => {
                let builder = FileSinkBuilder::parse_yaml(v, conf_dir)
                    .context(format!("invalid file sink value for key {k}"))?;
                file = Some(builder);
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        })?;

        let matcher = match (include_key, exclude_key) {
            (None, None) => PropertyMatch::Any,
            (Some(key), None) => PropertyMatch::HasKey(key),
            (None, Some(key)) => PropertyMatch::LacksKey(key),
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "include_key and exclude_key should not be set together"
                ));
            }
        };
        let file = file.ok_or_else(|| anyhow!("no file set for sink {name}"))?;
        Ok(SinkConfig {
            name,
            min_level,
            matcher,
            file,
        })
    }
}

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();

pub(crate) fn load(v: &Yaml, conf_dir: &Path) -> anyhow::Result<()> {
    let config = LogConfig::parse_yaml(v, conf_dir)?;
    LOG_CONFIG
        .set(config)
        .map_err(|_| anyhow!("logger config has already been set"))
}

/// The loaded logger config, or the stock tag-split config under `./logs`
/// when the config file has no `logger` section.
pub fn get_config() -> LogConfig {
    LOG_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(|| LogConfig::default_tag_split(Path::new("logs")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logtee_yaml::yaml_doc;

    #[test]
    fn parse_tag_split_config() {
        let doc = yaml_doc!(
            r#"
minimum-level: information
source-overrides:
  Framework: warning
sinks:
  - name: primary
    exclude-key: foobar
    file:
      path: /var/log/logteed/log.txt
      retained-file-count: 366
  - name: tagged
    include-key: foobar
    file:
      path: /var/log/logteed/foobar.txt
      retained-file-count: 366
"#
        );
        let config = LogConfig::parse_yaml(&doc, Path::new("/etc/logteed")).unwrap();
        assert_eq!(config.min_level, Level::Info);
        assert_eq!(
            config.source_overrides,
            vec![("Framework".to_string(), Level::Warning)]
        );
        assert_eq!(config.sinks.len(), 2);
        assert_eq!(
            config.sinks[0].matcher,
            PropertyMatch::LacksKey("foobar".to_string())
        );
        assert_eq!(
            config.sinks[1].matcher,
            PropertyMatch::HasKey("foobar".to_string())
        );
    }

    #[test]
    fn sink_without_predicate_accepts_all() {
        let doc = yaml_doc!(
            "sinks:\n  - name: all\n    file: /var/log/logteed/all.txt"
        );
        let config = LogConfig::parse_yaml(&doc, Path::new("/etc/logteed")).unwrap();
        assert_eq!(config.sinks[0].matcher, PropertyMatch::Any);
        assert_eq!(config.sinks[0].min_level, Level::Info);
    }

    #[test]
    fn rejects_conflicting_predicates() {
        let doc = yaml_doc!(
            "sinks:\n  - name: bad\n    include-key: a\n    exclude-key: b\n    file: x.txt"
        );
        assert!(LogConfig::parse_yaml(&doc, Path::new("/etc/logteed")).is_err());
    }

    #[test]
    fn rejects_empty_and_duplicate_sinks() {
        let doc = yaml_doc!("minimum-level: info");
        assert!(LogConfig::parse_yaml(&doc, Path::new("/etc")).is_err());

        let doc = yaml_doc!(
            "sinks:\n  - name: dup\n    file: a.txt\n  - name: dup\n    file: b.txt"
        );
        assert!(LogConfig::parse_yaml(&doc, Path::new("/etc")).is_err());
    }

    #[test]
    fn default_config_matches_original_deployment() {
        let config = LogConfig::default_tag_split(Path::new("logs"));
        assert_eq!(config.min_level, Level::Info);
        assert_eq!(config.sinks.len(), 2);
        assert_eq!(config.sinks[0].name, "primary");
        assert_eq!(config.sinks[0].file.path(), Path::new("logs/log.txt"));
        assert_eq!(config.sinks[1].name, "tagged");
        assert_eq!(config.sinks[1].file.path(), Path::new("logs/foobar.txt"));
    }
}
