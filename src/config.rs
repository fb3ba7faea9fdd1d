use crate::{
    error::{Error, Result},
    source::TaggedSource,
};
use clap::ValueEnum;
use std::{fmt, path::PathBuf};

/// Serialization format of the data document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Name of the flag that supplies this format.
    pub fn role(self) -> &'static str {
        match self {
            Self::Json => "jsondata",
            Self::Yaml => "yamldata",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// What the engine does when a template references an absent mapping key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingKey {
    /// Print `<no value>`.
    #[default]
    Default,
    /// Abort rendering with an error.
    Error,
}

/// Raw flag values as they come off the command line.
#[derive(Debug, Default)]
pub struct ConfigArgs {
    pub template: Option<String>,
    pub jsondata: Option<String>,
    pub yamldata: Option<String>,
    pub outfile: Option<PathBuf>,
    pub missing_key: MissingKey,
}

/// Validated settings for one invocation.
/// Constructed once at startup; never mutated after that.
#[derive(Clone, Debug)]
pub struct Config {
    pub template: TaggedSource,
    pub data: TaggedSource,
    pub format: DataFormat,
    pub outfile: Option<PathBuf>,
    pub missing_key: MissingKey,
}

impl Config {
    pub fn new(args: ConfigArgs) -> Result<Self> {
        let template = non_empty(args.template)
            .ok_or_else(|| Error::Validation("[--template] parameters must be entered.".into()))?;

        let (format, data) = match (non_empty(args.jsondata), non_empty(args.yamldata)) {
            (Some(json), None) => (DataFormat::Json, json),
            (None, Some(yaml)) => (DataFormat::Yaml, yaml),
            _ => {
                return Err(Error::Validation(
                    "[--jsondata] and [--yamldata] must enter one of them.".into(),
                ));
            }
        };

        Ok(Self {
            template: TaggedSource::parse(&template),
            data: TaggedSource::parse(&data),
            format,
            outfile: args.outfile.filter(|p| !p.as_os_str().is_empty()),
            missing_key: args.missing_key,
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(template: &str, json: &str, yaml: &str) -> ConfigArgs {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        ConfigArgs {
            template: opt(template),
            jsondata: opt(json),
            yamldata: opt(yaml),
            ..Default::default()
        }
    }

    #[test]
    fn json_only_selects_json() {
        let cfg = Config::new(args("s:x", "s:{}", "")).unwrap();
        assert_eq!(cfg.format, DataFormat::Json);
        assert_eq!(cfg.data, TaggedSource::Inline("{}".into()));
        assert!(cfg.outfile.is_none());
    }

    #[test]
    fn yaml_only_selects_yaml() {
        let cfg = Config::new(args("s:x", "", "f:data.yaml")).unwrap();
        assert_eq!(cfg.format, DataFormat::Yaml);
        assert_eq!(cfg.data, TaggedSource::File("data.yaml".into()));
    }

    #[test]
    fn both_data_sources_rejected() {
        let err = Config::new(args("s:x", "s:{}", "s:a: 1")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn no_data_source_rejected() {
        let err = Config::new(args("s:x", "", "")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut a = args("s:x", "s:{}", "");
        a.yamldata = Some(String::new());
        a.outfile = Some(PathBuf::new());
        let cfg = Config::new(a).unwrap();
        assert_eq!(cfg.format, DataFormat::Json);
        assert!(cfg.outfile.is_none());
    }

    #[test]
    fn template_required() {
        let err = Config::new(args("", "s:{}", "")).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("--template")));
    }
}
