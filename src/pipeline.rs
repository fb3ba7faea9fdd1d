//! One render invocation: resolve → decode → open sinks → render → finish.
use crate::{
    config::Config,
    decode,
    error::Result,
    render,
    sink::Sinks,
};
use std::io::Write;

/// Run the whole pipeline for `cfg`, writing rendered bytes to `console`
/// and, when configured, the output file.
///
/// Any failure aborts the remaining steps. Sinks opened so far are released
/// on the way out and a staged output file is discarded.
pub fn run<W: Write>(cfg: &Config, console: W) -> Result<()> {
    let template = cfg.template.resolve("template")?;

    let role = cfg.format.role();
    let text = cfg.data.resolve(role)?;
    let data = decode::decode(cfg.format, &text)?;
    if log::log_enabled!(log::Level::Debug) {
        let shown = serde_json::to_string(&data).unwrap_or_default();
        log::debug!("{:>20} : {shown}", "object content");
    }

    let mut sinks = Sinks::open(cfg.outfile.as_deref(), console)?;
    render::render(&template, &data, cfg.missing_key, &mut sinks)?;
    sinks.finish()?;

    log::debug!("success!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ConfigArgs, MissingKey},
        error::Error,
    };
    use std::{fs, path::PathBuf};

    fn config(template: &str, json: Option<&str>, yaml: Option<&str>) -> Config {
        Config::new(ConfigArgs {
            template: Some(template.to_owned()),
            jsondata: json.map(str::to_owned),
            yamldata: yaml.map(str::to_owned),
            ..Default::default()
        })
        .unwrap()
    }

    fn run_to_string(cfg: &Config) -> Result<String> {
        let mut console = Vec::new();
        run(cfg, &mut console)?;
        Ok(String::from_utf8(console).unwrap())
    }

    #[test]
    fn inline_json_to_stdout() {
        let cfg = config("s:Hello, {{.name}}!", Some(r#"s:{"name":"World"}"#), None);
        assert_eq!(run_to_string(&cfg).unwrap(), "Hello, World!");
    }

    #[test]
    fn inline_yaml_range() {
        let cfg = config("s:{{range .items}}{{.}} {{end}}", None, Some("s:items: [1, 2, 3]"));
        assert_eq!(run_to_string(&cfg).unwrap(), "1 2 3 ");
    }

    #[test]
    fn template_and_data_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let tpl = dir.path().join("greet.tpl");
        let data = dir.path().join("data.yaml");
        fs::write(&tpl, "{{.greeting}}, {{.who}}\n").unwrap();
        fs::write(&data, "greeting: Hi\nwho: there\n").unwrap();

        let cfg = config(
            &format!("f:{}", tpl.display()),
            None,
            Some(format!("f:{}", data.display()).as_str()),
        );
        assert_eq!(run_to_string(&cfg).unwrap(), "Hi, there\n");
    }

    #[test]
    fn strict_missing_key_fails_without_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out/result.txt");
        let mut cfg = config("s:{{.absent}}", Some(r#"s:{"name":"x"}"#), None);
        cfg.outfile = Some(out.clone());
        cfg.missing_key = MissingKey::Error;

        let err = run(&cfg, std::io::sink()).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn outfile_parent_dirs_created_and_match_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deep/er/out.txt");
        let mut cfg = config("s:Hello, {{.name}}!", Some(r#"s:{"name":"World"}"#), None);
        cfg.outfile = Some(out.clone());

        let stdout = run_to_string(&cfg).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), stdout);
        assert_eq!(stdout, "Hello, World!");
    }

    #[test]
    fn read_error_happens_before_sinks_open() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never/out.txt");
        let missing: PathBuf = dir.path().join("missing.json");
        let mut cfg = config("s:x", Some(format!("f:{}", missing.display()).as_str()), None);
        cfg.outfile = Some(out.clone());

        let err = run(&cfg, std::io::sink()).unwrap_err();
        assert!(matches!(err, Error::Read { role: "jsondata", .. }));
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn decode_error_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let mut cfg = config("s:x", Some("s:{not json"), None);
        cfg.outfile = Some(out.clone());

        let err = run(&cfg, std::io::sink()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn unrecognized_template_kind_renders_nothing() {
        let cfg = config("x:{{.name}}", Some(r#"s:{"name":"World"}"#), None);
        assert_eq!(run_to_string(&cfg).unwrap(), "");
    }

    #[test]
    fn conflicting_data_sources_touch_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("new/out.txt");
        let err = Config::new(ConfigArgs {
            template: Some("s:x".into()),
            jsondata: Some("s:{}".into()),
            yamldata: Some("s:a: 1".into()),
            outfile: Some(out),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(!dir.path().join("new").exists());
    }
}
