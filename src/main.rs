//! `gotmpl`: render a Go text template against JSON or YAML data.
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::{ffi::OsString, io, path::PathBuf, process::ExitCode};

mod config;
mod decode;
mod error;
mod pipeline;
mod render;
mod sink;
mod source;
mod util;

use config::{Config, ConfigArgs, MissingKey};
use error::Error;

const SOURCE_FORMAT: &str = "s:string|f:filepath";

#[derive(Parser)]
#[command(
    name = "gotmpl",
    about = "Render a Go text template against JSON or YAML data",
    disable_version_flag = true,
    after_help = "Examples:\n  gotmpl -t 's:Hello, {{.name}}!' -j 's:{\"name\":\"World\"}'\n  gotmpl -t f:page.tpl -y f:site.yaml -o out/page.html"
)]
struct Cli {
    /// Template info, start with [s:] or [f:]
    #[arg(short, long, value_name = SOURCE_FORMAT)]
    template: Option<String>,

    /// JSON data, start with [s:] or [f:]
    #[arg(short, long, value_name = SOURCE_FORMAT)]
    jsondata: Option<String>,

    /// YAML data, start with [s:] or [f:]
    #[arg(short, long, value_name = SOURCE_FORMAT)]
    yamldata: Option<String>,

    /// Out file path; missing parent directories are created
    #[arg(short, long, value_name = "/path/out.txt")]
    outfile: Option<PathBuf>,

    /// Behaviour when the template references a key the data lacks
    #[arg(long, value_enum, default_value_t = MissingKey::Default)]
    missing_key: MissingKey,

    /// Output debug info
    #[arg(long)]
    verbose: bool,

    /// Output version info
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(status) => return ExitCode::from(status),
    };

    init_logging(cli.verbose);

    if cli.version {
        show_version();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("error: {:#}", anyhow::Error::from(e));
            ExitCode::from(code)
        }
    }
}

/// Parse the command line. Help (also shown when no arguments are given)
/// is printed and yields status 0; usage errors yield status 1.
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        // Help output failing (closed stdout) is not worth reporting.
        let _ = Cli::command().print_help();
        return Err(0);
    }

    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if e.use_stderr() { 1 } else { 0 }
    })
}

fn run(cli: Cli) -> Result<(), Error> {
    let cfg = Config::new(ConfigArgs {
        template: cli.template,
        jsondata: cli.jsondata,
        yamldata: cli.yamldata,
        outfile: cli.outfile,
        missing_key: cli.missing_key,
    })?;

    pipeline::run(&cfg, io::stdout().lock())
}

/// `--verbose` lifts this crate to debug; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let logger = build_logger(verbose);
    let max = logger.filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max);
    }
}

fn build_logger(verbose: bool) -> env_logger::Logger {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .parse_env("RUST_LOG")
        .format_target(false)
        .build()
}

fn show_version() {
    println!("version : {}", env!("CARGO_PKG_VERSION"));
    println!("build   : {}", option_env!("GOTMPL_BUILD").unwrap_or_default());
    println!("author  : {}", env!("CARGO_PKG_AUTHORS"));
}
