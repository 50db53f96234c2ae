use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kdebug")]
#[command(author = "Ignoramuss")]
#[command(about = "Debug sidecar exposing diagnostics, a file store and a Kubernetes proxy", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[arg(short = 'v', long = "version", help = "Show version")]
    pub show_version: bool,

    #[arg(
        long,
        env = "DEBUG",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Debug log level"
    )]
    pub debug: bool,

    #[arg(long, env = "MSG", default_value = "default message", help = "Server message")]
    pub msg: String,

    #[arg(long, env = "ADDR", default_value = ":80", help = "Server serve address")]
    pub addr: String,

    #[arg(long = "data-dir", env = "DATA_DIR", help = "Server data dir [default: OS temp dir]")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = "CONFIG", default_value = "config.json", help = "Server config file")]
    pub config: PathBuf,
}
