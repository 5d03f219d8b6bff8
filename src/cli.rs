use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// The template to render
    pub template: PathBuf,
    /// JSON (or .toml) file holding the template's variables
    pub data: PathBuf,
    /// Where to write the PDF. When omitted, the PDF is written to stdout as base64
    pub output: Option<PathBuf>,
    /// Configuration file (defaults to ./template2pdf.toml if it exists)
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Print in landscape orientation
    #[clap(long)]
    pub landscape: bool,
    /// Print option override, e.g. `scale=0.8` or `pageRanges=1-2`
    #[clap(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = template2pdf::parse_option)]
    pub options: Vec<(String, Value)>,
    /// Chrome / Chromium binary to print with
    #[clap(long, env = "CHROME")]
    pub chrome: Option<PathBuf>,
    /// Run the browser without its sandbox (needed as root in most containers)
    #[clap(long)]
    pub no_sandbox: bool,
    /// Increase log output (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
