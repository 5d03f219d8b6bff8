use anyhow::{Context, Result};
use cli::Cli;
use config::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use template2pdf::{PrintOptions, Template, Template2Pdf};

mod cli;
mod config;
mod data;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Configuration::load(cli.config.as_deref())?;

    let mut browser = config.browser.clone();
    if let Some(chrome) = &cli.chrome {
        browser.path = Some(chrome.clone());
    }
    if cli.no_sandbox {
        browser.sandbox = false;
    }
    let printer = browser.printer()?;

    // config file options first, then anything given on the command line
    let mut options = config.print.clone();
    if cli.landscape {
        options.set("landscape", true);
    }
    let options = options.merge(&cli.options.iter().cloned().collect::<PrintOptions>());

    let data = data::load_data(&cli.data)?;

    let template = Template::load(&cli.template, config.autoescape)
        .with_context(|| format!("Failed to load template {}", cli.template.display()))?;
    let mut converter = Template2Pdf::from_template(template, printer);
    if let Some(dir) = &config.scratch_dir {
        converter = converter.scratch_dir(dir.clone());
    }

    converter
        .render(&data)
        .with_context(|| format!("Failed to render {}", cli.template.display()))?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("can parse progress style"),
    );
    progress.set_message("Printing PDF...");
    progress.enable_steady_tick(Duration::from_millis(100));

    let result = converter.write_pdf(cli.output.as_deref(), &options);
    progress.finish_and_clear();
    let encoded = result.with_context(|| "Failed to print PDF")?;

    match (encoded, &cli.output) {
        (Some(encoded), _) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{encoded}").with_context(|| "Failed to write PDF to stdout")?;
        }
        (None, Some(output)) => {
            eprintln!("  PDF: {}", output.display());
        }
        (None, None) => {}
    }

    Ok(())
}
