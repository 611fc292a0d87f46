//! rlpager - Paginating Log Viewer
//!
//! Indexes one file, or every matching file under a directory, and lets the user
//! jump between pages interactively.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rlpager::config::DEFAULT_PAGE_SIZE;
use rlpager::discovery::{discover, expand_home};
use rlpager::{Application, FilterSpec, PagerConfig, TextType};

fn cli() -> Command {
    Command::new("rlpager")
        .version(rlpager::VERSION)
        .about("Paginate and filter log files of any size")
        .long_about(
            "rlpager indexes the page offsets of log files in a single streaming pass and \
             jumps straight to any page. Filters restrict navigation to pages with matches. \
             A directory path indexes every file with the given extension concurrently.",
        )
        .arg(
            Arg::new("path")
                .long("path")
                .help("File or directory path")
                .required(true),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .help("File extension to look for when path is a directory"),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .help("Number of lines per page [default: 100]")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Page number to start at")
                .default_value("1")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .help("Text type to parse [default: plain]")
                .value_parser(TextType::ACCEPTED),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .help("Text to filter pages by"),
        )
        .arg(
            Arg::new("with-regex")
                .long("with-regex")
                .help("Treat the filter as a regular expression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable color output")
                .action(ArgAction::SetTrue),
        )
}

/// Values from the command line, falling back to the configuration file when enabled.
fn build_config(matches: &ArgMatches) -> Result<PagerConfig> {
    #[cfg(feature = "config")]
    let defaults = rlpager::config::FileDefaults::load()?;

    let lines = matches.get_one::<u64>("lines").copied();
    #[cfg(feature = "config")]
    let lines = lines.or(defaults.lines.map(|l| l as u64));
    let page_size = lines.unwrap_or(DEFAULT_PAGE_SIZE as u64) as usize;

    let text = matches.get_one::<String>("text").cloned();
    #[cfg(feature = "config")]
    let text = text.or(defaults.text.clone());
    let text_type = match text {
        Some(text) => text.parse::<TextType>()?,
        None => TextType::Plain,
    };

    #[allow(unused_mut)]
    let mut no_color = matches.get_flag("no-color");
    #[cfg(feature = "config")]
    {
        no_color = no_color || defaults.no_color.unwrap_or(false);
    }

    let filter = FilterSpec::new(
        matches
            .get_one::<String>("filter")
            .cloned()
            .unwrap_or_default(),
        matches.get_flag("with-regex"),
    )?;

    let config = PagerConfig::default()
        .with_page_size(page_size)
        .with_initial_page(*matches.get_one::<u64>("page").unwrap_or(&1) as usize)
        .with_text_type(text_type)
        .with_filter(filter)
        .with_no_color(no_color);
    config.validate()?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG)
    env_logger::init();

    let matches = cli().get_matches();
    let config = build_config(&matches)?;

    let raw_path = matches
        .get_one::<String>("path")
        .context("path argument is required")?;
    if raw_path.trim().is_empty() {
        anyhow::bail!("File path is required");
    }
    let path = expand_home(raw_path);

    let discovered = discover(&path, matches.get_one::<String>("ext").map(String::as_str))?;

    let app = Application::new(config)?;
    app.run(discovered).await?;

    Ok(())
}
