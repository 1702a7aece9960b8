use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marksite::{normalize_basepath, SiteGenerator, SiteOptions};

#[derive(Parser)]
#[command(name = "marksite")]
#[command(about = "Generate a static site from Markdown")]
#[command(version)]
struct Cli {
    /// Base path for deployment
    #[arg(default_value = "/")]
    basepath: String,

    /// Print debugging information
    #[arg(short, long)]
    debug: bool,

    /// Directory holding the Markdown pages (defaults to `content`)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets (defaults to `static`)
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Output directory, deleted and recreated (defaults to `docs`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page template (defaults to `template.html`)
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl From<Cli> for SiteOptions {
    fn from(cli: Cli) -> Self {
        let defaults = SiteOptions::default();
        Self {
            content_dir: cli.content.unwrap_or(defaults.content_dir),
            static_dir: cli.static_dir.unwrap_or(defaults.static_dir),
            output_dir: cli.output.unwrap_or(defaults.output_dir),
            template: cli.template.unwrap_or(defaults.template),
            basepath: normalize_basepath(&cli.basepath),
            debug: cli.debug,
        }
    }
}

fn main() -> Result<()> {
    let options = SiteOptions::from(Cli::parse());
    init_logging(options.debug);

    let generator = SiteGenerator::with_options(options);
    let report = generator.publish().with_context(|| {
        format!(
            "failed to publish {}",
            generator.options().content_dir.display()
        )
    })?;

    info!(
        files = report.files_copied,
        pages = report.pages_generated,
        "done"
    );
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `--debug` selects the debug level
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["marksite"]).unwrap();
        assert_eq!(SiteOptions::from(cli), SiteOptions::default());
    }

    #[test]
    fn test_basepath_and_debug() {
        let cli = Cli::try_parse_from(["marksite", "/repo", "--debug"]).unwrap();
        let options = SiteOptions::from(cli);
        assert_eq!(options.basepath, "/repo/");
        assert!(options.debug);
    }

    #[test]
    fn test_path_overrides() {
        let cli = Cli::try_parse_from([
            "marksite",
            "--content",
            "pages",
            "--static",
            "assets",
            "-o",
            "public",
            "-t",
            "layout.html",
        ])
        .unwrap();
        let options = SiteOptions::from(cli);
        assert_eq!(options.content_dir, PathBuf::from("pages"));
        assert_eq!(options.static_dir, PathBuf::from("assets"));
        assert_eq!(options.output_dir, PathBuf::from("public"));
        assert_eq!(options.template, PathBuf::from("layout.html"));
        assert_eq!(options.basepath, "/");
    }
}
