use clap::{Parser, Subcommand};
use simple_folio::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn version_string() -> &'static str {
    let hash = env!("FOLIO_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static site generator for a personal developer portfolio")]
#[command(long_about = "\
Static site generator for a personal developer portfolio

A shared header, a profile and a project list are written once and rendered
into every page at build time. A small script handles active links, scroll
reveal and image carousels in the browser.

Site structure:

  site/
  ├── config.toml          # Pages, labels, colors, reveal timing (optional)
  ├── nav.html             # Shared <header> with links relative to the site root
  ├── projects.json        # Project cards; \"show\": false hides an entry
  ├── about_me.json        # Name, description and tech stack for the hero
  ├── about.md             # Markdown page body, referenced from [[pages]]
  └── images/              # Everything else is copied to the output as-is

Set RUST_LOG=debug for per-component diagnostics.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Extra config file merged over the site's config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the whole site into the output directory
    Build,
    /// Load config and every resource, report what each page would get
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source, cli.config.as_deref())?;
            init_thread_pool(&site_config.processing);

            println!(
                "==> Building {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(&cli.source, &cli.output, &site_config)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source, cli.config.as_deref())?;
            init_thread_pool(&site_config.processing);

            println!("==> Checking {}", cli.source.display());
            let reports = generate::check(&cli.source, &site_config)?;
            output::print_check_output(&reports);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. User can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
