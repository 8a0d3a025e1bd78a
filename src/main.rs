//! viewerscan: polls a forum's "who is viewing" list and prints the most
//! recent unique visitors every tick until interrupted.

use clap::Parser;
use tracing::info;

use viewerscan::app::App;
use viewerscan::logging::init_logger;
use viewerscan::services::page_fetcher::HttpPageFetcher;
use viewerscan::services::poll_loop::{self, LoopOptions};
use viewerscan::services::renderer::Renderer;
use viewerscan::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use viewerscan::types::settings::ScanSettings;

#[derive(Parser, Debug)]
#[command(name = "viewerscan", version, about = "Track the unique viewers of a forum page")]
struct Cli {
    /// Settings file (defaults to settings.json in the platform config dir)
    #[arg(short, long, env = "VIEWERSCAN_CONFIG")]
    config: Option<String>,

    /// Page to scrape
    #[arg(short, long)]
    url: Option<String>,

    /// Exact class attribute of the viewer list
    #[arg(long)]
    class: Option<String>,

    /// Seconds between scans
    #[arg(short, long)]
    interval: Option<f64>,

    /// Number of most recent viewers to show
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    top_n: Option<i64>,

    /// Log filter, e.g. "info" or "viewerscan=debug"
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single scan and exit
    #[arg(long)]
    once: bool,

    /// Save the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut ScanSettings) {
        if let Some(url) = &self.url {
            settings.source.target_url = url.clone();
        }
        if let Some(class) = &self.class {
            settings.source.viewer_list_class = class.clone();
        }
        if let Some(interval) = self.interval {
            settings.polling.update_interval_seconds = interval;
        }
        if let Some(top_n) = self.top_n {
            settings.polling.top_n = top_n;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut engine = SettingsEngine::new(cli.config.clone());
    let mut settings = engine.load()?;
    cli.apply_overrides(&mut settings);
    engine.apply(settings)?;
    let settings = engine.get_settings().clone();

    init_logger(&settings.logging.level);

    if cli.write_config {
        engine.save()?;
        println!("Wrote settings to {}", engine.get_config_path());
        return Ok(());
    }

    let fetcher = HttpPageFetcher::new(&settings.source)?;
    info!(
        url = %fetcher.url(),
        interval_seconds = settings.polling.update_interval_seconds,
        top_n = settings.polling.top_n,
        "starting viewer scan"
    );

    let mut app = App::new(fetcher, settings.polling.top_n);
    let options = LoopOptions::from_settings(&settings.polling, cli.once.then_some(1));
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let mut stdout = std::io::stdout();
    poll_loop::run(&mut app, &Renderer::new(), &options, &mut stdout, shutdown).await?;

    Ok(())
}
