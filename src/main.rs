// Cafe like star - drive the like indicator for a cafe page from the terminal

use clap::Parser;
use std::sync::Arc;

use cafe_like_star::{
    debug, v_error, v_summary, verbosity, CafeLikesClient, ClickOutcome, LikeIndicatorController,
    LikeResult, LikeStarConfig, StarIcon, CONFIG_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "cafe-like-star", about = "Show and toggle the like star for a cafe page")]
struct Cli {
    /// Cafe page URL; the last path segment is the cafe id
    page_url: String,

    /// Configuration file (created with defaults if missing)
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Override the likes API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Number of clicks on the star after it is rendered
    #[arg(long, default_value_t = 0)]
    clicks: u32,

    /// Repeat the load-time action on every click instead of following the status
    #[arg(long)]
    legacy: bool,

    /// Log every API call to the configured log file
    #[arg(long)]
    api_log: bool,

    /// Increase verbosity (-v basic, -vv full)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Trace every controller step and API call
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        v_error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> LikeResult<()> {
    verbosity::set_verbosity_level(cli.verbose);
    debug::set_full_debug(cli.debug);

    let mut config = LikeStarConfig::load_or_create(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if cli.legacy {
        config.toggle.track_state = false;
    }
    if cli.api_log {
        config.api.api_logging = true;
    }
    config.validate()?;
    config.print_summary();

    let client = CafeLikesClient::from_config(&config.api)?;
    let icon = StarIcon::new(&config.indicator);
    let controller = Arc::new(LikeIndicatorController::new(
        Arc::new(client),
        icon,
        config.toggle.clone(),
    ));

    let likes = controller.initialize(&cli.page_url).await?;
    let cafe = controller.entity_id().map(|id| id.to_string()).unwrap_or_default();
    v_summary!("⭐ Cafe {} liked: {}", cafe, likes);
    print_icon(&controller);

    for n in 1..=cli.clicks {
        match controller.spawn_click().await? {
            Ok(ClickOutcome::Sent { action, status }) => {
                v_summary!("🖱️  Click #{}: sent {} (showing {})", n, action, if status { "liked" } else { "not liked" });
            }
            Ok(ClickOutcome::Busy) => {
                v_summary!("🖱️  Click #{}: toggle still in flight, ignored", n);
            }
            Err(e) => {
                v_error!("⚠️ Click #{} failed: {}", n, e);
            }
        }
    }

    if cli.clicks > 0 {
        print_icon(&controller);
    }

    Ok(())
}

fn print_icon(controller: &LikeIndicatorController<StarIcon>) {
    let icon = controller.icon();
    v_summary!("   {} class=\"{}\"", icon.selector(), icon.class_attr());
}
