use clap::{Parser, ValueEnum};
use twinflip_core::{SessionConfig, Tier};
use wasm_bindgen::prelude::*;

use storage::LocalOrDefault;

mod game;
mod scheduler;
mod settings;
mod storage;
mod utils;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TierArg {
    Easy,
    Hard,
}

impl From<TierArg> for Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Easy => Tier::Easy,
            TierArg::Hard => Tier::Hard,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Start on this tier instead of the remembered one
    #[arg(short, long, value_enum)]
    tier: Option<TierArg>,

    /// Milliseconds a mismatched pair stays visible
    #[arg(long)]
    revert_delay: Option<u32>,
}

impl Args {
    /// Parses `#-v&--seed=42` style fragments, the first segment stands in for the binary name.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn session_config(&self, settings: settings::Settings) -> SessionConfig {
        let seed = self
            .seed
            .as_deref()
            .map_or_else(utils::js_random_seed, utils::parse_seed);
        let tier = self.tier.map_or(settings.tier, Tier::from);

        let config = SessionConfig::new(seed).with_tier(tier);
        match self.revert_delay {
            Some(delay) => config.with_revert_delay(delay),
            None => config,
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, args_error) = match Args::from_location_hash(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = args_error {
        log::error!("Ignoring URL arguments: {}", err);
    }

    let config = args.session_config(settings::Settings::local_or_default());
    log::debug!("config: {:?}", config);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, game::GameProps { config })
        .render();
}
