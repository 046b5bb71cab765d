use std::process::ExitCode;

use anyhow::Result;

use tandem_engine::device::GpuInit;
use tandem_engine::logging::{init_logging, LoggingConfig};
use tandem_engine::window::Runtime;

use tandem_scene::app::{SceneApp, SceneAssets};
use tandem_scene::config::SceneConfig;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = SceneConfig::from_env()?;
    let assets = SceneAssets::load(&config)?;
    let app = SceneApp::new(&config, assets);

    Runtime::run(config.runtime_config(), GpuInit::default(), app)
}
