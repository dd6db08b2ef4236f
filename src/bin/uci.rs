use clap::Parser;
use elobot::config::EngineConfig;
use elobot::uci::UciEngine;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elobot-uci", about = "EloBot UCI front end")]
struct Args {
    /// JSON config file (see EngineConfig)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial Elo option value
    #[arg(long)]
    rating: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut conf = match &args.config {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    }
    .apply_env();
    if let Some(r) = args.rating { conf.rating = r; }
    // A GUI drives the clock; no caller-side deadline here.
    conf.think_ms = None;
    let mut engine = UciEngine::new(&conf)?;
    engine.run_loop()
}
