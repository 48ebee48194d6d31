//! Process-game command

use std::sync::Arc;

use clap::Args;
use onice_engine::{parse_game_id, process_game, JobConfig, JobOptions, JobOutcome};
use onice_feed::HttpSnapshotSource;
use onice_store::db::open_store;

#[derive(Debug, Args)]
pub struct ProcessGameArgs {
    /// Game id, exactly as delivered by the trigger message
    pub game_id: String,
}

pub fn execute(args: ProcessGameArgs, config: &JobConfig) -> Result<(), Box<dyn std::error::Error>> {
    let game_pk = parse_game_id(&args.game_id)?;

    let source = Arc::new(HttpSnapshotSource::new(&config.feed_config())?);
    let mut conn = open_store(&config.db_path)?;
    let options = JobOptions {
        reconstruct: config.reconstruct_options(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(process_game(&mut conn, source, game_pk, &options))?;

    match outcome {
        JobOutcome::AlreadyComplete => {
            println!("Game {} already complete, nothing to do", game_pk);
        }
        JobOutcome::Processed { summary, anomalies } => {
            println!("Game {} complete", game_pk);
            println!("  plays:          {}", summary.plays);
            println!("  contributors:   {}", summary.contributors);
            println!("  on-ice records: {}", summary.on_ice_records);
            println!("  skater lines:   {}", summary.skater_lines);
            if !anomalies.is_empty() {
                println!("  anomalies:      {}", anomalies.len());
            }
        }
    }

    Ok(())
}
