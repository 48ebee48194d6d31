//! Status command

use clap::Args;
use onice_engine::{parse_game_id, JobConfig};
use onice_store::db::open_store;
use onice_store::ledger::get_status;

#[derive(Debug, Args)]
pub struct StatusArgs {
    pub game_id: String,
}

pub fn execute(args: StatusArgs, config: &JobConfig) -> Result<(), Box<dyn std::error::Error>> {
    let game_pk = parse_game_id(&args.game_id)?;
    let conn = open_store(&config.db_path)?;
    println!("{}", get_status(&conn, game_pk)?);
    Ok(())
}
