//! Migrate command

use onice_engine::JobConfig;
use onice_store::db::open_store;
use onice_store::migrations::applied_migrations;

pub fn execute(config: &JobConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_store(&config.db_path)?;
    for id in applied_migrations(&conn)? {
        println!("applied {}", id);
    }
    println!("Store ready at {}", config.db_path.display());
    Ok(())
}
