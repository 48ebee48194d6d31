pub mod migrate;
pub mod process_game;
pub mod status;
