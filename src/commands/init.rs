//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::patterns::PatternStore;
use crate::store::DocumentStore;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct InitOptions {
    pub base_dir: PathBuf,
    pub force: bool,
}

/// Write the default configuration and create both databases
pub async fn cmd_init(options: InitOptions) -> Result<()> {
    let mut config = Config::default();
    config.paths.base_dir = options.base_dir.clone();
    config.paths.config_file = options.base_dir.join("config.toml");
    config.paths.patterns_db_file = options.base_dir.join("patterns.db");

    if config.paths.config_file.exists() && !options.force {
        return Err(Error::Config(format!(
            "Config already exists at {}. Use --force to overwrite.",
            config.paths.config_file.display()
        )));
    }

    config.validate()?;
    config.save()?;
    info!("Created config at {:?}", config.paths.config_file);

    let store = DocumentStore::connect().await?;
    store.init_schema().await?;
    info!("Document schema ready");

    PatternStore::open(&config.paths.patterns_db_file).await?;
    info!("Created patterns database at {:?}", config.paths.patterns_db_file);

    println!("✓ Initialized guardian at {:?}", config.paths.base_dir);
    println!("\nConfiguration: {:?}", config.paths.config_file);
    println!("Patterns database: {:?}", config.paths.patterns_db_file);
    println!("\nNext steps:");
    println!("  guardian classify          # Assign topic labels");
    println!("  guardian score             # Compute framework scores");
    println!("  guardian serve             # Start the scoring API");

    Ok(())
}
