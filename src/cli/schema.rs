use stampinator::error::Result;
use stampinator::schema::SchemaBuilder;

/// Run the schema command to print the generated GraphQL SDL
pub fn run(config_path: String) -> Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = stampinator::config::load_config(&config_path)?;

    tracing::info!("🔧 Building GraphQL schema for {} tables...", config.table.len());

    let schema = SchemaBuilder::from_config(&config.extension).build_schema(&config.table)?;

    tracing::info!("✅ Schema built successfully");
    println!("{}", schema.sdl());

    Ok(())
}
