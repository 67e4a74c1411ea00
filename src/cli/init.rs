use stampinator::config::{Config, ExtensionConfig};
use stampinator::error::Result;
use stampinator::introspection::{Attribute, Constraint, ConstraintKind, PgType, Table, TagValue, Tags};

/// Run the init command to generate example configuration
pub fn run(output: Option<String>) -> Result<()> {
    tracing::info!("🎨 Generating example configuration with an orders table...");

    let config = Config {
        extension: ExtensionConfig::default(),
        table: vec![example_orders_table()],
    };

    // Output to stdout or file
    if let Some(output_path) = output {
        stampinator::config::save_config(&config, &output_path)?;
        tracing::info!("📝 Generated example configuration: {}", output_path);
        tracing::info!("💡 Next steps:");
        tracing::info!("   1. Replace the example table with your own catalog snapshot");
        tracing::info!("   2. Print the schema with 'cargo run -- schema --config {}'", output_path);
    } else {
        let toml_string = toml::to_string_pretty(&config)?;
        println!("{}", toml_string);
    }

    Ok(())
}

fn column(num: i16, name: &str, type_name: &str, is_not_null: bool) -> Attribute {
    Attribute {
        num,
        name: name.to_string(),
        description: None,
        ty: PgType {
            name: type_name.to_string(),
            domain_is_not_null: false,
        },
        type_modifier: None,
        is_not_null,
        tags: Tags::new(),
    }
}

fn example_orders_table() -> Table {
    let mut created_at = column(2, "created_at", "timestamptz", true);
    created_at.description = Some("When the order was placed".to_string());

    let mut internal_note = column(6, "internal_note", "text", false);
    internal_note
        .tags
        .insert("omit".to_string(), TagValue::Text("read".to_string()));

    Table {
        schema: "public".to_string(),
        name: "orders".to_string(),
        description: Some("Customer orders".to_string()),
        tags: Tags::new(),
        attributes: vec![
            column(1, "id", "int4", true),
            created_at,
            column(3, "shipped_at", "timestamptz", false),
            column(4, "customer_id", "int4", true),
            column(5, "total_cents", "int8", true),
            internal_note,
        ],
        constraints: vec![
            Constraint {
                kind: ConstraintKind::PrimaryKey,
                key_attribute_nums: vec![1],
            },
            Constraint {
                kind: ConstraintKind::ForeignKey,
                key_attribute_nums: vec![4],
            },
        ],
    }
}
