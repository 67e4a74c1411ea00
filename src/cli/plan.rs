use stampinator::error::{Result, StampinatorError};
use stampinator::formatted::FormatArgs;
use stampinator::schema::{RequestedField, SchemaBuilder};

/// Run the plan command to print the SQL a single field selection compiles to
pub fn run(
    config_path: String,
    table: String,
    field: String,
    alias: Option<String>,
    format: Option<String>,
    tz: Option<String>,
) -> Result<()> {
    let config = stampinator::config::load_config(&config_path)?;

    let snapshot = config
        .table
        .iter()
        .find(|t| t.name == table)
        .ok_or_else(|| StampinatorError::Config(format!("Table '{}' is not in {}", table, config_path)))?;

    let builder = SchemaBuilder::from_config(&config.extension);
    let plan = builder.table_plan(snapshot)?;

    if plan.field(&field).is_none() {
        let known: Vec<&str> = plan.fields().map(|(name, _)| name.as_str()).collect();
        return Err(StampinatorError::Query(format!(
            "Type '{}' has no field '{}' (known fields: {})",
            plan.type_name,
            field,
            known.join(", ")
        )));
    }

    let requested = RequestedField::new(field, alias.as_deref(), FormatArgs::new(format, tz));
    let statement = plan.plan(builder.host(), &[requested], None, None).build();

    println!("{}", statement.text);
    for (i, param) in statement.params.iter().enumerate() {
        println!("-- ${} = {}", i + 1, param);
    }

    Ok(())
}
