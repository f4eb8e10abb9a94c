//! Example generation run over a local schema directory.
//!
//! Run with: `cargo run --example generate -- <schema-dir> <output.py> [version]`

use avropy::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let schema_dir = args.next().unwrap_or_else(|| "schemas".to_string());
    let output = args
        .next()
        .unwrap_or_else(|| "_protocol_definitions.py".to_string());
    let version = args.next().unwrap_or_else(|| "v0.5.1".to_string());

    let source = LocalDirSource::new(&schema_dir);
    avropy::codegen::pipeline::run(&source, &version, output.as_ref())?;

    println!("Generated {output} from {schema_dir}");
    Ok(())
}
