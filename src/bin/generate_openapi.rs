use std::{env, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("interfaces/openapi.json"), PathBuf::from);

    notes_backend::app::write_openapi(&output)?;
    println!("OpenAPI schema written to {}", output.display());

    Ok(())
}
