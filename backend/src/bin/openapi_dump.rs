//! Print the OpenAPI document, as JSON by default or YAML with `--yaml`.

use std::env;
use std::io::{self, Write};

use color_eyre::eyre::{Context, Result, eyre};
use hot_coffee::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let mut args = env::args().skip(1);
    let yaml = match args.next().as_deref() {
        None | Some("--json") => false,
        Some("--yaml") => true,
        Some(other) => return Err(eyre!("unknown argument {other}; expected --json or --yaml")),
    };

    let doc = ApiDoc::openapi();
    let rendered = if yaml {
        doc.to_yaml().wrap_err("failed to render OpenAPI YAML")?
    } else {
        doc.to_pretty_json()
            .wrap_err("failed to render OpenAPI JSON")?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("failed to write OpenAPI document")?;
    Ok(())
}
