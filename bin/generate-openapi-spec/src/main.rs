//! Generate `OpenAPI` specification for the Neoscope API

use api::ApiDoc;
use utoipa::OpenApi;

fn main() -> eyre::Result<()> {
    let openapi = ApiDoc::openapi();
    let json = serde_json::to_string_pretty(&openapi)?;
    println!("{json}");
    Ok(())
}
