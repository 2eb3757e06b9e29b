use peacock_options::LaunchOptions;
use schemars::schema_for;

/// Print the JSON schema of `options.json`, for editors that validate JSON documents.
pub fn schema() -> color_eyre::Result<()> {
    let schema = schema_for!(LaunchOptions);
    println!("{}", serde_json::to_string_pretty(&schema)?);

    Ok(())
}
