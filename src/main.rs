use serde_json::json;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt};

use xauth_signer::{HttpRequest, SignableRequest, SignerSettings};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,xauth_signer=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        anyhow::bail!("usage: {} <METHOD> <URL> [settings.toml]", program_name(&args));
    }

    let mut settings = match args.get(3) {
        Some(path) => {
            tracing::info!("Loading settings from {}", path);
            SignerSettings::load(Path::new(path))?
        }
        None => SignerSettings::default(),
    };
    settings.fill_from_env()?;

    let signer = settings.into_signer()?;
    let mut request = HttpRequest::new(args[1].to_uppercase(), &args[2])?;
    let artifacts = signer.encode_request(&mut request)?;

    let headers: Vec<_> = request
        .headers()
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    let output = json!({
        "method": request.method(),
        "url": request.url().as_str(),
        "headers": headers,
        "artifacts": artifacts,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// argv[0], or the binary name when argv is empty.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("xauth-sign", String::as_str)
}
