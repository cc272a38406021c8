//! yq-session CLI
//!
//! Usage: yq-session [OPTIONS]
//!
//! Options:
//!   --identity                Print a freshly generated device identity
//!   -b, --bootstrap <FILE>    Load or establish the anonymous session
//!   -s, --sign-get <FILE> <URL>  Print a signed GET request
//!   --clear <FILE>            Forget the persisted session
//!   -h, --help                Print help information

use std::env;

use yq_session::{ClientConfig, DeviceIdentity, RequestBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Respects RUST_LOG (e.g. RUST_LOG=yq_session=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "-h" | "--help" => {
            print_usage();
        }
        "--identity" => {
            show_identity()?;
        }
        "-b" | "--bootstrap" => {
            if args.len() < 3 {
                eprintln!("Error: --bootstrap requires a config file path");
                return Ok(());
            }
            bootstrap(&args[2]).await?;
        }
        "-s" | "--sign-get" => {
            if args.len() < 4 {
                eprintln!("Error: --sign-get requires a config file path and a URL");
                return Ok(());
            }
            sign_get(&args[2], &args[3]).await?;
        }
        "--clear" => {
            if args.len() < 3 {
                eprintln!("Error: --clear requires a config file path");
                return Ok(());
            }
            clear(&args[2])?;
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
        }
    }

    Ok(())
}

fn print_usage() {
    println!(
        r#"yq-session - anonymous session bootstrap and request signing

USAGE:
    yq-session [OPTIONS]

OPTIONS:
    --identity                    Print a freshly generated device identity
    -b, --bootstrap <FILE>        Load or establish the anonymous session
    -s, --sign-get <FILE> <URL>   Print a signed GET request for URL
    --clear <FILE>                Forget the persisted session
    -h, --help                    Print help information

CONFIGURATION FILE FORMAT (JSON, every field optional):
    {{
        "base_url": "http://mangaapi.manhuaren.com",
        "store_path": ".session/prefs.json",
        "language": "zh",
        "country": "US"
    }}

EXAMPLES:
    Register once and persist the token:
        yq-session --bootstrap client.json

    Sign a detail request:
        yq-session --sign-get client.json "/v1/manga/getDetail?mangaId=1"
"#
    );
}

fn show_identity() -> anyhow::Result<()> {
    let identity = DeviceIdentity::generate();
    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}

async fn bootstrap(config_path: &str) -> anyhow::Result<()> {
    let config = ClientConfig::from_file(config_path)?;
    if config.store_path.is_none() {
        tracing::warn!("no store_path configured; the session will not be persisted");
    }

    let builder = RequestBuilder::from_config(config)?;
    let credential = builder.session().credential().await?;

    tracing::info!(
        "Session ready for anonymous user {} ({} bootstrap calls)",
        credential.anonymous_user_id(),
        builder.session().bootstrap_count()
    );
    Ok(())
}

async fn sign_get(config_path: &str, url: &str) -> anyhow::Result<()> {
    let config = ClientConfig::from_file(config_path)?;
    let builder = RequestBuilder::from_config(config)?;
    let request = builder.build_get(url).await?;

    println!("GET {}", request.url());
    for (name, value) in request.headers() {
        println!("{}: {}", name, value);
    }
    Ok(())
}

fn clear(config_path: &str) -> anyhow::Result<()> {
    let config = ClientConfig::from_file(config_path)?;
    let Some(path) = config.store_path.clone() else {
        anyhow::bail!("config has no store_path; nothing to clear");
    };

    yq_session::CredentialStore::open_file(path)?.clear()?;
    tracing::info!("Session cleared");
    Ok(())
}
