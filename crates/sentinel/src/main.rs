use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use sentinel::http::build_router;
use sentinel::{initialize, SentinelConfig, ServerError, ServerResult};
use sentinel_core::{LocalSigner, Signer};
use sentinel_gate::sign_document;

/// Sentinel: dual-authorization issuance gate.
///
/// Tokens are issued only when a whitelisted validator presents a one-time
/// attestation from the trusted signer; redemption is a self-service burn.
#[derive(Parser, Debug)]
#[command(name = "sentinel", version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        bind: Option<String>,

        /// Port
        #[arg(long)]
        port: Option<u16>,

        /// Owner account id (hex), overriding the config file
        #[arg(long)]
        owner: Option<String>,

        /// Trusted signer account id (hex) to configure at startup
        #[arg(long)]
        signer: Option<String>,

        /// Validator account id (hex) to grant at startup; repeatable
        #[arg(long = "validator")]
        validators: Vec<String>,
    },

    /// Generate an Ed25519 keypair and print its derived account id
    Keygen,

    /// Sign a document id with an attester key and print the attestation
    Attest {
        /// Attester secret key (32-byte hex)
        #[arg(long)]
        key: String,

        /// Document identifier to attest
        #[arg(long)]
        document_id: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("sentinel=debug,sentinel_gate=debug,sentinel_ledger=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentinel=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> ServerResult<SentinelConfig> {
    match path {
        Some(p) => SentinelConfig::load(p),
        None => Ok(SentinelConfig::default()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    match cli.command {
        Commands::Serve {
            bind,
            port,
            owner,
            signer,
            validators,
        } => cmd_serve(cli.config.as_ref(), bind, port, owner, signer, validators).await,
        Commands::Keygen => cmd_keygen(),
        Commands::Attest { key, document_id } => cmd_attest(&key, &document_id),
    }
}

async fn cmd_serve(
    config_path: Option<&PathBuf>,
    bind: Option<String>,
    port: Option<u16>,
    owner: Option<String>,
    signer: Option<String>,
    validators: Vec<String>,
) -> ServerResult<()> {
    let mut config = load_config(config_path)?;

    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(owner) = owner {
        config.owner = owner;
    }
    if let Some(signer) = signer {
        config.signer = Some(signer);
    }
    config.validators.extend(validators);

    let addr = format!("{}:{}", config.bind, config.port);
    let state = Arc::new(initialize(config)?);
    let router = build_router(state);

    info!(addr = %addr, "sentinel listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Io)?;

    info!("sentinel stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to install ctrl-c handler");
    }
}

fn cmd_keygen() -> ServerResult<()> {
    let signer = LocalSigner::generate();
    println!("secret:  {}", hex::encode(signer.secret_bytes()));
    println!("public:  {}", hex::encode(signer.public_key_ed25519()));
    println!("account: {}", signer.account_id());
    Ok(())
}

fn cmd_attest(key: &str, document_id: &str) -> ServerResult<()> {
    let stripped = key.strip_prefix("0x").unwrap_or(key);
    let bytes = hex::decode(stripped)
        .map_err(|e| ServerError::Config(format!("invalid key hex: {}", e)))?;
    let secret: [u8; 32] = bytes
        .try_into()
        .map_err(|_| ServerError::Config("key must be 32 bytes".into()))?;

    let signer = LocalSigner::from_bytes(&secret);
    let attestation = sign_document(&document_id.into(), &signer)?;

    println!("document_id: {}", attestation.document_id);
    println!("signer:      {}", signer.account_id());
    println!("signature:   {}", hex::encode(&attestation.signature));
    Ok(())
}
