use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use hybrid_crypto::{ExchangeConfig, SessionKey, exchange};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "cli",
    version,
    about = "Knapsack / ECDSA / Rabbit hybrid exchange over a file"
)]
struct Args {
    /// Plaintext file to send
    input: PathBuf,

    /// Where the receiver writes the recovered plaintext
    #[arg(default_value = "output.txt")]
    output: PathBuf,

    /// Exchange settings as JSON; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the sealed envelope as JSON
    #[arg(long)]
    envelope: Option<PathBuf>,

    /// 128-bit session key in hex. A fresh key is drawn when unset.
    #[arg(long, env = "HYBRID_SESSION_KEY")]
    session_key: Option<String>,
}

fn load_config(path: Option<&Path>) -> Result<ExchangeConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!("Loading exchange config from {}", path.display());
            Ok(ExchangeConfig::from_json(&fs::read_to_string(path)?)?)
        }
        None => Ok(ExchangeConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Log to stderr, `RUST_LOG=debug` shows every protocol step.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let mut rng = rand::rng();
    let key = match &args.session_key {
        Some(text) => SessionKey::from_hex(text)?,
        None => SessionKey::generate(&mut rng),
    };

    let message = fs::read(&args.input)?;
    info!("Read {} bytes from {}", message.len(), args.input.display());

    let outcome = exchange(&message, &key, &config, &mut rng)?;

    println!("ciphertext: {}", outcome.envelope.ciphertext_hex());
    println!("signature verified: {}", outcome.opened.verified);
    if !outcome.opened.verified {
        warn!("Signature did not verify, writing plaintext anyway");
    }

    if let Some(path) = &args.envelope {
        fs::write(path, outcome.envelope.to_json()?)?;
        info!("Envelope written to {}", path.display());
    }

    fs::write(&args.output, &outcome.opened.plaintext)?;
    info!("Recovered plaintext written to {}", args.output.display());

    Ok(())
}
