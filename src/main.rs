use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use kvsubst::source::parse_definition;
use kvsubst::{logging, Config, Resolver};

#[derive(Parser, Debug)]
#[command(name = "kvsubst")]
#[command(about = "Resolve dotted keys against a Consul-style key-value store")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./kvsubst.yaml or $XDG_CONFIG_HOME/kvsubst/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Local property consulted first, e.g. -D consul=http://kv:8500/v1/kv/app
  #[arg(short = 'D', long = "define", value_parser = parse_definition)]
  defines: Vec<(String, String)>,

  /// Write logs to this file instead of stderr
  #[arg(long)]
  log_file: Option<PathBuf>,

  /// Keys to resolve, e.g. consul.db.host
  #[arg(required = true)]
  keys: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = logging::init_tracing("warn", args.log_file.as_deref())?;

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  let local: BTreeMap<String, String> = args.defines.into_iter().collect();

  let resolver = Resolver::new(&config);

  let mut missing = 0;
  for key in &args.keys {
    match resolver.get_value(key, Some(&local), None).await {
      Some(value) => println!("{}={}", key, value),
      None => {
        eprintln!("{}: not found", key);
        missing += 1;
      }
    }
  }

  if missing > 0 {
    return Err(eyre!("{} of {} keys not found", missing, args.keys.len()));
  }

  Ok(())
}
