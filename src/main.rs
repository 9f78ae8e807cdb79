// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use kube_oidc_proxy_tls::{logging, parse_cert_chain_pem, ProvisionConfig, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kube-oidc-proxy-tls")]
#[command(about = "Generate a self-signed TLS identity for 127.0.0.1")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
    kube-oidc-proxy-tls --dir /tmp/certs
    kube-oidc-proxy-tls --dir /tmp/certs --prefix oidc
    kube-oidc-proxy-tls --config proxy-tls.toml")]
struct Cli {
    /// TOML file with `directory` and `prefix` settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to write the certificate and key into (overrides config)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Filename stem for <prefix>-ca.pem and <prefix>-key.pem (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Show detailed output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ProvisionConfig::load(path)?,
        None => ProvisionConfig::default(),
    };
    if let Some(dir) = cli.dir {
        config.directory = dir;
    }
    if let Some(prefix) = cli.prefix {
        config.prefix = prefix;
    }

    let bundle = config.provision()?;

    for (index, info) in parse_cert_chain_pem(&bundle.cert_bytes)?.iter().enumerate() {
        log::info!(
            "certificate {}: CN={} ca={} dns={:?} ips={:?} expires={}",
            index,
            info.common_name.as_deref().unwrap_or("-"),
            info.is_ca,
            info.dns_names,
            info.ip_addresses,
            info.expiry_string()
        );
    }

    println!("{}", bundle.cert_path.display());
    println!("{}", bundle.key_path.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(logging::level_for(cli.quiet, cli.verbose)) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
