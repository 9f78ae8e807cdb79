// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

//! Self-signed loopback TLS identity for kube-oidc-proxy.
//!
//! ```rust,no_run
//! use kube_oidc_proxy_tls::provision;
//!
//! let bundle = provision("/var/run/kube-oidc-proxy", "")?;
//! println!("{}", bundle.cert_path.display()); // .../kube-oidc-proxy-ca.pem
//! # Ok::<(), kube_oidc_proxy_tls::Error>(())
//! ```

/// `KeyBundle` and the provisioning operation.
pub mod bundle;
/// Configuration handling.
pub mod config;
/// Error types.
pub mod error;
/// Filesystem utilities.
pub mod fs;
/// Certificate and key generation.
pub mod generate;
/// PKCS1 private key decoding.
pub mod key;
/// Logger setup for the CLI.
pub mod logging;
/// X.509 certificate parsing.
pub mod x509;

pub use bundle::{provision, provision_with, KeyBundle, LOOPBACK_HOST};
pub use config::ProvisionConfig;
pub use error::{Error, Result};
pub use fs::write_secret_file;
pub use generate::{CertKeyGenerator, GeneratedCertKey, SelfSignedGenerator, DEFAULT_KEY_BITS};
pub use key::{decode_single_pem, parse_rsa_private_key};
pub use x509::{parse_cert_chain_pem, parse_cert_file, parse_cert_pem, CertInfo};
