// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::fs::write_secret_file;
use crate::generate::{CertKeyGenerator, SelfSignedGenerator};
use crate::key::parse_rsa_private_key;
use rsa::RsaPrivateKey;
use std::fmt;
use std::path::{Path, PathBuf};

/// Host the serving certificate is issued for.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// A TLS identity written to disk, together with its parsed private key.
pub struct KeyBundle {
    /// Location of the PEM certificate chain.
    pub cert_path: PathBuf,
    /// Location of the PEM private key.
    pub key_path: PathBuf,
    /// Exactly the bytes written to `cert_path`.
    pub cert_bytes: Vec<u8>,
    /// Exactly the bytes written to `key_path`.
    pub key_bytes: Vec<u8>,
    /// Private key parsed from `key_bytes`.
    pub key: RsaPrivateKey,
}

impl fmt::Debug for KeyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBundle")
            .field("cert_path", &self.cert_path)
            .field("key_path", &self.key_path)
            .field("cert_bytes", &self.cert_bytes.len())
            .field("key_bytes", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Generate a self-signed identity for 127.0.0.1 and write it under
/// `directory` as `<prefix>-ca.pem` and `<prefix>-key.pem`.
///
/// An empty `prefix` means `kube-oidc-proxy`.
pub fn provision(directory: impl AsRef<Path>, prefix: &str) -> Result<KeyBundle> {
    let config = ProvisionConfig::new(directory.as_ref(), prefix);
    provision_with(&config, &SelfSignedGenerator::default())
}

/// Like [`provision`], with an explicit configuration and generator.
///
/// Nothing is cleaned up on failure: if the key write or key parsing fails,
/// files already written stay on disk.
pub fn provision_with<G>(config: &ProvisionConfig, generator: &G) -> Result<KeyBundle>
where
    G: CertKeyGenerator + ?Sized,
{
    // The empty DNS name ends up as an empty dNSName SAN. Clients matching
    // on SANs see it, so it is reproduced as-is.
    let generated = generator.generate(LOOPBACK_HOST, &[], &[String::new()])?;

    let cert_path = config.cert_path();
    let key_path = config.key_path();

    write_secret_file(&cert_path, &generated.cert_pem)?;
    write_secret_file(&key_path, &generated.key_pem)?;

    let key = parse_rsa_private_key(&key_path, &generated.key_pem)?;

    log::info!(
        "provisioned TLS identity: cert={} key={}",
        cert_path.display(),
        key_path.display()
    );

    Ok(KeyBundle {
        cert_path,
        key_path,
        cert_bytes: generated.cert_pem,
        key_bytes: generated.key_pem,
        key,
    })
}
