// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

//! Self-signed serving certificate and RSA key generation.

use crate::error::{Error, Result};
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    Issuer, KeyPair, KeyUsagePurpose, SanType, SerialNumber,
};
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use std::net::IpAddr;

/// Default RSA modulus size for both the CA and the serving key.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Validity of both certificates.
const MAX_AGE_DAYS: i64 = 365;

/// PEM-encoded output of a [`CertKeyGenerator`].
#[derive(Clone)]
pub struct GeneratedCertKey {
    /// Serving certificate followed by its issuing CA certificate.
    pub cert_pem: Vec<u8>,
    /// Serving key as a single PKCS1 `RSA PRIVATE KEY` block.
    pub key_pem: Vec<u8>,
}

/// Produces a certificate and private key for a host.
pub trait CertKeyGenerator {
    /// Generate a certificate for `host` with the given extra SANs.
    fn generate(
        &self,
        host: &str,
        alternate_ips: &[IpAddr],
        alternate_dns: &[String],
    ) -> Result<GeneratedCertKey>;
}

/// Generates a throwaway CA and a serving certificate signed by it.
#[derive(Debug, Clone)]
pub struct SelfSignedGenerator {
    key_bits: usize,
}

impl Default for SelfSignedGenerator {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

impl SelfSignedGenerator {
    /// Use `key_bits`-bit RSA keys. ring cannot sign with keys under 2048 bits.
    pub fn with_key_bits(key_bits: usize) -> Self {
        Self { key_bits }
    }

    /// RSA modulus size in bits.
    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    fn generate_rsa_key(&self) -> Result<(RsaPrivateKey, KeyPair)> {
        let mut rng = rsa::rand_core::OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, self.key_bits)?;

        // rcgen signs with ring, which only loads RSA keys from PKCS8
        let pkcs8_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| Error::KeyEncoding(e.to_string()))?;
        let key_pair = KeyPair::from_pem(&pkcs8_pem)?;

        Ok((private_key, key_pair))
    }
}

impl CertKeyGenerator for SelfSignedGenerator {
    fn generate(
        &self,
        host: &str,
        alternate_ips: &[IpAddr],
        alternate_dns: &[String],
    ) -> Result<GeneratedCertKey> {
        log::debug!(
            "generating {}-bit self-signed certificate for {}",
            self.key_bits,
            host
        );

        let now = time::OffsetDateTime::now_utc();
        let stamp = now.unix_timestamp();

        let (_, ca_key) = self.generate_rsa_key()?;
        let ca_params = ca_params(host, stamp, now);
        let ca_cert = ca_params.self_signed(&ca_key)?;

        // Backdated an hour for clock skew between hosts
        let valid_from = now - time::Duration::hours(1);
        let serving_params =
            serving_params(host, alternate_ips, alternate_dns, stamp, valid_from)?;

        let (serving_key, serving_key_pair) = self.generate_rsa_key()?;
        let issuer = Issuer::new(ca_params, ca_key);
        let serving_cert = serving_params.signed_by(&serving_key_pair, &issuer)?;

        let mut cert_pem = serving_cert.pem().into_bytes();
        cert_pem.extend_from_slice(ca_cert.pem().as_bytes());

        let key_pem = serving_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| Error::KeyEncoding(e.to_string()))?
            .as_bytes()
            .to_vec();

        Ok(GeneratedCertKey { cert_pem, key_pem })
    }
}

fn ca_params(host: &str, stamp: i64, now: time::OffsetDateTime) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.serial_number = Some(SerialNumber::from(1u64));
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, format!("{}-ca@{}", host, stamp));
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![
        KeyUsagePurpose::KeyEncipherment,
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyCertSign,
    ];
    params.not_before = now;
    params.not_after = now + time::Duration::days(MAX_AGE_DAYS);
    params
}

fn serving_params(
    host: &str,
    alternate_ips: &[IpAddr],
    alternate_dns: &[String],
    stamp: i64,
    valid_from: time::OffsetDateTime,
) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();
    params.serial_number = Some(SerialNumber::from(2u64));
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, format!("{}@{}", host, stamp));
    params.is_ca = IsCa::ExplicitNoCa;
    params.key_usages = vec![
        KeyUsagePurpose::KeyEncipherment,
        KeyUsagePurpose::DigitalSignature,
    ];
    params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
    params.not_before = valid_from;
    params.not_after = valid_from + time::Duration::days(MAX_AGE_DAYS);

    if let Ok(ip) = host.parse::<IpAddr>() {
        params.subject_alt_names.push(SanType::IpAddress(ip));
    } else {
        params.subject_alt_names.push(dns_san(host)?);
    }

    params
        .subject_alt_names
        .extend(alternate_ips.iter().copied().map(SanType::IpAddress));

    // Entries are kept verbatim, including empty names
    for name in alternate_dns {
        params.subject_alt_names.push(dns_san(name)?);
    }

    Ok(params)
}

fn dns_san(name: &str) -> Result<SanType> {
    let ia5 = name.to_string().try_into().map_err(|_| Error::InvalidHost {
        host: name.to_string(),
        reason: "Invalid DNS name".into(),
    })?;
    Ok(SanType::DnsName(ia5))
}
