// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

//! Decoding of PEM-wrapped PKCS1 RSA private keys.

use crate::error::{Error, Result};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use std::path::Path;
use x509_parser::pem::{parse_x509_pem, Pem};

/// Decode exactly one PEM block from `data`.
///
/// `path` is only used for error reporting. Any bytes after the first block
/// are an error rather than being silently ignored.
pub fn decode_single_pem(path: &Path, data: &[u8]) -> Result<Pem> {
    let (rest, pem) = parse_x509_pem(data).map_err(|e| Error::PemDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !rest.is_empty() {
        return Err(Error::TrailingPemData {
            path: path.to_path_buf(),
            rest: String::from_utf8_lossy(rest).into_owned(),
        });
    }

    Ok(pem)
}

/// Decode the single PEM block in `data` and parse it as a PKCS1 RSA key.
pub fn parse_rsa_private_key(path: &Path, data: &[u8]) -> Result<RsaPrivateKey> {
    let block = decode_single_pem(path, data)?;
    Ok(RsaPrivateKey::from_pkcs1_der(&block.contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
    use rsa::pkcs8::EncodePrivateKey;
    use std::sync::OnceLock;

    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let mut rng = rsa::rand_core::OsRng;
            RsaPrivateKey::new(&mut rng, 2048).unwrap()
        })
    }

    fn pkcs1_pem() -> String {
        test_key().to_pkcs1_pem(LineEnding::LF).unwrap().to_string()
    }

    #[test]
    fn test_decode_single_block() {
        let data = b"-----BEGIN X-----\nAAAA\n-----END X-----\n";
        let pem = decode_single_pem(Path::new("x.pem"), data).unwrap();
        assert_eq!(pem.label, "X");
        assert_eq!(pem.contents, vec![0u8; 3]);
    }

    #[test]
    fn test_decode_key_block_label() {
        let pem = decode_single_pem(Path::new("key.pem"), pkcs1_pem().as_bytes()).unwrap();
        assert_eq!(pem.label, "RSA PRIVATE KEY");
    }

    #[test]
    fn test_decode_rejects_non_pem() {
        let result = decode_single_pem(Path::new("x.pem"), b"not a pem file");
        assert!(matches!(result.unwrap_err(), Error::PemDecode { .. }));

        let result = decode_single_pem(Path::new("x.pem"), b"-----BEGIN X-----\nAAAA\n");
        assert!(matches!(result.unwrap_err(), Error::PemDecode { .. }));
    }

    #[test]
    fn test_parse_rsa_private_key() {
        let pem = pkcs1_pem();
        let key = parse_rsa_private_key(Path::new("key.pem"), pem.as_bytes()).unwrap();
        assert_eq!(&key, test_key());
    }

    #[test]
    fn test_parse_rsa_private_key_roundtrip() {
        let pem = pkcs1_pem();
        let key = parse_rsa_private_key(Path::new("key.pem"), pem.as_bytes()).unwrap();

        let der = key.to_pkcs1_der().unwrap();
        let reparsed = RsaPrivateKey::from_pkcs1_der(der.as_bytes()).unwrap();
        assert_eq!(key, reparsed);
    }

    #[test]
    fn test_two_blocks_rejected() {
        let pem = pkcs1_pem();
        let doubled = format!("{}{}", pem, pem);

        let err = parse_rsa_private_key(Path::new("/tmp/x-key.pem"), doubled.as_bytes())
            .unwrap_err();
        match err {
            Error::TrailingPemData { path, rest } => {
                assert_eq!(path, Path::new("/tmp/x-key.pem"));
                assert_eq!(rest, pem);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_blank_line_rejected() {
        let data = format!("{}\n", pkcs1_pem());
        let result = decode_single_pem(Path::new("key.pem"), data.as_bytes());
        assert!(matches!(result.unwrap_err(), Error::TrailingPemData { .. }));
    }

    #[test]
    fn test_trailing_error_message() {
        let data = format!("{}garbage", pkcs1_pem());
        let err = decode_single_pem(Path::new("dir/p-key.pem"), data.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "got rest decoding pem file dir/p-key.pem: garbage"
        );
    }

    #[test]
    fn test_no_block_rejected() {
        let result = parse_rsa_private_key(Path::new("key.pem"), b"");
        assert!(matches!(result.unwrap_err(), Error::PemDecode { .. }));
    }

    #[test]
    fn test_pkcs8_key_rejected() {
        let pem = test_key().to_pkcs8_pem(LineEnding::LF).unwrap().to_string();
        let result = parse_rsa_private_key(Path::new("key.pem"), pem.as_bytes());
        assert!(matches!(result.unwrap_err(), Error::KeyParse(_)));
    }
}
