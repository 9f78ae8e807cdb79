// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Certificate generation failed: {0}")]
    CertGen(#[from] rcgen::Error),

    #[error("RSA key generation failed: {0}")]
    KeyGen(#[from] rsa::Error),

    #[error("Failed to encode private key: {0}")]
    KeyEncoding(String),

    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("Failed to decode pem file {path}: {reason}")]
    PemDecode { path: PathBuf, reason: String },

    #[error("got rest decoding pem file {path}: {rest}")]
    TrailingPemData { path: PathBuf, rest: String },

    #[error("Failed to parse PKCS1 private key: {0}")]
    KeyParse(#[from] rsa::pkcs1::Error),

    #[error("Failed to parse certificate: {0}")]
    CertParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
