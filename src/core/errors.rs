use std::path::PathBuf;

/// All domain errors for keywiz.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger. None of them is fatal: the caller
/// decides how to present the failure.
#[derive(Debug, thiserror::Error)]
pub enum KeystoreError {
    #[error(
        "Keystore password was incorrect: {path}\n\n  \
         The integrity check failed with the supplied password.\n  \
         A tampered file produces the same error for JKS keystores."
    )]
    InvalidCredential { path: PathBuf },

    #[error(
        "Cannot read keystore {path}: {reason}\n\n  \
         Supported formats: JKS (.jks) and PKCS#12 (.p12, .pfx)."
    )]
    UnreadableSource { path: PathBuf, reason: String },

    #[error("Keystore {path} is corrupt: {detail}")]
    CorruptData { path: PathBuf, detail: String },

    #[error(
        "Not a valid X.509 certificate: {reason}\n\n  \
         Expected a DER file or a PEM file with a CERTIFICATE block."
    )]
    MalformedCertificate { reason: String },

    #[error("Invalid alias '{alias}': aliases must contain at least one non-blank character")]
    InvalidAlias { alias: String },

    #[error("No keystore loaded\n\n  Load a keystore before listing or editing entries.")]
    NotLoaded,

    #[error("Failed to write keystore to {path}: {source}\n\n  The destination file was left unchanged.")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode keystore: {reason}")]
    EncodingFailure { reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeystoreError>;
