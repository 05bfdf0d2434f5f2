//! TLS configuration with pinned CA roots.
//!
//! By default the HTTP client trusts the bundled webpki roots. When
//! `PEERDESK_CA_CERT` points at a PEM bundle, [`build_tls_config`] builds a
//! [`rustls::ClientConfig`] whose root store contains only those
//! certificates, pinning the admin API to a private or self-hosted CA.

use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store contains only the
/// certificates found in the PEM file at `path`.
///
/// # Errors
///
/// Returns [`PeerdeskError::Tls`](crate::PeerdeskError::Tls) if the file
/// cannot be read, the PEM cannot be parsed, or it holds no usable
/// certificate.
pub fn build_tls_config(path: &Path) -> Result<ClientConfig> {
    let pem = std::fs::read(path).map_err(|e| {
        crate::PeerdeskError::Tls(format!("failed to read CA file {}: {e}", path.display()))
    })?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::PeerdeskError::Tls(format!("failed to parse CA PEM: {e}")))?;

    let mut root_store = rustls::RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(certs);
    if added == 0 {
        return Err(crate::PeerdeskError::Tls(format!(
            "no usable certificate in {} ({ignored} ignored)",
            path.display()
        )));
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
