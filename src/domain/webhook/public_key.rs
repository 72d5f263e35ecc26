//! Loading of the platform's webhook verification key.
//!
//! The key arrives as a PEM `PUBLIC KEY` block wrapping a DER
//! SubjectPublicKeyInfo. The algorithm identifier selects which
//! [`VerifyingKey`] variant is produced; algorithms without a verification
//! scheme are rejected with a distinct error rather than a parse failure.

use std::fmt;

use rsa::pkcs8::der::{Decode, Document};
use rsa::pkcs8::spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};
use rsa::RsaPublicKey;

use super::errors::WebhookError;

/// PEM label for a SubjectPublicKeyInfo document.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

const RSA_ENCRYPTION_OID: ObjectIdentifier = rsa::pkcs1::ALGORITHM_OID;
const RSASSA_PSS_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
const ED448_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.113");
const DSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");

/// Algorithm family of a loaded verification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
        }
    }
}

/// A public key the pipeline knows how to verify signatures with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyingKey {
    Rsa(RsaPublicKey),
}

impl VerifyingKey {
    /// Decodes a PEM-encoded SubjectPublicKeyInfo.
    ///
    /// Text before the `-----BEGIN` line and after the `-----END` line is
    /// ignored, so key files with a descriptive preamble load as-is.
    ///
    /// # Errors
    ///
    /// - `PublicKeyParse` - no `PUBLIC KEY` PEM block, or malformed DER
    /// - `UnsupportedKeyType` - well-formed key of a non-RSA algorithm
    pub fn from_pem(pem: &str) -> Result<Self, WebhookError> {
        let (label, document) = Document::from_pem(pem_block(pem))
            .map_err(|e| WebhookError::PublicKeyParse(format!("invalid PEM block: {}", e)))?;

        if label != PUBLIC_KEY_LABEL {
            return Err(WebhookError::PublicKeyParse(format!(
                "expected PEM label \"{}\", found \"{}\"",
                PUBLIC_KEY_LABEL, label
            )));
        }

        let spki = SubjectPublicKeyInfoRef::from_der(document.as_bytes())
            .map_err(|e| WebhookError::PublicKeyParse(e.to_string()))?;

        let oid = spki.algorithm.oid;
        if oid != RSA_ENCRYPTION_OID {
            return Err(WebhookError::UnsupportedKeyType(algorithm_name(&oid)));
        }

        let key = RsaPublicKey::try_from(spki)
            .map_err(|e| WebhookError::PublicKeyParse(e.to_string()))?;

        Ok(VerifyingKey::Rsa(key))
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            VerifyingKey::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }
}

/// Narrows `pem` to its first armored block.
fn pem_block(pem: &str) -> &str {
    const BEGIN: &str = "-----BEGIN ";
    const END: &str = "-----END ";

    let Some(start) = pem.find(BEGIN) else {
        return pem.trim();
    };
    let block = &pem[start..];

    let end = block.find(END).and_then(|end_line| {
        let after_marker = end_line + END.len();
        block[after_marker..]
            .find("-----")
            .map(|close| after_marker + close + "-----".len())
    });

    match end {
        Some(end) => &block[..end],
        None => block.trim_end(),
    }
}

/// Human-readable name for an SPKI algorithm identifier.
fn algorithm_name(oid: &ObjectIdentifier) -> String {
    let name = if *oid == EC_PUBLIC_KEY_OID {
        "EC"
    } else if *oid == ED25519_OID {
        "Ed25519"
    } else if *oid == ED448_OID {
        "Ed448"
    } else if *oid == RSASSA_PSS_OID {
        "RSASSA-PSS"
    } else if *oid == DSA_OID {
        "DSA"
    } else {
        return oid.to_string();
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSA_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/webhook_rsa_public.pem");
    const EC_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/ec_p256_public.pem");
    const ED25519_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/ed25519_public.pem");

    #[test]
    fn loads_rsa_spki_key() {
        let key = VerifyingKey::from_pem(RSA_PUBLIC_PEM).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Rsa);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!("\n\n  {}  \n", RSA_PUBLIC_PEM);
        assert!(VerifyingKey::from_pem(&padded).is_ok());
    }

    #[test]
    fn rejects_ec_key_as_unsupported() {
        let result = VerifyingKey::from_pem(EC_PUBLIC_PEM);
        assert_eq!(
            result,
            Err(WebhookError::UnsupportedKeyType("EC".to_string()))
        );
    }

    #[test]
    fn rejects_ed25519_key_as_unsupported() {
        let result = VerifyingKey::from_pem(ED25519_PUBLIC_PEM);
        assert_eq!(
            result,
            Err(WebhookError::UnsupportedKeyType("Ed25519".to_string()))
        );
    }

    #[test]
    fn skips_text_around_the_block() {
        let annotated = format!(
            "Crosspay webhook key (sandbox)\nrotated 2026-01-01\n{}\ntrailing notes\n",
            RSA_PUBLIC_PEM.trim()
        );

        let key = VerifyingKey::from_pem(&annotated).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Rsa);
    }

    #[test]
    fn first_block_wins() {
        let two_blocks = format!("{}\n{}", EC_PUBLIC_PEM.trim(), RSA_PUBLIC_PEM.trim());
        let result = VerifyingKey::from_pem(&two_blocks);
        assert_eq!(
            result,
            Err(WebhookError::UnsupportedKeyType("EC".to_string()))
        );
    }

    #[test]
    fn rejects_non_pem_text() {
        let result = VerifyingKey::from_pem("not a key");
        assert!(matches!(result, Err(WebhookError::PublicKeyParse(_))));
    }

    #[test]
    fn rejects_empty_string() {
        let result = VerifyingKey::from_pem("");
        assert!(matches!(result, Err(WebhookError::PublicKeyParse(_))));
    }

    #[test]
    fn rejects_truncated_key() {
        let truncated: String = RSA_PUBLIC_PEM
            .lines()
            .enumerate()
            .filter(|(i, _)| *i != 3)
            .map(|(_, line)| format!("{}\n", line))
            .collect();

        let result = VerifyingKey::from_pem(&truncated);
        assert!(matches!(result, Err(WebhookError::PublicKeyParse(_))));
    }

    #[test]
    fn rejects_wrong_label() {
        let relabeled = RSA_PUBLIC_PEM.replace("PUBLIC KEY", "CERTIFICATE");
        let result = VerifyingKey::from_pem(&relabeled);
        assert!(matches!(result, Err(WebhookError::PublicKeyParse(_))));
    }

    #[test]
    fn algorithm_name_falls_back_to_dotted_oid() {
        let oid = ObjectIdentifier::new_unwrap("1.2.3.4");
        assert_eq!(algorithm_name(&oid), "1.2.3.4");
    }
}
