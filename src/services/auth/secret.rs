/*
 * Responsibility
 * - 設定された共有シークレット文字列 → 検証鍵バイト列
 * - base64url (padding なし) として decode できればその結果、できなければ生の文字列
 * - 起動時に一度だけ実行し、以降は読み取り専用で共有する
 */
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

// URL-safe, unpadded, tolerant of non-zero trailing bits in the last symbol.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretEncoding {
    Base64Url,
    Raw,
}

/// Verification key bytes for HMAC-signed tokens.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SecretMaterial {
    bytes: Vec<u8>,
    encoding: SecretEncoding,
}

impl std::fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretMaterial")
            .field("encoding", &self.encoding)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SecretMaterial {
    /// Never fails: text that is not base64url is used verbatim.
    ///
    /// Line breaks (`\r`, `\n`) are ignored by the base64url attempt.
    pub fn resolve(secret_text: &str) -> Self {
        let compact: String = secret_text
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();

        match URL_SAFE_LENIENT.decode(&compact) {
            Ok(bytes) => Self {
                bytes,
                encoding: SecretEncoding::Base64Url,
            },
            Err(_) => Self {
                bytes: secret_text.as_bytes().to_vec(),
                encoding: SecretEncoding::Raw,
            },
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> SecretEncoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_unpadded_base64url() {
        let secret = SecretMaterial::resolve("c3ViPz5-");
        assert_eq!(secret.encoding(), SecretEncoding::Base64Url);
        assert_eq!(secret.as_bytes(), b"sub?>~");

        let secret = SecretMaterial::resolve("-_8");
        assert_eq!(secret.encoding(), SecretEncoding::Base64Url);
        assert_eq!(secret.as_bytes(), &[0xfb_u8, 0xff]);
    }

    #[test]
    fn line_breaks_are_skipped_when_decoding() {
        for text in ["c3ViPz5-\n", "c3Vi\r\nPz5-", "\nc3ViPz5-\r\n"] {
            let secret = SecretMaterial::resolve(text);
            assert_eq!(secret.encoding(), SecretEncoding::Base64Url, "{text:?}");
            assert_eq!(secret.as_bytes(), b"sub?>~", "{text:?}");
        }
    }

    #[test]
    fn raw_fallback_keeps_line_breaks() {
        let secret = SecretMaterial::resolve("not base64!\n");
        assert_eq!(secret.encoding(), SecretEncoding::Raw);
        assert_eq!(secret.as_bytes(), b"not base64!\n");
    }

    #[test]
    fn falls_back_to_raw_text_when_not_base64url() {
        for text in ["not base64!", "c3VwZXI=", "abc+/def", "a"] {
            let secret = SecretMaterial::resolve(text);
            assert_eq!(secret.encoding(), SecretEncoding::Raw, "{text}");
            assert_eq!(secret.as_bytes(), text.as_bytes(), "{text}");
        }
    }

    #[test]
    fn debug_does_not_leak_key_bytes() {
        let secret = SecretMaterial::resolve("plain text secret");
        let printed = format!("{secret:?}");
        assert!(!printed.contains("plain"));
        assert!(printed.contains("Raw"));
    }
}
