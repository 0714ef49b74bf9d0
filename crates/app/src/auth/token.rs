//! API token formatting, parsing, and HMAC input construction.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

use crate::{auth::ApiTokenUuid, domain::users::records::UserUuid};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "ll";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Raw token secret. Never logged, wiped on drop.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    /// Fresh secret from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.0
    }

    fn to_hex(&self) -> String {
        self.0
            .iter()
            .fold(String::with_capacity(API_TOKEN_SECRET_HEX_CHARS), |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            })
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != API_TOKEN_SECRET_HEX_CHARS {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let [hi, lo] = pair else {
                return None;
            };

            *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
        }

        Some(Self(bytes))
    }
}

/// Lowercase hex only; the wire format never carries uppercase digits.
fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        _ => None,
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token split into its parts.
#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: ApiTokenUuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

impl ParsedApiToken {
    /// Bytes the stored HMAC verifier is computed over.
    ///
    /// Format: `{token_uuid}:{version}:{user_uuid}:{secret_hex}` with simple (unhyphenated) uuids.
    #[must_use]
    pub fn verifier_input(&self, user: UserUuid) -> Vec<u8> {
        build_verifier_input(self.token_uuid, self.version, user, &self.secret)
    }
}

impl fmt::Display for ParsedApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{API_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.token_uuid.into_uuid().simple(),
            self.secret.to_hex()
        )
    }
}

impl FromStr for ParsedApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let mut segments = id.splitn(3, '_');

        let (Some(API_TOKEN_PREFIX), Some(version), Some(token_uuid)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(ApiTokenError::InvalidFormat);
        };

        Ok(Self {
            version: version.parse()?,
            token_uuid: token_uuid
                .parse()
                .map_err(|_| ApiTokenError::InvalidFormat)?,
            secret: ApiTokenSecret::from_hex(secret_hex)
                .ok_or(ApiTokenError::InvalidSecretEncoding)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub(crate) fn build_verifier_input(
    token_uuid: ApiTokenUuid,
    version: ApiTokenVersion,
    user: UserUuid,
    secret: &ApiTokenSecret,
) -> Vec<u8> {
    format!(
        "{}:{}:{}:{}",
        token_uuid.into_uuid().simple(),
        version.as_i16(),
        user.into_uuid().simple(),
        secret.to_hex(),
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn token(secret: u8) -> ParsedApiToken {
        ParsedApiToken {
            token_uuid: ApiTokenUuid::from_uuid(Uuid::nil()),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::from_bytes([secret; API_TOKEN_SECRET_BYTES]),
        }
    }

    #[test]
    fn formatted_token_has_expected_shape() {
        let formatted = token(0xAB).to_string();

        assert_eq!(
            formatted,
            format!(
                "ll_v1_00000000000000000000000000000000.{}",
                "ab".repeat(API_TOKEN_SECRET_BYTES)
            )
        );
    }

    #[test]
    fn formatted_token_parses_back() {
        let original = token(0x5E);
        let parsed: ParsedApiToken = original.to_string().parse().expect("token should parse");

        assert_eq!(parsed.token_uuid, original.token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), original.secret.as_bytes());
    }

    #[test]
    fn parse_rejects_uppercase_or_signed_hex() {
        let uuid = Uuid::nil().simple();
        let uppercase = format!("ll_v1_{uuid}.{}", "AB".repeat(API_TOKEN_SECRET_BYTES));
        let signed = format!("ll_v1_{uuid}.{}", "+f".repeat(API_TOKEN_SECRET_BYTES));

        assert!(matches!(
            uppercase.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            signed.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_v1_{}.{}", Uuid::nil().simple(), "aa".repeat(32));

        assert!(matches!(
            token.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("ll_v9_{}.{}", Uuid::nil().simple(), "aa".repeat(32));

        assert!(matches!(
            token.parse::<ParsedApiToken>(),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secret() {
        let short = format!("ll_v1_{}.abcd", Uuid::nil().simple());
        let non_hex = format!("ll_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert!(matches!(
            short.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            non_hex.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_input_binds_token_to_user() {
        let parsed = token(0xCD);
        let user = UserUuid::from_uuid(Uuid::nil());

        let input = String::from_utf8(parsed.verifier_input(user)).expect("input should be utf-8");

        assert_eq!(
            input,
            format!(
                "{0}:1:{0}:{1}",
                Uuid::nil().simple(),
                "cd".repeat(API_TOKEN_SECRET_BYTES)
            )
        );
        assert_ne!(
            parsed.verifier_input(user),
            parsed.verifier_input(UserUuid::new())
        );
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = ApiTokenSecret::from_bytes([1; API_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "ApiTokenSecret(**redacted**)");
    }
}
