use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::claims::Claims;
use super::codec::TokenCodec;
use super::errors::JwtError;
use crate::secret::SigningSecret;

/// JWT token handler for encoding and decoding tokens.
///
/// Signs with HS256. Verification accepts only the HMAC family
/// (HS256/HS384/HS512) so a token declaring `none` or an asymmetric
/// algorithm can never be checked against anything but the shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Validated signing secret
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Decode a token against an explicit clock reading.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `now` - Current Unix timestamp in seconds
    ///
    /// # Errors
    /// See [`TokenCodec::decode`].
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        let &[header_segment, payload_segment, signature_segment] = segments.as_slice() else {
            return Err(JwtError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let header: RawHeader = decode_segment(header_segment, "header")?;
        let payload: Map<String, Value> = decode_segment(payload_segment, "payload")?;

        let algorithm = accepted_algorithm(&header.alg)?;
        let message = &token[..header_segment.len() + 1 + payload_segment.len()];
        let is_valid = crypto::verify(
            signature_segment,
            message.as_bytes(),
            &self.decoding_key,
            algorithm,
        )
        .map_err(|e| JwtError::SignatureInvalid(e.to_string()))?;

        if !is_valid {
            return Err(JwtError::SignatureInvalid(
                "signature does not match".to_string(),
            ));
        }

        if let Some(exp) = payload.get("exp").and_then(Value::as_i64) {
            if exp <= now {
                return Err(JwtError::Expired);
            }
        }

        let claims: Claims = serde_json::from_value(Value::Object(payload))
            .map_err(|e| JwtError::Malformed(format!("invalid claims: {}", e)))?;

        if claims.sub.is_empty() {
            return Err(JwtError::Malformed("empty subject".to_string()));
        }

        Ok(claims)
    }
}

impl TokenCodec for JwtHandler {
    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T, JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::Malformed(format!("{} is not base64url: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::Malformed(format!("{} is not a JSON object: {}", name, e)))
}

fn accepted_algorithm(name: &str) -> Result<Algorithm, JwtError> {
    match Algorithm::from_str(name) {
        Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(algorithm),
        _ => Err(JwtError::SignatureInvalid(format!(
            "algorithm '{}' is not accepted",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;
    use crate::jwt::claims::TokenType;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn handler() -> JwtHandler {
        JwtHandler::new(&SigningSecret::new(SECRET).unwrap())
    }

    fn future_exp() -> i64 {
        (Utc::now() + Duration::minutes(15)).timestamp()
    }

    fn past_exp() -> i64 {
        (Utc::now() - Duration::minutes(1)).timestamp()
    }

    fn sign_raw(algorithm: Algorithm, payload: &Value) -> String {
        jsonwebtoken::encode(
            &Header::new(algorithm),
            payload,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn b64(value: &Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = handler();
        let claims = Claims::new("user123", TokenType::Access, future_exp());

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_header_declares_hs256() {
        let token = handler()
            .encode(&Claims::new("user123", TokenType::Access, future_exp()))
            .unwrap();
        let header_segment = token.split('.').next().unwrap();
        let header: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_segment).unwrap()).unwrap();

        assert_eq!(header["alg"], "HS256");
    }

    #[test]
    fn test_decode_invalid_token() {
        let result = handler().decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_wrong_segment_count() {
        let handler = handler();
        assert!(matches!(handler.decode(""), Err(JwtError::Malformed(_))));
        assert!(matches!(handler.decode("a.b"), Err(JwtError::Malformed(_))));
        assert!(matches!(handler.decode("a.b.c.d"), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let other = JwtHandler::new(
            &SigningSecret::new("secret2_at_least_32_bytes_long_key!").unwrap(),
        );
        let token = other
            .encode(&Claims::new("user123", TokenType::Access, future_exp()))
            .unwrap();

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::SignatureInvalid(_))));
    }

    #[test]
    fn test_decode_expired() {
        let handler = handler();
        let token = handler
            .encode(&Claims::new("user123", TokenType::Access, past_exp()))
            .unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_expired_at_exact_second() {
        let handler = handler();
        let token = handler
            .encode(&Claims::new("user123", TokenType::Access, 2000))
            .unwrap();

        assert!(handler.decode_at(&token, 1999).is_ok());
        assert_eq!(handler.decode_at(&token, 2000), Err(JwtError::Expired));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let other = JwtHandler::new(
            &SigningSecret::new("secret2_at_least_32_bytes_long_key!").unwrap(),
        );
        let token = other
            .encode(&Claims::new("user123", TokenType::Access, past_exp()))
            .unwrap();

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::SignatureInvalid(_))));
    }

    #[test]
    fn test_flipped_signature_bits_are_rejected() {
        let handler = handler();
        let token = handler
            .encode(&Claims::new("user123", TokenType::Access, future_exp()))
            .unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        for index in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();

            let result = handler.decode(&tampered);
            assert!(
                matches!(result, Err(JwtError::SignatureInvalid(_))),
                "tampered byte {} was not rejected: {:?}",
                index,
                result
            );
        }
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let header = b64(&json!({ "alg": "none", "typ": "JWT" }));
        let payload = b64(&json!({ "sub": "user123", "type": "access", "exp": future_exp() }));
        let token = format!("{}.{}.", header, payload);

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::SignatureInvalid(_))));
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let valid = sign_raw(
            Algorithm::HS256,
            &json!({ "sub": "user123", "type": "access", "exp": future_exp() }),
        );
        let mut segments = valid.split('.');
        let _ = segments.next();
        let payload = segments.next().unwrap();
        let signature = segments.next().unwrap();
        let header = b64(&json!({ "alg": "RS256", "typ": "JWT" }));
        let token = format!("{}.{}.{}", header, payload, signature);

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::SignatureInvalid(_))));
    }

    #[test]
    fn test_other_hmac_algorithms_are_accepted() {
        let token = sign_raw(
            Algorithm::HS512,
            &json!({ "sub": "user123", "type": "refresh", "exp": future_exp() }),
        );

        let claims = handler().decode(&token).expect("HS512 token should decode");
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_missing_type_claim_is_malformed() {
        let token = sign_raw(
            Algorithm::HS256,
            &json!({ "sub": "user123", "exp": future_exp() }),
        );

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_unknown_type_claim_is_malformed() {
        let token = sign_raw(
            Algorithm::HS256,
            &json!({ "sub": "user123", "type": "admin", "exp": future_exp() }),
        );

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_missing_exp_claim_is_malformed() {
        let token = sign_raw(
            Algorithm::HS256,
            &json!({ "sub": "user123", "type": "access" }),
        );

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_expiry_checked_before_claim_shape() {
        let token = sign_raw(
            Algorithm::HS256,
            &json!({ "type": "bogus", "exp": past_exp() }),
        );

        assert_eq!(handler().decode(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_empty_subject_is_malformed() {
        let token = sign_raw(
            Algorithm::HS256,
            &json!({ "sub": "", "type": "access", "exp": future_exp() }),
        );

        let result = handler().decode(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
