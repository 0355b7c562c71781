//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use booking_core::BookingError;
use booking_shared::config::AuthConfig;

use crate::error::ApiError;

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户 ID
    pub sub: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("无效的用户 ID".to_string()))
    }
}

/// 已认证用户，由认证中间件注入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    issuer: String,
    expires_in_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            expires_in_secs: config.jwt_expires_secs,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// 生成 JWT Token，返回 Token 及过期时间戳
    pub fn generate_token(&self, user_id: i64) -> Result<(String, i64), ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BookingError::Internal(format!("JWT 生成失败: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// Token 无效、过期或签发者不符时返回 Unauthorized
    pub fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::Unauthorized("Token 已过期".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    ApiError::Unauthorized("无效的 Token".to_string())
                }
                _ => ApiError::Unauthorized(format!("Token 验证失败: {}", e)),
            },
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_manager(secret: &str, issuer: &str) -> JwtManager {
        JwtManager::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_expires_secs: 3600,
            issuer: issuer.to_string(),
        })
    }

    #[test]
    fn test_generate_and_verify_token() {
        let manager = create_manager("test-secret", "hotel-booking");
        let (token, exp) = manager.generate_token(42).unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.iss, "hotel-booking");
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = create_manager("secret-a", "hotel-booking");
        let verifier = create_manager("secret-b", "hotel-booking");
        let (token, _) = issuer.generate_token(1).unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let issuer = create_manager("secret", "someone-else");
        let verifier = create_manager("secret", "hotel-booking");
        let (token, _) = issuer.generate_token(1).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = JwtManager::new(&AuthConfig {
            jwt_secret: "secret".to_string(),
            jwt_expires_secs: -3600,
            issuer: "hotel-booking".to_string(),
        });
        let (token, _) = manager.generate_token(1).unwrap();

        assert!(matches!(
            manager.verify_token(&token),
            Err(ApiError::Unauthorized(msg)) if msg.contains("过期")
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let manager = create_manager("secret", "hotel-booking");
        assert!(manager.verify_token("not-a-jwt").is_err());
    }
}
