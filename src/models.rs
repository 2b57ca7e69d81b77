use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterReqDto {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane.doe@technetworkinc.com", format = "email")]
    pub email: String,
    #[schema(example = "+15551234567", nullable = true)]
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "jane.doe@technetworkinc.com", format = "email")]
    pub email: String,
    pub password: String,
}

#[derive(FromRow)]
pub struct UserSql {
    pub id: u64,
    pub email: String,
    pub password: String, // argon2 hash, never the raw credential
    pub role_id: u8,
    pub employee_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String, // login email
    pub role: u8,    // role id
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
