use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,
    pub refresh_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_refresh_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    /// Corporate domain gating self-registration and login, without the `@`.
    pub allowed_email_domain: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            refresh_token_ttl: env::var("REFRESH_TOKEN_TTL")
                .unwrap_or_else(|_| "604800".to_string()) // default 7 days
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_refresh_per_min: env::var("RATE_REFRESH_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            allowed_email_domain: env::var("ALLOWED_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "technetworkinc.com".to_string()),
        }
    }

    pub fn email_in_domain(&self, email: &str) -> bool {
        email
            .to_lowercase()
            .ends_with(&format!("@{}", self.allowed_email_domain.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_domain(domain: &str) -> Config {
        Config {
            database_url: String::new(),
            jwt_secret: String::new(),
            server_addr: String::new(),
            access_token_ttl: 900,
            refresh_token_ttl: 604800,
            rate_login_per_min: 60,
            rate_register_per_min: 30,
            rate_refresh_per_min: 30,
            rate_protected_per_min: 1000,
            api_prefix: "/api/v1".to_string(),
            allowed_email_domain: domain.to_string(),
        }
    }

    #[test]
    fn domain_gate_matches_suffix_case_insensitively() {
        let config = config_with_domain("technetworkinc.com");
        assert!(config.email_in_domain("jane@technetworkinc.com"));
        assert!(config.email_in_domain("Jane@TechNetworkInc.COM"));
        assert!(!config.email_in_domain("jane@gmail.com"));
        assert!(!config.email_in_domain("jane@nottechnetworkinc.com.evil.com"));
    }
}
