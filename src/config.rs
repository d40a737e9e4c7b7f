use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    // Role elevation at signup; None disables it.
    pub admin_signup_secret: Option<String>,
    pub therapist_signup_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Self {
            database_url: lookup("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "20")
                .parse()
                .expect("DATABASE_MAX_CONNECTIONS must be a number"),
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "5000").parse().expect("PORT must be a number"),
            frontend_url: var("FRONTEND_URL", "http://localhost:5173"),

            jwt_secret: lookup("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_ttl_secs: var("JWT_TTL_SECS", "604800") // 7 days
                .parse()
                .expect("JWT_TTL_SECS must be a number"),

            admin_signup_secret: lookup("ADMIN_SIGNUP_SECRET").filter(|s| !s.is_empty()),
            therapist_signup_secret: lookup("THERAPIST_SIGNUP_SECRET").filter(|s| !s.is_empty()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
