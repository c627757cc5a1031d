use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Decides the running environment from the `ENV` variable.
/// Anything other than "production" falls back to development.
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Ok(v) if v == "production" => Environment::Production,
        Ok(_) => Environment::Development,
        Err(_) => default_env,
    }
}
