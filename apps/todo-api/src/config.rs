use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig,
};
use domain_todos::MiddlewareKind;
use strum::{Display, EnumString};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Backing store selected by `TODO_STORE`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    Mongodb,
    Memory,
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreKind,
    pub collection: String,
    /// Decorators in wrapping order, first is outermost
    pub middleware: Vec<MiddlewareKind>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let store = env_parse("TODO_STORE", StoreKind::Mongodb)?;
        let collection =
            env_or_default("MONGODB_COLLECTION", domain_todos::mongodb::DEFAULT_COLLECTION);

        let middleware_list = env_or_default("TODO_MIDDLEWARE", "logging,metrics");
        let middleware =
            MiddlewareKind::parse_list(&middleware_list).map_err(|e| ConfigError::ParseError {
                key: "TODO_MIDDLEWARE".to_string(),
                details: e.to_string(),
            })?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            store,
            collection,
            middleware,
        })
    }
}
