use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_chat::{ChatSettings, OpenAIChatConfig};
use domain_listings::{OpenAIEmbeddingConfig, RetrievalSettings};

pub use core_config::Environment;

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Collection and vector index used by the chat flow
    pub retrieval: RetrievalSettings,
    pub chat: ChatSettings,
    pub embedding: OpenAIEmbeddingConfig,
    pub completion: OpenAIChatConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            retrieval: RetrievalSettings::from_env()?,
            chat: ChatSettings::from_env()?,
            embedding: OpenAIEmbeddingConfig::from_env()?,
            completion: OpenAIChatConfig::from_env()?,
        })
    }
}
