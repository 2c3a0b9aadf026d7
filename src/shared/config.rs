use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use crate::shared::error::FolioError;
use crate::shared::result::Result;

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub profile: ProfileConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// GitHub API 配置
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub username: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            username: "DiwanMalla".to_string(),
            token: None,
            timeout_secs: 10,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// token 不能出现在日志里
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_capacity: u64,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            ttl_secs: 7200,
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "folio=info,tower_http=info".to_string(),
        }
    }
}

/// 个人资料（首页 Hero 区域）
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: Vec<ProfileLink>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Diwan Malla".to_string(),
            headline: "Full-Stack Developer".to_string(),
            bio: "Passionate developer building web applications, mobile solutions, and modern digital experiences.".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/49804228?v=4".to_string(),
            links: vec![
                ProfileLink::new("GitHub", "https://github.com/DiwanMalla"),
                ProfileLink::new("LinkedIn", "https://www.linkedin.com/in/diwan-malla-b51a79226/"),
                ProfileLink::new("Portfolio", "https://diwanportfolio.vercel.app/"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

impl ProfileLink {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FolioError::Config(e.to_string()))
    }

    /// 从命令行参数、配置文件和环境变量加载配置
    ///
    /// 优先级：命令行 > 环境变量（仅 token） > 配置文件 > 默认值
    pub fn from_args_and_file(
        path: &Path,
        bind_address: Option<SocketAddr>,
        username: Option<String>,
    ) -> Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Config::default()
        };

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                config.github.token = Some(token);
            }
        }

        config.apply_overrides(bind_address, username);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, bind_address: Option<SocketAddr>, username: Option<String>) {
        if let Some(addr) = bind_address {
            self.server.bind_address = addr;
        }
        if let Some(username) = username {
            self.github.username = username;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.github.username.trim().is_empty() {
            return Err(FolioError::Config("github.username must not be empty".to_string()));
        }
        if self.github.timeout_secs == 0 {
            return Err(FolioError::Config("github.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
