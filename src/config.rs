use std::{env, net::SocketAddr, path::PathBuf};

use crate::{
    access::{FixedSubscription, HttpSubscriptionProvider, Subscription, SubscriptionStatus},
    error::{Error, Result},
    source::{FileSource, Source, StaticSource},
};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// 启动配置，只在启动时从环境变量读取一次。
///
/// | 变量 | 含义 |
/// | --- | --- |
/// | `NEWSLETTER_DIR` | Markdown 目录，不设置时使用内置数据 |
/// | `NEWSLETTER_ADDR` | 监听地址，默认 `0.0.0.0:3000` |
/// | `SUBSCRIPTION_API_URL` | 订阅服务地址 |
/// | `SUBSCRIPTION_API_TOKEN` | 订阅服务的 `X-Api-Key` |
/// | `SUBSCRIPTION_DEFAULT` | 没有订阅服务时的固定状态：`paid`、`unpaid`、`loading` |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dir: Option<PathBuf>,
    pub addr: SocketAddr,
    pub subscription_url: Option<String>,
    pub subscription_token: Option<String>,
    pub subscription_default: SubscriptionStatus,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过 `lookup` 读取变量，空字符串视为未设置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = var("NEWSLETTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("NEWSLETTER_ADDR `{addr}` is not a socket address")))?;

        let subscription_default = match var("SUBSCRIPTION_DEFAULT") {
            None => SubscriptionStatus::UNPAID,
            Some(v) => parse_status(&v)?,
        };

        Ok(Self {
            dir: var("NEWSLETTER_DIR").map(PathBuf::from),
            addr,
            subscription_url: var("SUBSCRIPTION_API_URL"),
            subscription_token: var("SUBSCRIPTION_API_TOKEN"),
            subscription_default,
        })
    }

    pub fn source(&self) -> Result<Source> {
        match &self.dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "serving newsletters from directory");
                Ok(Source::Files(FileSource::new(dir)))
            }
            None => {
                let source = StaticSource::builtin()?;
                tracing::info!(count = source.len(), "serving built-in newsletters");
                Ok(Source::Static(source))
            }
        }
    }

    pub fn subscription(&self) -> Result<Subscription> {
        match &self.subscription_url {
            Some(url) => Ok(Subscription::Http(HttpSubscriptionProvider::new(
                url,
                self.subscription_token.as_deref(),
            )?)),
            None => Ok(Subscription::Fixed(FixedSubscription(
                self.subscription_default,
            ))),
        }
    }
}

fn parse_status(value: &str) -> Result<SubscriptionStatus> {
    match value.trim().to_ascii_lowercase().as_str() {
        "paid" => Ok(SubscriptionStatus::PAID),
        "unpaid" => Ok(SubscriptionStatus::UNPAID),
        "loading" => Ok(SubscriptionStatus::LOADING),
        _ => Err(Error::Config(format!(
            "SUBSCRIPTION_DEFAULT `{value}` must be one of paid, unpaid, loading"
        ))),
    }
}
