use axum::http::{HeaderMap, HeaderValue, header};

use super::SubscriptionStatus;
use crate::error::{Error, Result};

/// 订阅状态的提供方，只读。
pub trait SubscriptionProvider: Send + Sync {
    /// 查询当前访问者的订阅状态，`credential` 为访问者携带的 bearer token。
    fn status(&self, credential: Option<&str>) -> impl Future<Output = SubscriptionStatus> + Send;
}

/// 固定返回同一状态，用于开发环境和测试
#[derive(Debug, Clone, Copy)]
pub struct FixedSubscription(pub SubscriptionStatus);

impl SubscriptionProvider for FixedSubscription {
    async fn status(&self, _credential: Option<&str>) -> SubscriptionStatus {
        self.0
    }
}

/// 通过 HTTP 向账户服务查询订阅状态。
///
/// 请求 `GET <base_url>/subscription`，转发访问者的 bearer token，
/// 期望返回 `{ "isPaid": bool, "isLoading": bool }`。
#[derive(Debug, Clone)]
pub struct HttpSubscriptionProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubscriptionProvider {
    /// `api_key` 作为本服务自身的身份，通过 `X-Api-Key` 头发送。
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| Error::Config("SUBSCRIPTION_API_TOKEN is not a valid header".into()))?;
            headers.insert("x-api-key", value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/subscription", base_url.trim_end_matches('/')),
        })
    }

    async fn fetch(&self, token: &str) -> Result<SubscriptionStatus> {
        let resp = self
            .client
            .get(&self.endpoint)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }
}

impl SubscriptionProvider for HttpSubscriptionProvider {
    async fn status(&self, credential: Option<&str>) -> SubscriptionStatus {
        let Some(token) = credential else {
            return SubscriptionStatus::UNPAID;
        };

        match self.fetch(token).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(%e, "subscription lookup failed, treating as unpaid");
                SubscriptionStatus::UNPAID
            }
        }
    }
}

/// 应用实际持有的订阅状态来源
#[derive(Debug, Clone)]
pub enum Subscription {
    Fixed(FixedSubscription),
    Http(HttpSubscriptionProvider),
}

impl SubscriptionProvider for Subscription {
    async fn status(&self, credential: Option<&str>) -> SubscriptionStatus {
        match self {
            Subscription::Fixed(p) => p.status(credential).await,
            Subscription::Http(p) => p.status(credential).await,
        }
    }
}
