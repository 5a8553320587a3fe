use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts},
    routing::get,
};
use axum_extra::extract::Query;
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    access::{Gated, Subscription, SubscriptionProvider, SubscriptionState, gate},
    content::{NewsletterRecord, Slug},
    error::{Error, Result},
    filters::FilterState,
    listing::{Group, available_years, filter_and_group},
    render::{Renderer, StyledRenderer},
    source::{NewsletterSource, Resolver, Source},
    state::AppState,
};

/// 列表项跳转的详情页前缀
pub const DASHBOARD_PREFIX: &str = "/dashboard/newsletter/";

/// 配置通讯相关路由。
///
/// 路由包括：
/// - `GET /newsletters`：按条件筛选并分组的列表
/// - `GET /newsletters/{slug}`：单篇通讯
/// - `GET /years`：筛选用的年份
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/newsletters", get(newsletter_list))
        .route("/newsletters/{slug}", get(newsletter))
        .route("/years", get(year_list))
}

/// 访问者携带的 bearer token，原样转发给订阅服务。
#[derive(Debug, Clone, Default)]
pub struct Credential(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for Credential {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> core::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        Ok(Credential(token))
    }
}

/// 列表中的一条通讯。
#[derive(Debug, Serialize)]
pub struct ListItem {
    pub id: String,
    pub slug: Slug,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub href: String,
}

impl From<&NewsletterRecord> for ListItem {
    fn from(record: &NewsletterRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            title: record.title.clone(),
            date: record.date,
            excerpt: record.excerpt.clone(),
            href: format!("{DASHBOARD_PREFIX}{}", record.slug),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListGroup {
    pub label: String,
    pub items: Vec<ListItem>,
}

impl From<Group<'_>> for ListGroup {
    fn from(group: Group<'_>) -> Self {
        Self {
            label: group.label,
            items: group.items.into_iter().map(ListItem::from).collect(),
        }
    }
}

/// 列表页数据：年份选项和分组结果。
#[derive(Debug, Serialize)]
pub struct Listing {
    pub years: Vec<i32>,
    pub groups: Vec<ListGroup>,
}

/// 单篇通讯，正文已渲染为 HTML。
#[derive(Debug, Serialize)]
pub struct Detail {
    pub id: String,
    pub slug: Slug,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub html: String,
}

/// 筛选并分组通讯列表。
///
/// 查询参数非法时返回 [`Error::InvalidQuery`]；内容按订阅状态经过 [`gate`]。
async fn newsletter_list(
    State(source): State<Source>,
    State(subscription): State<Subscription>,
    Credential(credential): Credential,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Gated<Listing>>> {
    let query = FilterState::from_pairs(pairs).listing_query()?;

    let status = subscription.status(credential.as_deref()).await;

    let records = source.list_all().await;
    let listing = Listing {
        years: available_years(&records),
        groups: filter_and_group(&records, &query)
            .into_iter()
            .map(ListGroup::from)
            .collect(),
    };

    Ok(Json(gate(SubscriptionState::from(status), listing)))
}

/// 根据 slug 获取单篇通讯。
///
/// 不存在时返回 [`Error::NotFound`]，与订阅状态无关。
async fn newsletter(
    Path(slug): Path<String>,
    State(source): State<Source>,
    State(renderer): State<StyledRenderer>,
    State(subscription): State<Subscription>,
    Credential(credential): Credential,
) -> Result<Json<Gated<Detail>>> {
    let record = Resolver::new(&source)
        .resolve(&slug)
        .await
        .ok_or(Error::NotFound)?;

    let status = subscription.status(credential.as_deref()).await;

    let html = renderer.render(&record.content);
    let detail = Detail {
        id: record.id,
        slug: record.slug,
        title: record.title,
        date: record.date,
        excerpt: record.excerpt,
        html,
    };

    Ok(Json(gate(SubscriptionState::from(status), detail)))
}

/// 获取全部年份，倒序。
async fn year_list(State(source): State<Source>) -> Json<Vec<i32>> {
    Json(available_years(&source.list_all().await))
}
