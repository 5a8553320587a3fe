mod provider;

use serde::{Deserialize, Serialize};

pub use self::provider::{
    FixedSubscription, HttpSubscriptionProvider, Subscription, SubscriptionProvider,
};

/// 外部订阅服务返回的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_paid: bool,
    pub is_loading: bool,
}

impl SubscriptionStatus {
    pub const PAID: Self = Self {
        is_paid: true,
        is_loading: false,
    };
    pub const UNPAID: Self = Self {
        is_paid: false,
        is_loading: false,
    };
    pub const LOADING: Self = Self {
        is_paid: false,
        is_loading: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Loading,
    Paid,
    Unpaid,
}

impl From<SubscriptionStatus> for SubscriptionState {
    fn from(status: SubscriptionStatus) -> Self {
        if status.is_loading {
            SubscriptionState::Loading
        } else if status.is_paid {
            SubscriptionState::Paid
        } else {
            SubscriptionState::Unpaid
        }
    }
}

/// 未付费用户看到的固定推广内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upsell {
    pub title: &'static str,
    pub message: &'static str,
    pub upgrade_href: &'static str,
    pub manage_href: &'static str,
}

pub const UPSELL: Upsell = Upsell {
    title: "Premium Feature",
    message: "This newsletter is exclusive to premium members. Unlock expert insights, early access content, and much more.",
    upgrade_href: "/pricing",
    manage_href: "/account",
};

/// 访问控制之后的输出
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Gated<T> {
    Loading,
    Locked { upsell: Upsell },
    Ready { data: T },
}

/// 根据订阅状态决定展示内容。
///
/// 无内部状态，每次调用都按传入的状态重新判断；付费时原样返回内容。
pub fn gate<T>(state: SubscriptionState, content: T) -> Gated<T> {
    match state {
        SubscriptionState::Loading => Gated::Loading,
        SubscriptionState::Unpaid => Gated::Locked { upsell: UPSELL },
        SubscriptionState::Paid => Gated::Ready { data: content },
    }
}
