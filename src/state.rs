use axum::extract::FromRef;

use crate::{access::Subscription, render::StyledRenderer, source::Source};

/// 应用程序上下文
///
/// [`AppState`] 封装了通讯来源、渲染器和订阅状态来源，三者都是只读的，可以廉价克隆。
#[derive(Debug, Clone, FromRef)]
pub struct AppState {
    source: Source,
    renderer: StyledRenderer,
    subscription: Subscription,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(source: Source, renderer: StyledRenderer, subscription: Subscription) -> Self {
        Self {
            source,
            renderer,
            subscription,
        }
    }
}
