//! 会话解析模块
//!
//! 每次受保护的导航触发一次对身份端点的查询，结果只在当次守卫评估中使用，
//! 从不缓存：会话在两次导航之间过期，下一次受保护导航立刻重新检测到。
//! 解析器只读，不负责任何重定向。

use async_trait::async_trait;
use serde::Deserialize;

use crate::web::http::ApiClient;

/// 身份端点路径
const SESSION_ENDPOINT: &str = "/api/me";

/// 单次守卫评估中的会话快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub is_authenticated: bool,
    pub is_admin: bool,
}

/// 会话解析失败
///
/// 变体只用于日志区分；对守卫而言所有失败一律折叠为"未登录"。
#[derive(Debug)]
pub enum ResolverError {
    /// 网络层失败（请求未能完成）
    Network(String),
    /// 端点明确拒绝（非 2xx 状态码）
    Denied(u16),
    /// 载荷无法解析
    Malformed(String),
}

impl core::fmt::Display for ResolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResolverError::Network(msg) => write!(f, "会话查询网络失败: {}", msg),
            ResolverError::Denied(status) => write!(f, "会话查询被拒绝: {}", status),
            ResolverError::Malformed(msg) => write!(f, "会话载荷解析失败: {}", msg),
        }
    }
}

/// 会话解析器接口
///
/// 通过 trait 注入守卫，便于在测试中替换为 mock。
#[async_trait(?Send)]
pub trait SessionResolver {
    /// 执行一次身份查询
    async fn resolve(&self) -> Result<SessionInfo, ResolverError>;
}

#[derive(Deserialize)]
struct MePayload {
    user: MeUser,
}

#[derive(Deserialize)]
struct MeUser {
    #[serde(default)]
    is_admin: bool,
}

/// 解析身份端点的成功载荷
///
/// `user` 字段的存在即意味着已认证。
fn parse_session_payload(text: &str) -> Result<SessionInfo, ResolverError> {
    let payload: MePayload =
        serde_json::from_str(text).map_err(|e| ResolverError::Malformed(e.to_string()))?;
    Ok(SessionInfo {
        is_authenticated: true,
        is_admin: payload.user.is_admin,
    })
}

/// 基于共享客户端的 HTTP 会话解析器
pub struct HttpSessionResolver {
    client: ApiClient,
}

impl HttpSessionResolver {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl SessionResolver for HttpSessionResolver {
    async fn resolve(&self) -> Result<SessionInfo, ResolverError> {
        let res = self
            .client
            .get(SESSION_ENDPOINT)
            .send()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(ResolverError::Denied(res.status()));
        }

        let text = res
            .text()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        parse_session_payload(&text)
    }
}
