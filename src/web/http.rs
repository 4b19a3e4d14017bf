//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 提供简洁的 HTTP 客户端接口。
//! 客户端是一个显式构造的对象（基础 URL + 凭据模式），在启动时创建一次，
//! 由各调用方共享引用，取代进程级的全局默认配置。
//!
//! 客户端持有一个只增不减的响应观察者列表：每收到一个响应，
//! 按注册顺序同步通知所有观察者（只读，不修改、不重试、不吞掉响应）。

use std::cell::RefCell;
use std::rc::Rc;

use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// HTTP 错误类型
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "网络错误: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "响应解析失败: {}", msg),
        }
    }
}

/// 响应观察者：只接收状态码，同步执行
pub type ResponseObserver = Box<dyn Fn(u16)>;

struct ClientInner {
    base_url: String,
    with_credentials: bool,
    /// 观察者列表：只追加，注册后不可替换或移除
    observers: RefCell<Vec<ResponseObserver>>,
}

/// 共享 HTTP 客户端
///
/// 克隆即共享（内部 `Rc`），单线程环境下无需加锁。
/// `Rc` 外包一层 `SendWrapper`，以满足 Context 对 `Send + Sync`
/// 的约束（CSR 只有一个线程，包装永远不会跨线程解引用）。
#[derive(Clone)]
pub struct ApiClient {
    inner: SendWrapper<Rc<ClientInner>>,
}

impl ApiClient {
    /// 创建新的客户端
    ///
    /// # Arguments
    /// * `base_url` - 后端基础 URL，末尾斜杠会被去除
    /// * `with_credentials` - 是否随请求携带会话 Cookie
    pub fn new(base_url: &str, with_credentials: bool) -> Self {
        Self {
            inner: SendWrapper::new(Rc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                with_credentials,
                observers: RefCell::new(Vec::new()),
            })),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// 注册响应观察者（只追加）
    pub fn add_response_observer<F>(&self, observer: F)
    where
        F: Fn(u16) + 'static,
    {
        self.inner.observers.borrow_mut().push(Box::new(observer));
    }

    /// 按注册顺序同步通知所有观察者
    pub(crate) fn notify_observers(&self, status: u16) {
        for observer in self.inner.observers.borrow().iter() {
            observer(status);
        }
    }

    /// 创建 GET 请求
    pub fn get(&self, path: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), path, HttpMethod::Get)
    }

    /// 创建 POST 请求
    pub fn post(&self, path: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), path, HttpMethod::Post)
    }
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// 获取 HTTP 状态码
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 获取响应体文本
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    client: ApiClient,
    path: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequestBuilder {
    fn new(client: ApiClient, path: &str, method: HttpMethod) -> Self {
        Self {
            client,
            path: path.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn json(self, body: String) -> Self {
        let mut builder = self.header("Content-Type", "application/json");
        builder.body = Some(body);
        builder
    }

    /// 发送请求
    ///
    /// 收到响应后（无论状态码），按注册顺序通知客户端上的所有观察者。
    /// 网络层失败没有响应可观察，直接返回错误。
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(self.method.as_str());
        opts.set_headers(&headers.into());

        if self.client.inner.with_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        if let Some(body) = &self.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let url = self.client.url(&self.path);
        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
        })?;

        self.client.notify_observers(response.status());

        Ok(HttpResponse { inner: response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 客户端要放进 Leptos Context，必须满足 `Send + Sync + Clone`
    #[test]
    fn test_client_satisfies_context_bounds() {
        fn assert_context_ready<T: Send + Sync + Clone + 'static>() {}
        assert_context_ready::<ApiClient>();
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:5000/", true);
        assert_eq!(client.url("/api/me"), "http://localhost:5000/api/me");
        assert_eq!(client.url("api/me"), "http://localhost:5000/api/me");
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let client = ApiClient::new("http://localhost:5000", true);
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let log_a = log.clone();
        client.add_response_observer(move |status| {
            log_a.borrow_mut().push(format!("a:{}", status));
        });
        let log_b = log.clone();
        client.add_response_observer(move |status| {
            log_b.borrow_mut().push(format!("b:{}", status));
        });

        client.notify_observers(200);
        client.notify_observers(401);

        assert_eq!(
            *log.borrow(),
            vec!["a:200", "b:200", "a:401", "b:401"]
        );
    }

    #[test]
    fn test_observer_list_is_append_only() {
        let client = ApiClient::new("http://localhost:5000", false);
        let count = Rc::new(RefCell::new(0u32));

        // 两次注册同类观察者：后注册的不会替换先注册的
        for _ in 0..2 {
            let count = count.clone();
            client.add_response_observer(move |_| {
                *count.borrow_mut() += 1;
            });
        }

        client.notify_observers(500);
        assert_eq!(*count.borrow(), 2);
    }
}
