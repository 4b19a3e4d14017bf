//! 响应观察模块
//!
//! 启动时在共享客户端上挂载一次，之后被动观察每一个完成的 HTTP 响应。
//! 观察到 401 即触发一次强制跳转登录，独立于守卫的单次导航评估，
//! 可在任意时刻发生（包括没有导航待决时）。
//! 不修改、不重试、不吞掉原始响应：一次观察至多一次副作用。

use crate::web::http::ApiClient;

/// 会话失效的标志状态码
const UNAUTHORIZED: u16 = 401;

/// 挂载未授权响应观察者
///
/// `on_unauthorized` 由启动代码注入（通常是路由服务的强制登录跳转），
/// 观察逻辑本身不依赖路由服务，便于单独测试。
pub fn install_unauthorized_watch<F>(client: &ApiClient, on_unauthorized: F)
where
    F: Fn() + 'static,
{
    client.add_response_observer(move |status| {
        if status == UNAUTHORIZED {
            on_unauthorized();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn watched_client() -> (ApiClient, Rc<RefCell<u32>>) {
        let client = ApiClient::new("http://localhost:5000", true);
        let redirects = Rc::new(RefCell::new(0u32));
        let counter = redirects.clone();
        install_unauthorized_watch(&client, move || {
            *counter.borrow_mut() += 1;
        });
        (client, redirects)
    }

    // Scenario E: a 401 on any in-flight request forces the login redirect
    #[test]
    fn test_unauthorized_response_triggers_redirect() {
        let (client, redirects) = watched_client();

        client.notify_observers(401);

        assert_eq!(*redirects.borrow(), 1);
    }

    #[test]
    fn test_other_statuses_pass_through() {
        let (client, redirects) = watched_client();

        for status in [200u16, 201, 204, 400, 403, 404, 500, 502] {
            client.notify_observers(status);
        }

        assert_eq!(*redirects.borrow(), 0);
    }

    // One observation -> at most one side effect per response
    #[test]
    fn test_one_redirect_per_unauthorized_response() {
        let (client, redirects) = watched_client();

        client.notify_observers(401);
        client.notify_observers(200);
        client.notify_observers(401);

        assert_eq!(*redirects.borrow(), 2);
    }
}
