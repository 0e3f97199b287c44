use actix_cors::Cors;
use actix_web::http::{Method, header};
use tracing::warn;

use crate::config::CorsConfig;

/// 启动时检查一次 CORS 配置
pub fn validate_cors_config(config: &CorsConfig) {
    if config.enabled && config.allowed_origins.is_empty() && !config.allow_private_network {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// `http(s)://<局域网 IPv4>:<port>` 形式的 Origin
///
/// 只接受 192.168.x.x、10.x.x.x、172.x.x.x，且必须带端口。
pub fn is_private_network_origin(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    let Some((host, port)) = rest.rsplit_once(':') else {
        return false;
    };
    if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let Ok(ip) = host.parse::<std::net::Ipv4Addr>() else {
        return false;
    };
    let [a, b, _, _] = ip.octets();
    a == 10 || a == 172 || (a == 192 && b == 168)
}

/// 按配置构造 CORS 中间件
///
/// 关闭时使用 `Cors::default()`，即浏览器的同源策略。
pub fn build_cors_middleware(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(
            crate::api::middleware::REQUEST_ID_HEADER,
        )])
        .max_age(config.max_age as usize);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    if config.allow_private_network {
        let exact = config.allowed_origins.clone();
        cors = cors.allowed_origin_fn(move |origin, _req_head| {
            origin.to_str().is_ok_and(|origin| {
                exact.iter().any(|o| o == origin) || is_private_network_origin(origin)
            })
        });
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
