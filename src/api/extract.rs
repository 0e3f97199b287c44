//! Event id extraction
//!
//! 优先使用路由参数 `{id}`；缺失或为空时依次回退到查询参数 `id`
//! 和原始路径中 `events` 之后的那一段（percent-decode 后）。

use std::collections::HashMap;

use actix_web::{HttpRequest, web};

/// 从请求中解析事件 id，三种来源都没有时返回 None
pub fn resolve_event_id(req: &HttpRequest) -> Option<String> {
    if let Some(id) = req.match_info().get("id").and_then(non_empty) {
        return Some(id);
    }

    if let Ok(query) = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        && let Some(id) = query.get("id").and_then(|v| non_empty(v))
    {
        return Some(id);
    }

    event_id_from_path(req.path())
}

/// 取路径中 `events` 段之后的下一段
pub fn event_id_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments.find(|s| *s == "events")?;
    let raw = segments.next()?;

    let decoded = urlencoding::decode(raw).ok()?;
    non_empty(&decoded)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
