use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// 日历平台
///
/// 对外只接受这两个值（大小写敏感），存储层以字符串保存。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Google,
    Apple,
}

impl Platform {
    /// 所有合法取值，用于错误提示
    pub fn variants() -> Vec<&'static str> {
        Platform::iter().map(|p| p.as_str()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Apple => "apple",
        }
    }
}

/// 一次点击计数的定位键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatKey {
    pub event_id: String,
    pub platform: Platform,
}

impl StatKey {
    pub fn new(event_id: impl Into<String>, platform: Platform) -> Self {
        Self {
            event_id: event_id.into(),
            platform,
        }
    }
}

/// 单个 (事件, 平台) 的计数行
///
/// platform 保持存储中的原始字符串，不在这里做枚举校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarStat {
    pub event_id: String,
    pub platform: String,
    pub count: i64,
}

impl CalendarStat {
    /// 解析为已知平台，未知值返回 None
    pub fn known_platform(&self) -> Option<Platform> {
        self.platform.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    /// 首次点击时自动创建的最小事件，名称即 id
    pub fn minimal(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: None,
        }
    }
}

/// 按平台汇总的计数，两个键始终存在
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCounts {
    pub google: i64,
    pub apple: i64,
}

impl PlatformCounts {
    pub fn get(&self, platform: Platform) -> i64 {
        match platform {
            Platform::Google => self.google,
            Platform::Apple => self.apple,
        }
    }

    pub fn add(&mut self, platform: Platform, count: i64) {
        match platform {
            Platform::Google => self.google += count,
            Platform::Apple => self.apple += count,
        }
    }

    /// 汇总计数行，忽略未知平台
    pub fn from_stats<'a, I>(stats: I) -> Self
    where
        I: IntoIterator<Item = &'a CalendarStat>,
    {
        stats.into_iter().fold(Self::default(), |mut acc, stat| {
            if let Some(platform) = stat.known_platform() {
                acc.add(platform, stat.count.max(0));
            }
            acc
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(event: &str, platform: &str, count: i64) -> CalendarStat {
        CalendarStat {
            event_id: event.to_string(),
            platform: platform.to_string(),
            count,
        }
    }

    #[test]
    fn test_platform_parse_is_case_sensitive() {
        assert_eq!("google".parse::<Platform>().ok(), Some(Platform::Google));
        assert_eq!("apple".parse::<Platform>().ok(), Some(Platform::Apple));
        assert!("Google".parse::<Platform>().is_err());
        assert!("outlook".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_as_str_matches_strum() {
        for platform in Platform::iter() {
            assert_eq!(platform.as_str(), platform.as_ref());
            assert_eq!(platform.to_string(), platform.as_str());
        }
    }

    #[test]
    fn test_counts_ignore_unknown_platforms() {
        let stats = vec![
            stat("a", "google", 2),
            stat("a", "apple", 4),
            stat("b", "google", 1),
            stat("b", "outlook", 9),
        ];
        let counts = PlatformCounts::from_stats(&stats);
        assert_eq!(counts, PlatformCounts { google: 3, apple: 4 });
    }

    #[test]
    fn test_counts_empty_is_zero() {
        let counts = PlatformCounts::from_stats(&Vec::<CalendarStat>::new());
        assert_eq!(counts.google, 0);
        assert_eq!(counts.apple, 0);
    }

    #[test]
    fn test_calendar_stat_serializes_camel_case() {
        let json = serde_json::to_value(stat("fest", "apple", 3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "eventId": "fest", "platform": "apple", "count": 3 })
        );
    }

    #[test]
    fn test_minimal_event_named_after_id() {
        let event = Event::minimal("lumenfest-2025");
        assert_eq!(event.name, "lumenfest-2025");
        assert!(event.description.is_none());
    }
}
