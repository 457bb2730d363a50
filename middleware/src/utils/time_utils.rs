use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// 当前UTC时间,截断到毫秒
///
/// 传输格式只有毫秒精度,截断后内存中的值与发送的值一致。
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// 格式化为ISO-8601 (毫秒精度, `Z` 后缀)
///
/// 例: 2025-10-05 10:30:45.123456 UTC → "2025-10-05T10:30:45.123Z"
pub fn format_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 解析ISO-8601时间字符串,统一转换为UTC
pub fn parse_iso(time_str: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(time_str).map(|dt| dt.with_timezone(&Utc))
}

/// serde适配: `DateTime<Utc>` <-> 毫秒精度ISO-8601字符串
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_iso_millis(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso(&raw).map_err(serde::de::Error::custom)
    }
}
