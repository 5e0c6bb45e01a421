use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 邮箱验证条目，每个邮箱同时只存在一条，重发即覆盖
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/verification.ts")]
pub struct VerificationEntry {
    pub email: String,
    #[serde(skip_serializing, default)] // 验证码不进 JSON 响应
    #[ts(skip)]
    pub code: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub verified: bool,
}

impl VerificationEntry {
    /// 验证窗口：发码后 600 秒内有效
    pub const VALIDITY_SECS: i64 = 600;

    /// 校验是否接受提交的验证码。
    ///
    /// 接受条件：尚未验证过、码面完全一致、距发码不足 600 秒。
    /// 过期不落库，由当前时间现算，超窗条目等同未发码。
    pub fn accepts(&self, submitted_code: &str, now: chrono::DateTime<chrono::Utc>) -> bool {
        !self.verified
            && self.code == submitted_code
            && (now - self.issued_at).num_seconds() < Self::VALIDITY_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(code: &str, issued_at: chrono::DateTime<Utc>, verified: bool) -> VerificationEntry {
        VerificationEntry {
            email: "student@example.com".to_string(),
            code: code.to_string(),
            issued_at,
            verified,
        }
    }

    #[test]
    fn test_accepts_within_window() {
        let t0 = Utc::now();
        let e = entry("482913", t0, false);
        assert!(e.accepts("482913", t0 + Duration::seconds(599)));
    }

    #[test]
    fn test_rejects_at_window_boundary() {
        let t0 = Utc::now();
        let e = entry("482913", t0, false);
        // 第 600 秒整已在窗口之外
        assert!(!e.accepts("482913", t0 + Duration::seconds(600)));
        assert!(!e.accepts("482913", t0 + Duration::seconds(601)));
    }

    #[test]
    fn test_rejects_wrong_code() {
        let t0 = Utc::now();
        let e = entry("482913", t0, false);
        assert!(!e.accepts("482914", t0 + Duration::seconds(1)));
        assert!(!e.accepts("", t0 + Duration::seconds(1)));
    }

    #[test]
    fn test_one_shot_semantics() {
        let t0 = Utc::now();
        let e = entry("482913", t0, true);
        // 已验证过的条目对任何码都拒绝
        assert!(!e.accepts("482913", t0 + Duration::seconds(1)));
    }

    #[test]
    fn test_reissue_supersedes_old_window() {
        let t0 = Utc::now();
        // 旧条目已超窗
        let old = entry("482913", t0, false);
        assert!(!old.accepts("482913", t0 + Duration::seconds(600) + Duration::milliseconds(500)));

        // 同码重发后按新 issued_at 计窗
        let reissued = entry("482913", t0 + Duration::seconds(600), false);
        assert!(
            reissued.accepts("482913", t0 + Duration::seconds(600) + Duration::milliseconds(500))
        );
    }
}
