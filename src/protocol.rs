//! 后端接口的数据契约
//!
//! 本应用只通过 HTTP 消费后端，不在仓库内实现它；
//! 这里的类型即是与后端之间的全部约定。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 简历文件允许的扩展名
pub const RESUME_FILE_EXTENSIONS: &[&str] = &[".pdf", ".docx"];

// =========================================================
// 认证接口 (Auth)
// =========================================================

/// `POST /auth/login` 的响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// `POST /auth/signup` 的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =========================================================
// 分析接口 (Analysis)
// =========================================================

/// `POST /analysis/` 的响应体：一次完整的简历分析结果
///
/// 结果一经收到即不可变，下一次成功提交会整体取代它。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// 匹配度，区间 [0, 100]
    pub match_score: f64,
    pub missing_skills: Vec<String>,
    pub resume_suggestions: Vec<String>,
    pub generated_cover_letter: String,
}

impl AnalysisResponse {
    /// 以两位小数的百分比格式化匹配度
    pub fn formatted_score(&self) -> String {
        format_match_score(self.match_score)
    }
}

/// `GET /analysis/history` 的条目，按分析时间倒序返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryItem {
    pub id: String,
    /// 后端以不带时区的 UTC 时间戳返回
    pub analyzed_at: NaiveDateTime,
    pub match_score: f64,
    pub missing_skills: Vec<String>,
    pub resume_suggestions: Vec<String>,
    pub generated_cover_letter: String,
}

// =========================================================
// 展示与校验辅助 (Helpers)
// =========================================================

/// 匹配度的统一展示格式，如 87.5 -> "87.50%"
pub fn format_match_score(score: f64) -> String {
    format!("{:.2}%", score)
}

/// 判断文件名是否带有受支持的简历扩展名（大小写不敏感）
pub fn is_supported_resume_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RESUME_FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_response_parses_backend_payload() {
        let raw = r#"{
            "match_score": 87.5,
            "missing_skills": ["Kubernetes", "Terraform"],
            "resume_suggestions": ["Quantify achievements with numbers"],
            "generated_cover_letter": "Dear Hiring Manager,"
        }"#;
        let parsed: AnalysisResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.match_score, 87.5);
        assert_eq!(parsed.missing_skills.len(), 2);
        assert_eq!(parsed.resume_suggestions[0], "Quantify achievements with numbers");
    }

    #[test]
    fn match_score_renders_two_decimals() {
        assert_eq!(format_match_score(87.5), "87.50%");
        assert_eq!(format_match_score(100.0), "100.00%");
        assert_eq!(format_match_score(0.0), "0.00%");
    }

    #[test]
    fn token_response_tolerates_missing_token_type() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"access_token":"tok123"}"#).unwrap();
        assert_eq!(parsed.access_token, "tok123");
        assert!(parsed.token_type.is_empty());
    }

    #[test]
    fn signup_request_uses_backend_field_names() {
        let body = serde_json::to_value(SignupRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        assert_eq!(body["name"], "Ada Lovelace");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["password"], "secret");
    }

    #[test]
    fn resume_extension_check_is_case_insensitive() {
        assert!(is_supported_resume_name("resume.pdf"));
        assert!(is_supported_resume_name("Resume.DOCX"));
        assert!(!is_supported_resume_name("resume.txt"));
        assert!(!is_supported_resume_name("resume"));
    }

    #[test]
    fn history_item_parses_naive_timestamp() {
        let raw = r#"{
            "id": "665f1c2e9b3e4a1d2c3b4a59",
            "analyzed_at": "2025-06-04T18:21:07.123456",
            "match_score": 64.25,
            "missing_skills": [],
            "resume_suggestions": [],
            "generated_cover_letter": ""
        }"#;
        let parsed: AnalysisHistoryItem = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.analyzed_at.date().to_string(), "2025-06-04");
        assert_eq!(parsed.match_score, 64.25);
    }
}
