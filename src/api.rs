use gloo_net::http::{Request, RequestBuilder};
use web_sys::{File, FormData, UrlSearchParams};

use crate::auth;
use crate::protocol::{AnalysisHistoryItem, AnalysisResponse, SignupRequest, TokenResponse};

/// 请求网关错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求构建或网络传输失败
    Network(String),
    /// 后端返回非 2xx 状态码
    Status(u16),
    /// 响应体解析失败
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status(code) => write!(f, "server responded with status {}", code),
            ApiError::Decode(msg) => write!(f, "failed to decode response: {}", msg),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResumeAiApi {
    pub base_url: String,
}

impl ResumeAiApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 横切关注点：每个出站请求在发送前都经过这里。
    // Token 在请求时从 Token Store 读取而不是在构造客户端时快照，
    // 有令牌则注入 Bearer 凭据，没有则按未认证请求发出。
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match auth::stored_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// 登录，换取访问令牌
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form =
            UrlSearchParams::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        form.append("username", email);
        form.append("password", password);

        // UrlSearchParams 作为 body 时浏览器会自动携带
        // application/x-www-form-urlencoded 的 Content-Type
        let res = self
            .authorized(Request::post(&self.url("/auth/login")))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }

        res.json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 注册新账号（成功与否都不建立会话）
    pub async fn signup(&self, profile: &SignupRequest) -> Result<(), ApiError> {
        let res = self
            .authorized(Request::post(&self.url("/auth/signup")))
            .json(profile)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }

        Ok(())
    }

    /// 提交简历与职位描述，获取分析结果
    pub async fn analyze(
        &self,
        job_description: &str,
        resume_file: &File,
    ) -> Result<AnalysisResponse, ApiError> {
        let form = FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        form.append_with_blob("resume_file", resume_file)
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        form.append_with_str("job_description", job_description)
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

        // multipart 边界由浏览器生成，这里不手动设置 Content-Type
        let res = self
            .authorized(Request::post(&self.url("/analysis/")))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }

        res.json::<AnalysisResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 拉取当前用户的历史分析记录
    pub async fn history(&self) -> Result<Vec<AnalysisHistoryItem>, ApiError> {
        let res = self
            .authorized(Request::get(&self.url("/analysis/history")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }

        res.json::<Vec<AnalysisHistoryItem>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ResumeAiApi::new("http://localhost:8000/".to_string());
        assert_eq!(api.url("/auth/login"), "http://localhost:8000/auth/login");
    }

    #[test]
    fn relative_paths_get_a_separator() {
        let api = ResumeAiApi::new("http://localhost:8000".to_string());
        assert_eq!(api.url("analysis/"), "http://localhost:8000/analysis/");
    }
}
