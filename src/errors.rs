use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// 5xx 响应统一使用的对外消息，不暴露内部细节
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone)]
pub enum CalclickError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    MethodNotAllowed(String),
    Serialization(String),
    FileOperation(String),
}

impl CalclickError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CalclickError::DatabaseConfig(_) => "E001",
            CalclickError::DatabaseConnection(_) => "E002",
            CalclickError::DatabaseOperation(_) => "E003",
            CalclickError::Validation(_) => "E004",
            CalclickError::NotFound(_) => "E005",
            CalclickError::MethodNotAllowed(_) => "E006",
            CalclickError::Serialization(_) => "E007",
            CalclickError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CalclickError::DatabaseConfig(_) => "Database Configuration Error",
            CalclickError::DatabaseConnection(_) => "Database Connection Error",
            CalclickError::DatabaseOperation(_) => "Database Operation Error",
            CalclickError::Validation(_) => "Validation Error",
            CalclickError::NotFound(_) => "Resource Not Found",
            CalclickError::MethodNotAllowed(_) => "Method Not Allowed",
            CalclickError::Serialization(_) => "Serialization Error",
            CalclickError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CalclickError::DatabaseConfig(msg)
            | CalclickError::DatabaseConnection(msg)
            | CalclickError::DatabaseOperation(msg)
            | CalclickError::Validation(msg)
            | CalclickError::NotFound(msg)
            | CalclickError::MethodNotAllowed(msg)
            | CalclickError::Serialization(msg)
            | CalclickError::FileOperation(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            CalclickError::Validation(_) => StatusCode::BAD_REQUEST,
            CalclickError::NotFound(_) => StatusCode::NOT_FOUND,
            CalclickError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 客户端错误可以原样返回消息，服务端错误不可以
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于启动失败等场景）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CalclickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CalclickError {}

impl ResponseError for CalclickError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        let body = if self.is_client_error() {
            json!({ "error": self.message() })
        } else {
            tracing::error!("[{}] {}", self.code(), self.format_simple());
            json!({
                "error": "Internal Server Error",
                "message": GENERIC_FAILURE_MESSAGE,
            })
        };

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(body)
    }
}

// 便捷的构造函数
impl CalclickError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CalclickError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CalclickError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CalclickError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CalclickError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CalclickError::NotFound(msg.into())
    }

    pub fn method_not_allowed<T: Into<String>>(msg: T) -> Self {
        CalclickError::MethodNotAllowed(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CalclickError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CalclickError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for CalclickError {
    fn from(err: sea_orm::DbErr) -> Self {
        CalclickError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CalclickError {
    fn from(err: std::io::Error) -> Self {
        CalclickError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CalclickError {
    fn from(err: serde_json::Error) -> Self {
        CalclickError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalclickError>;
