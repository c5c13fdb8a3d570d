use thiserror::Error;

use crate::utils::AppError;

/// 服务器生命周期错误 (启动、监听、关闭)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("网络错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err.to_string())
    }
}

/// 生命周期 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
