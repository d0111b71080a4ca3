//! Event classification and reply generation.

use std::future::Future;
use std::time::Duration;

use crate::{AppError, Result};

pub mod dispatcher;
pub mod forecast;
pub mod fortune;
pub mod todo;

/// Usage text returned for unsupported messages and malformed task commands.
pub const HELP_MESSAGE: &str = "使い方
テキストメッセージ:
\t\"おみくじ\"がメッセージに入ってれば今日の運勢を占うよ！
\tそれ以外はやまびこを返すよ！
スタンプ:
\tスタンプの情報を答えるよ！
位置情報:
\tその場所の天気・気温・湿度を答えるよ！
TodoList:
\t\"todo\"に続けて実行したい操作を入力してね！
\t\tlist
\t\tadd \"タスク名\" \"期限\"
\t\tdone \"タスクID\"
\t例:
\t\ttodo list
\t\ttodo add レポート 2/24
\t\ttodo done 12
それ以外:
\tそれ以外にはまだ対応してないよ！ごめんね...";

/// Fixed reply for weather failures; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "内部でエラーが発生しました";

/// Await `fut`, failing with `AppError::Timeout` once `budget` elapses.
pub(crate) async fn with_timeout<T>(
    what: &str,
    budget: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(budget, fut)
        .await
        .map_err(|_| AppError::Timeout(format!("{what} did not answer within {budget:?}")))?
}
