//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、kataエンジン全体で使用される統一的なエラー型と
//! エラー報告システムを提供します。照合失敗（NoMatch）はエラーでは
//! なく通常の制御値なので、ここには現れません。

use crate::pattern::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// kataエンジンの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KataError {
    /// パターン検証エラー（コンパイル時）
    #[error("パターン検証エラー")]
    Validate(#[from] ValidateError),

    /// 照合実行エラー（実行時）
    #[error("照合エラー")]
    Match(#[from] MatchError),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// パターン検証エラーの詳細
///
/// いずれもパターン構造の誤りで、検証に失敗したパターンは一度も
/// 照合されない。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidateError {
    #[error("変数名 {name} が重複しています")]
    DuplicateBinding { name: String, span: Span },

    #[error("ローカル変数 {name} は存在しません")]
    UndefinedPinReference { name: String, span: Span },

    #[error("選択パターンの中で変数 {name} を束縛することはできません")]
    IllegalAlternativeBinding { name: String, span: Span },

    #[error("キー {key} はローカル変数名として有効ではありません")]
    InvalidImplicitKey { key: String, span: Span },

    #[error("キー名 {key} が重複しています")]
    DuplicateKey { key: String, span: Span },
}

/// 照合実行エラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// 候補値がパターンの要求する分解をサポートしていない。
    /// NoMatchには変換されず、必ずホスト境界まで伝播する。
    #[error("{value} は {expected} への分解をサポートしていません")]
    TypeMismatch {
        value: String,
        expected: String,
        span: Span,
    },

    /// どの節にもマッチせず、既定節も存在しない
    #[error("{value} はどのパターンにもマッチしませんでした")]
    NoMatchingPattern { value: String },
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: KataError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: KataError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            KataError::Validate(e) => self.validate_error_to_diagnostic(e),
            KataError::Match(e) => match e {
                MatchError::TypeMismatch {
                    value,
                    expected,
                    span,
                } => (
                    format!("{} は {} への分解をサポートしていません", value, expected),
                    vec![Label::primary(self.file_id, span.start..span.end)
                        .with_message("このパターンが分解を要求しています")],
                ),
                MatchError::NoMatchingPattern { value } => (
                    format!("{} はどのパターンにもマッチしませんでした", value),
                    vec![],
                ),
            },
            KataError::Other(message) => (message.clone(), vec![]),
        };

        Diagnostic::error()
            .with_message(message)
            .with_labels(labels)
    }

    fn validate_error_to_diagnostic(&self, e: &ValidateError) -> (String, Vec<Label<usize>>) {
        match e {
            ValidateError::DuplicateBinding { name, span } => (
                format!("変数名 {} が重複しています", name),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("この変数は既にこのパターンで束縛されています")],
            ),
            ValidateError::UndefinedPinReference { name, span } => (
                format!("ローカル変数 {} は存在しません", name),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("ピンは外側スコープの変数しか参照できません")],
            ),
            ValidateError::IllegalAlternativeBinding { name, span } => (
                format!("選択パターンの中で変数 {} を束縛することはできません", name),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("どの分岐が束縛したか曖昧になります")],
            ),
            ValidateError::InvalidImplicitKey { key, span } => (
                format!("キー {} はローカル変数名として有効ではありません", key),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("値パターンを明示してください")],
            ),
            ValidateError::DuplicateKey { key, span } => (
                format!("キー名 {} が重複しています", key),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("重複したキー")],
            ),
        }
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: KataError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// 最初のエラーを取得
    pub fn first_error(&self) -> Option<&DiagnosticError> {
        self.errors.first()
    }

    /// エラーをクリア
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Result型のエイリアス
pub type KataResult<T> = Result<T, KataError>;

/// エラー変換用のヘルパートレイト
pub trait IntoKataError {
    fn into_kata_error(self) -> KataError;
}

impl IntoKataError for anyhow::Error {
    fn into_kata_error(self) -> KataError {
        KataError::Other(self.to_string())
    }
}

/// エラーコンテキスト追加用のヘルパートレイト
pub trait WithContext<T> {
    fn with_context<F>(self, f: F) -> KataResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> WithContext<T> for Result<T, E>
where
    E: IntoKataError,
{
    fn with_context<F>(self, f: F) -> KataResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into_kata_error();
            match base_error {
                KataError::Other(msg) => KataError::Other(format!("{}: {}", f(), msg)),
                _ => base_error,
            }
        })
    }
}
