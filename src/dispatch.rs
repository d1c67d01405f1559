//! `case/in` 評価のホスト向けファサード
//!
//! このモジュールは、節の並びに対する選択の流れ全体を管理します：
//! 構築時に各節のパターンを一度だけ検証し、評価時には宣言順に照合を
//! 試み、ガードを通過した最初の節の束縛をスコープへ合流させます。
//! どの節も確定せず既定節も無ければ `NoMatchingPattern` になります。

use crate::analyzer::PatternAnalyzer;
use crate::error::{ErrorCollector, KataResult, MatchError};
use crate::matcher::{Matcher, Scope};
use crate::pattern::Pattern;
use crate::value::{ProtocolOverrides, Value};

/// ガード式。仮の束縛を合流させたスコープを受け取り、真偽を返す。
/// ガード式の評価そのものはホストの仕事で、エンジンは結果だけ見る。
pub type GuardFn = Box<dyn Fn(&Scope) -> bool>;

/// 一つの `in` 節
pub struct Clause<T> {
    pub pattern: Pattern,
    pub guard: Option<GuardFn>,
    pub body: T,
}

impl<T> Clause<T> {
    pub fn new(pattern: Pattern, body: T) -> Self {
        Self {
            pattern,
            guard: None,
            body,
        }
    }

    /// ガード付きの節を作る
    pub fn with_guard(
        pattern: Pattern,
        guard: impl Fn(&Scope) -> bool + 'static,
        body: T,
    ) -> Self {
        Self {
            pattern,
            guard: Some(Box::new(guard)),
            body,
        }
    }
}

/// `case/in` 式一つ分の節の並び
pub struct CaseIn<T> {
    clauses: Vec<Clause<T>>,
    else_body: Option<T>,
}

impl<T> CaseIn<T> {
    pub fn new(clauses: Vec<Clause<T>>) -> Self {
        Self {
            clauses,
            else_body: None,
        }
    }

    /// 既定節（`else`）を付ける
    pub fn with_else(mut self, body: T) -> Self {
        self.else_body = Some(body);
        self
    }

    pub fn clauses(&self) -> &[Clause<T>] {
        &self.clauses
    }

    /// 全節のパターンを検証する。パース時に一度だけ呼ぶ。
    /// 最初に見つかったエラーを返す。
    pub fn validate(&self, scope: &Scope) -> KataResult<()> {
        for clause in &self.clauses {
            let mut analyzer = PatternAnalyzer::from_scope(scope);
            analyzer.analyze(&clause.pattern)?;
        }
        Ok(())
    }

    /// 全節のパターンを検証し、エラーを打ち切らずに集める。
    /// 一つでもエラーがあれば false。
    pub fn validate_into(
        &self,
        scope: &Scope,
        collector: &mut ErrorCollector,
        file_id: usize,
    ) -> bool {
        let before = collector.error_count();
        for clause in &self.clauses {
            let mut analyzer = PatternAnalyzer::from_scope(scope);
            if let Err(e) = analyzer.analyze(&clause.pattern) {
                collector.add_error(e.into(), file_id);
            }
        }
        collector.error_count() == before
    }

    /// 候補値に対して節を宣言順に試す。
    ///
    /// パターンが照合し、ガード（あれば）が仮束縛込みのスコープで
    /// 真になった最初の節が確定する。確定した節の束縛はスコープへ
    /// 合流し、本体への参照が返る。ガードが偽なら束縛は捨てられ、
    /// 次の節に進む。`TypeMismatch` はどの節からでも即座に伝播する。
    pub fn evaluate(
        &self,
        value: &Value,
        scope: &mut Scope,
        overrides: &ProtocolOverrides,
    ) -> KataResult<&T> {
        for (index, clause) in self.clauses.iter().enumerate() {
            let bindings = {
                let matcher = Matcher::new(scope, overrides);
                matcher.try_match(&clause.pattern, value)?
            };
            let Some(bindings) = bindings else {
                continue;
            };
            if let Some(guard) = &clause.guard {
                let mut tentative = scope.clone();
                tentative.extend(bindings.clone());
                if !guard(&tentative) {
                    log::debug!("clause {} matched but guard rejected", index);
                    continue;
                }
            }
            log::debug!("clause {} selected", index);
            scope.extend(bindings);
            return Ok(&clause.body);
        }
        if let Some(body) = &self.else_body {
            return Ok(body);
        }
        Err(MatchError::NoMatchingPattern {
            value: value.to_string(),
        }
        .into())
    }
}

/// 単独パターンの真偽形式（`value in pattern`）。
///
/// 成否だけ返し、束縛はスコープに確定しない。`TypeMismatch` は
/// 真偽形式でもエラーとして伝播する。
pub fn matches(
    pattern: &Pattern,
    value: &Value,
    scope: &Scope,
    overrides: &ProtocolOverrides,
) -> KataResult<bool> {
    let matcher = Matcher::new(scope, overrides);
    Ok(matcher.try_match(pattern, value)?.is_some())
}
