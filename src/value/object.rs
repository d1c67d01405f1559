//! 分解プロトコル
//!
//! ホスト定義のオブジェクトは、このトレイトを実装することで構造
//! パターンマッチに参加する。能力は任意実装の二つのメソッドで表す：
//! 順序列への分解（配列系パターン）とマッピングへの分解（ハッシュ系
//! パターン）。どちらも `None` を返す型はその形のパターンに対して
//! 能力を持たない。

use super::Value;
use std::fmt;

/// パターンマッチに参加するホストオブジェクトの能力インタフェース
pub trait ObjectLike: fmt::Debug {
    /// クラス名。定数ガード・クラスマッチ・診断表示に使われる。
    fn class_name(&self) -> &str;

    /// 順序列への分解。
    ///
    /// `None` は能力なし。`Some` は `Value::Array` でなければならず、
    /// それ以外を返すと照合は `TypeMismatch` で失敗する。
    fn deconstruct(&self) -> Option<Value> {
        None
    }

    /// マッピングへの分解。
    ///
    /// `keys` は要求キーのヒント。`Some` のときはパターンが名指しする
    /// キーだけ返せばよい（全部返しても構わない — エンジンは必要な
    /// キーしか見ない）。`None` のときは `**name` / `**nil` 節のために
    /// 全エントリが必要。戻り値の契約は [`ObjectLike::deconstruct`] と
    /// 同様で、`Value::Hash` 以外は `TypeMismatch` になる。
    fn deconstruct_keys(&self, keys: Option<&[String]>) -> Option<Value> {
        let _ = keys;
        None
    }

    /// 診断表示形
    fn inspect(&self) -> String {
        format!("#<{}>", self.class_name())
    }
}
