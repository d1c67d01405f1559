//! 正規表現値

use regex::Regex;

/// A compiled regular expression value. Equality is by source text.
#[derive(Debug, Clone)]
pub struct RegexpValue {
    source: String,
    regex: Regex,
}

impl RegexpValue {
    /// ソース文字列からコンパイルする。パターンのコンパイルは
    /// リテラル評価の一部なので、失敗はホスト側の構文エラー扱い。
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 候補文字列のどこかにマッチするかどうか
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

impl PartialEq for RegexpValue {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
