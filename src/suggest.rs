//! "Did you mean" 纠错策略。
//!
//! 词法分析器遇到无法识别的标识符或字符时，会把它和关键字表逐一比较，
//! 相似度达到阈值的最佳候选会被当作用户原本想写的关键字。

use std::cmp::Ordering;

/// 默认阈值：相似度 >= 0.8 时才接受纠正。
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// 一次成功的纠错：候选词和它的相似度（0.0 ~ 1.0）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<'k> {
    pub candidate: &'k str,
    pub score: f64,
}

/// 纠错策略接口：给定一个词和候选集合，返回最佳匹配。
pub trait Suggest {
    /// 两个字符串之间的相似度，范围 `[0.0, 1.0]`。
    fn similarity(&self, word: &str, candidate: &str) -> f64;

    /// 接受纠正所需的最低相似度。
    fn cutoff(&self) -> f64 {
        DEFAULT_CUTOFF
    }

    /// 在 `candidates` 中找出得分最高且不低于阈值的候选。
    /// 得分相同时取字典序较大的候选，保证结果稳定。
    fn best_match<'k>(&self, word: &str, candidates: &[&'k str]) -> Option<Suggestion<'k>> {
        candidates
            .iter()
            .map(|&candidate| Suggestion {
                candidate,
                score: self.similarity(word, candidate),
            })
            .filter(|s| s.score >= self.cutoff())
            .max_by(|a, b| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.candidate.cmp(b.candidate))
            })
    }
}

/// Ratcliff/Obershelp 相似度：`2 * M / T`，
/// 其中 M 是递归寻找最长公共子串得到的匹配字符数，T 是两串长度之和。
#[derive(Debug, Clone, Copy)]
pub struct SequenceMatcher {
    cutoff: f64,
}

impl SequenceMatcher {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for SequenceMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl Suggest for SequenceMatcher {
    fn similarity(&self, word: &str, candidate: &str) -> f64 {
        let a: Vec<char> = word.chars().collect();
        let b: Vec<char> = candidate.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let matches = matching_chars(&a, 0, a.len(), &b, 0, b.len());
        2.0 * matches as f64 / total as f64
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

/// 在 `a[alo..ahi]` 与 `b[blo..bhi]` 中找最长公共子串，返回 `(i, j, len)`。
/// 长度相同的匹配里取在 `a` 中最先出现的那一个。
fn longest_match(a: &[char], alo: usize, ahi: usize, b: &[char], blo: usize, bhi: usize) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    // prev[j] = 以 a[i-1]、b[j-1] 结尾的公共后缀长度
    let mut prev = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut curr = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                curr[j - blo + 1] = k;
                if k > best_len {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_len = k;
                }
            }
        }
        prev = curr;
    }
    (best_i, best_j, best_len)
}

fn matching_chars(a: &[char], alo: usize, ahi: usize, b: &[char], blo: usize, bhi: usize) -> usize {
    if alo >= ahi || blo >= bhi {
        return 0;
    }
    let (i, j, len) = longest_match(a, alo, ahi, b, blo, bhi);
    if len == 0 {
        return 0;
    }
    len + matching_chars(a, alo, i, b, blo, j) + matching_chars(a, i + len, ahi, b, j + len, bhi)
}
