// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// 字母数字爆破使用的字符表
pub const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 候选生成器
///
/// 生成惰性、可重复遍历的候选名称序列。来源依次为：
/// 静态词表、词表变体、字母数字爆破。同一次遍历中重复的候选只产出一次。
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    words: Vec<String>,
    suffixes: Vec<String>,
    alphanumeric_size: usize,
    use_permutations: bool,
}

impl CandidateGenerator {
    /// 创建候选生成器
    ///
    /// # 参数
    ///
    /// * `words` - 静态词表
    /// * `alphanumeric_size` - 字母数字爆破的最大长度，0 表示关闭
    /// * `use_permutations` - 是否生成词表变体
    /// * `seed` - 设置后以该种子打乱静态词表顺序
    pub fn new(
        words: Vec<String>,
        alphanumeric_size: usize,
        use_permutations: bool,
        seed: Option<u64>,
    ) -> Self {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        if let Some(seed) = seed {
            let mut rng = StdRng::seed_from_u64(seed);
            words.shuffle(&mut rng);
        }

        Self {
            words,
            suffixes: Vec::new(),
            alphanumeric_size,
            use_permutations,
        }
    }

    /// 设置变体后缀
    pub fn with_suffixes(mut self, suffixes: &[&str]) -> Self {
        self.suffixes = suffixes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// 开始一次新的遍历
    ///
    /// 静态词表和变体在遍历开始时去重；字母数字爆破保持惰性，
    /// 只跳过已在前两类来源中出现过的候选
    pub fn iter(&self) -> Candidates {
        let mut known = HashSet::new();
        let fixed: Vec<String> = self
            .words
            .iter()
            .cloned()
            .chain(self.permutations())
            .filter(|candidate| known.insert(candidate.clone()))
            .collect();

        Candidates {
            fixed: fixed.into_iter(),
            known,
            alphanumeric: AlphanumericIter::new(self.alphanumeric_size),
        }
    }

    fn permutations(&self) -> impl Iterator<Item = String> + '_ {
        self.words
            .iter()
            .filter(move |_| self.use_permutations)
            .flat_map(move |word| permute(word, &self.suffixes))
    }
}

/// 一次候选遍历
///
/// `known` 只保存有限的静态候选，字母数字爆破本身不重复，不会写入其中
#[derive(Debug)]
pub struct Candidates {
    fixed: std::vec::IntoIter<String>,
    known: HashSet<String>,
    alphanumeric: AlphanumericIter,
}

impl Iterator for Candidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(candidate) = self.fixed.next() {
            return Some(candidate);
        }
        let known = &self.known;
        self.alphanumeric
            .by_ref()
            .find(|candidate| !known.contains(candidate))
    }
}

/// 单个词的变体：大小写变体以及追加后缀
fn permute(word: &str, suffixes: &[String]) -> Vec<String> {
    let mut variants = vec![word.to_lowercase(), word.to_uppercase(), capitalize(word)];
    variants.extend(suffixes.iter().map(|suffix| format!("{}{}", word, suffix)));
    variants
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 字母数字爆破迭代器
///
/// 按长度从 1 到 `max_len` 依次产出 `[a-z0-9]` 上的所有字符串
#[derive(Debug, Clone)]
pub struct AlphanumericIter {
    max_len: usize,
    indices: Vec<usize>,
    done: bool,
}

impl AlphanumericIter {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            indices: vec![0],
            done: max_len == 0,
        }
    }

    fn advance(&mut self) {
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < ALPHANUMERIC.len() {
                return;
            }
            *index = 0;
        }

        // Every position wrapped: move on to the next length
        if self.indices.len() < self.max_len {
            self.indices = vec![0; self.indices.len() + 1];
        } else {
            self.done = true;
        }
    }
}

impl Iterator for AlphanumericIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let candidate = self
            .indices
            .iter()
            .map(|&i| ALPHANUMERIC[i] as char)
            .collect();
        self.advance();
        Some(candidate)
    }
}
