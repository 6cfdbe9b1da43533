//! 対話入力

use crate::error::{LbError, Result};
use std::io::{self, BufRead, Write};

/// 1行入力を受け取る
pub trait Prompter {
    /// 質問を表示して1行読み込む（末尾の改行は除く）
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// 標準入力から読み込む
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(LbError::Prompt("input closed".to_string()));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 決められた回答を順に返す（テスト用）
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    /// 表示された質問
    pub questions: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| LbError::Prompt("no more scripted answers".to_string()))
    }
}
