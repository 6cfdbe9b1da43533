//! スキル順と短縮表記

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 短縮表記を作れない場合の文言（アイテムセットのブロック名に入る）
pub const NOT_ENOUGH_DATA: &str = "Not enough data for this skill order";

/// 1〜18レベルまでのスキル取得数
const MAX_LEVEL: usize = 18;

/// 基本スキルを最大まで上げるのに必要なポイント
const POINTS_TO_MAX: u8 = 5;

/// チャンピオンのスキル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Skill {
    Q,
    W,
    E,
    R,
}

impl Skill {
    /// 短縮表記の対象になる基本スキル
    const BASIC: [Skill; 3] = [Skill::Q, Skill::W, Skill::E];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Q => "Q",
            Skill::W => "W",
            Skill::E => "E",
            Skill::R => "R",
        }
    }

    fn basic_index(&self) -> Option<usize> {
        match self {
            Skill::Q => Some(0),
            Skill::W => Some(1),
            Skill::E => Some(2),
            Skill::R => None,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q" => Ok(Skill::Q),
            "W" => Ok(Skill::W),
            "E" => Ok(Skill::E),
            "R" => Ok(Skill::R),
            other => Err(format!("Unknown skill: '{}'", other)),
        }
    }
}

/// スキル順を短縮表記にする
///
/// 出力例: `"Q.E.W.Q, Q>E>W"` は Lv1: Q, Lv2: E, Lv3: W, Lv4: Q、
/// その後 Q → E → W の順に最大まで上げることを表す。
///
/// 基本スキルごとに取得数を数え、5 に達した順に並べる。
/// 18レベル分そろっていない場合は、残りの取得数が多い順に補う。
/// 3つそろわなければ [`NOT_ENOUGH_DATA`] を返す。
pub fn format_skill_order(skills: &[Skill]) -> String {
    let mut counts = [0u8; 3];
    let mut rollup: Vec<Skill> = Vec::with_capacity(3);

    for skill in skills {
        if let Some(idx) = skill.basic_index() {
            counts[idx] += 1;
            if counts[idx] == POINTS_TO_MAX {
                rollup.push(*skill);
                counts[idx] = 0;
            }
        }
    }

    if skills.len() < MAX_LEVEL {
        let mut leftovers: Vec<(Skill, u8)> = Skill::BASIC
            .iter()
            .copied()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .collect();
        // stable sort: 同数なら Q, W, E の順
        leftovers.sort_by(|a, b| b.1.cmp(&a.1));
        rollup.extend(leftovers.into_iter().map(|(skill, _)| skill));
    }

    if rollup.len() < 3 {
        return NOT_ENOUGH_DATA.to_string();
    }

    let first_levels = skills
        .iter()
        .take(4)
        .map(Skill::as_str)
        .collect::<Vec<_>>()
        .join(".");

    format!(
        "{}, {}>{}>{}",
        first_levels, rollup[0], rollup[1], rollup[2]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tags: &[&str]) -> Vec<Skill> {
        tags.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_format_full_sequence() {
        let skills = parse(&[
            "Q", "W", "E", "Q", "Q", "Q", "Q", "W", "W", "W", "W", "W", "E", "E", "E", "E", "E",
            "R",
        ]);
        assert_eq!(format_skill_order(&skills), "Q.W.E.Q, Q>W>E");
    }

    #[test]
    fn test_format_with_ultimate_levels() {
        // R を挟む一般的な順序
        let skills = parse(&[
            "Q", "E", "W", "Q", "Q", "R", "Q", "E", "Q", "E", "R", "E", "E", "W", "W", "R", "W",
            "W",
        ]);
        assert_eq!(format_skill_order(&skills), "Q.E.W.Q, Q>E>W");
    }

    #[test]
    fn test_format_empty_returns_sentinel() {
        assert_eq!(format_skill_order(&[]), NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_format_very_short_returns_sentinel() {
        let skills = parse(&["Q", "W"]);
        assert_eq!(format_skill_order(&skills), NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_format_partial_sequence_uses_leftovers() {
        // 11レベル分: Q は最大、残りは E(3) > W(2)
        let skills = parse(&["Q", "E", "W", "Q", "Q", "R", "Q", "E", "Q", "E", "W"]);
        assert_eq!(format_skill_order(&skills), "Q.E.W.Q, Q>E>W");
    }

    #[test]
    fn test_format_partial_leftover_tie_keeps_qwe_order() {
        let skills = parse(&["E", "W", "Q"]);
        assert_eq!(format_skill_order(&skills), "E.W.Q, Q>W>E");
    }

    #[test]
    fn test_format_partial_counts_leftover_of_maxed_skill() {
        // Q が6回: 5で最大になった後の1回も残りとして数える
        let skills = parse(&["Q", "Q", "Q", "Q", "Q", "Q", "W", "E"]);
        assert_eq!(format_skill_order(&skills), "Q.Q.Q.Q, Q>Q>W");
    }

    #[test]
    fn test_full_sequence_does_not_use_leftovers() {
        // 18レベルあっても E が5に届かない（不正データ）
        let skills = parse(&[
            "Q", "W", "Q", "W", "Q", "W", "Q", "W", "Q", "W", "R", "R", "R", "R", "R", "R", "E",
            "E",
        ]);
        assert_eq!(format_skill_order(&skills), NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_skill_parse_case_insensitive() {
        assert_eq!("q".parse::<Skill>().unwrap(), Skill::Q);
        assert_eq!(" R ".parse::<Skill>().unwrap(), Skill::R);
        assert!("x".parse::<Skill>().is_err());
    }

    #[test]
    fn test_skill_serde_uppercase() {
        let json = serde_json::to_string(&vec![Skill::Q, Skill::R]).unwrap();
        assert_eq!(json, r#"["Q","R"]"#);
    }
}
