//! # Skill Category
//!
//! スキルカテゴリとキーフレーム構成

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// スキルカテゴリ
///
/// カテゴリごとに必要なキーフレーム数とラベルが決まる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Shooting,
    Passing,
    Defending,
    Positioning,
}

const STRIKE_LABELS: [&str; 5] = [
    "1. Approach",
    "2. Contact",
    "3. Follow-Thru (Start)",
    "4. Follow-Thru (End)",
    "5. Ball Trajectory",
];

const DEFENDING_LABELS: [&str; 4] = [
    "1. Approach to Player",
    "2. Jockey / Stance",
    "3. Tackle / Action",
    "4. Recovery / Regain",
];

const POSITIONING_LABELS: [&str; 4] = [
    "1. Initial Position",
    "2. Scan / Movement",
    "3. Action Phase",
    "4. Recovery / Transition",
];

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Shooting,
        SkillCategory::Passing,
        SkillCategory::Defending,
        SkillCategory::Positioning,
    ];

    /// 永続化・プロンプトで使うキー
    pub fn key(&self) -> &'static str {
        match self {
            SkillCategory::Shooting => "shooting",
            SkillCategory::Passing => "passing",
            SkillCategory::Defending => "defending",
            SkillCategory::Positioning => "positioning",
        }
    }

    /// キャプチャするキーフレームのラベル
    pub fn keyframe_labels(&self) -> &'static [&'static str] {
        match self {
            SkillCategory::Shooting | SkillCategory::Passing => &STRIKE_LABELS,
            SkillCategory::Defending => &DEFENDING_LABELS,
            SkillCategory::Positioning => &POSITIONING_LABELS,
        }
    }

    /// 必要なキーフレーム数
    pub fn required_keyframes(&self) -> usize {
        self.keyframe_labels().len()
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SkillCategory::ALL
            .into_iter()
            .find(|category| category.key() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown skill category '{}' (expected shooting, passing, defending or positioning)",
                    s
                )
            })
    }
}
