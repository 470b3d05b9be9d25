//! # Technique Capture
//!
//! 分析に送るキーフレーム画像の集合

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::skill::SkillCategory;

/// キーフレームのMIMEタイプ
pub const KEYFRAME_MIME_TYPE: &str = "image/jpeg";

/// 動画から切り出した1枚の静止画（base64エンコード済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyframe {
    data: String,
}

impl Keyframe {
    /// 画像バイト列から作成
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
        }
    }

    /// base64文字列またはデータURL（`data:image/jpeg;base64,...`）から作成
    ///
    /// 空の場合は `None`
    pub fn from_data_url(value: &str) -> Option<Self> {
        let data = match value.split_once(',') {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => value,
        }
        .trim();

        if data.is_empty() {
            None
        } else {
            Some(Self {
                data: data.to_string(),
            })
        }
    }

    /// base64データ
    pub fn base64(&self) -> &str {
        &self.data
    }
}

/// テクニック分析の入力
#[derive(Debug, Clone)]
pub struct TechniqueCapture {
    pub category: SkillCategory,
    /// サブスキルのキー（例: "power_shot"）
    pub sub_skill: String,
    /// サブスキルの表示名（例: "Power Shot"）
    pub sub_skill_name: String,
    pub keyframes: Vec<Keyframe>,
}

impl TechniqueCapture {
    pub fn new(
        category: SkillCategory,
        sub_skill: impl Into<String>,
        sub_skill_name: impl Into<String>,
        keyframes: Vec<Keyframe>,
    ) -> Self {
        Self {
            category,
            sub_skill: sub_skill.into(),
            sub_skill_name: sub_skill_name.into(),
            keyframes,
        }
    }

    /// カテゴリが要求する枚数のキーフレームが揃っているか
    pub fn has_all_keyframes(&self) -> bool {
        self.keyframes.len() == self.category.required_keyframes()
    }
}
