//! # Drill Bank
//!
//! 分析セッションをまたいで蓄積される重複なしのドリル集合

use serde::{Deserialize, Serialize};

use super::drill::Drill;

/// ドリルバンク
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillBank {
    #[serde(default)]
    drills: Vec<Drill>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl DrillBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    /// 新しいドリルを追加する
    ///
    /// 説明文が既存（または同じ入力内で先行）のドリルと一致するものはスキップする。
    /// 追加された件数を返す
    pub fn merge(&mut self, new_drills: &[Drill], timestamp: String) -> usize {
        let mut added = 0;
        for drill in new_drills {
            if drill.description.trim().is_empty()
                || self.drills.iter().any(|d| d.same_description(drill))
            {
                continue;
            }
            self.drills.push(drill.clone());
            added += 1;
        }

        if added > 0 {
            self.updated_at = Some(timestamp);
        }
        added
    }

    /// 保存データ読み込み時の最低限の検証
    ///
    /// 説明文が空、または所要時間のないドリルを除外する
    pub fn retain_valid(&mut self) -> usize {
        let before = self.drills.len();
        self.drills.retain(|d| {
            !d.description.trim().is_empty()
                && d.duration_minutes.is_some_and(|m| m.is_finite() && m > 0.0)
        });
        before - self.drills.len()
    }
}

impl From<Vec<Drill>> for DrillBank {
    fn from(drills: Vec<Drill>) -> Self {
        let mut bank = DrillBank::new();
        bank.merge(&drills, String::new());
        bank.updated_at = None;
        bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-10-17T10:00:00Z";

    #[test]
    fn test_merge_skips_duplicates() {
        let mut bank = DrillBank::new();
        let added = bank.merge(
            &[Drill::new("Wall passes", 15.0), Drill::new("Rondo", 20.0)],
            TS.to_string(),
        );
        assert_eq!(added, 2);

        let added = bank.merge(
            &[Drill::new("Rondo", 30.0), Drill::new("Shadow jockeying", 10.0)],
            "2026-10-18T10:00:00Z".to_string(),
        );
        assert_eq!(added, 1);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.drills()[1].duration_minutes, Some(20.0));
        assert_eq!(bank.updated_at.as_deref(), Some("2026-10-18T10:00:00Z"));
    }

    #[test]
    fn test_merge_dedupes_within_input() {
        let mut bank = DrillBank::new();
        let added = bank.merge(
            &[Drill::new("Rondo", 20.0), Drill::new("Rondo", 25.0)],
            TS.to_string(),
        );
        assert_eq!(added, 1);
    }

    #[test]
    fn test_merge_nothing_keeps_timestamp() {
        let mut bank = DrillBank::new();
        assert_eq!(bank.merge(&[], TS.to_string()), 0);
        assert!(bank.updated_at.is_none());
    }

    #[test]
    fn test_retain_valid() {
        let mut bank = DrillBank::from(vec![
            Drill::new("Rondo", 20.0),
            Drill::without_duration("Juggling"),
            Drill::new("Sprints", 0.0),
        ]);
        let removed = bank.retain_valid();

        assert_eq!(removed, 2);
        assert_eq!(bank.len(), 1);
        assert!(bank.drills().iter().any(|d| d.description == "Rondo"));
    }

    #[test]
    fn test_from_vec() {
        let bank = DrillBank::from(vec![Drill::new("A", 10.0), Drill::new("A", 10.0)]);
        assert_eq!(bank.len(), 1);
        assert!(bank.updated_at.is_none());
    }
}
