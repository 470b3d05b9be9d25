//! # Analyze Technique Use Case
//!
//! キーフレームをAIに送り、結果を進捗とドリルバンクに反映するユースケース

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::application::dto::analysis_report::AnalysisReport;
use crate::domain::entities::capture::TechniqueCapture;
use crate::domain::entities::drill_bank::DrillBank;
use crate::domain::entities::progress::ProgressState;
use crate::domain::errors::AnalysisError;
use crate::domain::repositories::coach_repository::CoachRepository;
use crate::domain::repositories::state_repository::{
    StateRepository, DRILL_BANK_KEY, PROGRESS_KEY,
};
use crate::domain::services::sanitizer::ResponseSanitizer;

/// テクニック分析ユースケース
pub struct AnalyzeTechniqueUseCase<C: CoachRepository, S: StateRepository> {
    coach_repository: Arc<C>,
    state_repository: Arc<S>,
}

impl<C: CoachRepository, S: StateRepository> AnalyzeTechniqueUseCase<C, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `coach_repository` - コーチリポジトリ
    /// * `state_repository` - 状態リポジトリ
    pub fn new(coach_repository: Arc<C>, state_repository: Arc<S>) -> Self {
        Self {
            coach_repository,
            state_repository,
        }
    }

    /// 分析を実行する
    ///
    /// 1. 入力検証（サブスキルとキーフレーム枚数）
    /// 2. AIに分析を依頼
    /// 3. JSONとしてパースしてサニタイズ
    /// 4. ベストスコアを上回れば進捗を更新して保存
    /// 5. 新しいドリルをドリルバンクにマージして保存
    ///
    /// # Errors
    ///
    /// 入力不備・サービス失敗・不正JSONは `AnalysisError` として返る。
    /// この場合、状態は変更されない。状態の読み書きに失敗した場合もエラーを返す
    pub async fn execute(&self, capture: &TechniqueCapture) -> Result<AnalysisReport> {
        Self::validate(capture)?;

        let text = self
            .coach_repository
            .analyze(capture)
            .await
            .into_result()
            .map_err(|message| {
                warn!("Analysis request failed: {}", message);
                AnalysisError::Service(message)
            })?;

        let analysis = ResponseSanitizer::parse(&text)?;
        info!(
            "Analysis for {}/{}: score {} ({} issues, {} drills)",
            capture.category,
            capture.sub_skill,
            analysis.score,
            analysis.issues.len(),
            analysis.drills.len()
        );

        let timestamp = Utc::now().to_rfc3339();

        let mut progress: ProgressState = self
            .state_repository
            .load(PROGRESS_KEY)
            .await
            .context("Failed to load progress")?
            .unwrap_or_default();
        let previous_best = progress
            .get(capture.category, &capture.sub_skill)
            .map(|p| p.current)
            .unwrap_or(0.0);
        let personal_best = progress.record_score(
            capture.category,
            &capture.sub_skill,
            analysis.score,
            timestamp.clone(),
        );
        if personal_best {
            self.state_repository
                .save(PROGRESS_KEY, &progress)
                .await
                .context("Failed to save progress")?;
        }

        let mut drill_bank: DrillBank = self
            .state_repository
            .load(DRILL_BANK_KEY)
            .await
            .context("Failed to load drill bank")?
            .unwrap_or_default();
        let drills_added = drill_bank.merge(&analysis.drills, timestamp);
        if drills_added > 0 {
            self.state_repository
                .save(DRILL_BANK_KEY, &drill_bank)
                .await
                .context("Failed to save drill bank")?;
        }

        Ok(AnalysisReport {
            analysis,
            previous_best,
            personal_best,
            drills_added,
        })
    }

    fn validate(capture: &TechniqueCapture) -> Result<(), AnalysisError> {
        if capture.sub_skill.trim().is_empty() {
            return Err(AnalysisError::MissingSubSkill);
        }
        if !capture.has_all_keyframes() {
            return Err(AnalysisError::MissingKeyframes {
                category: capture.category,
                expected: capture.category.required_keyframes(),
                actual: capture.keyframes.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::mocks::{MockCoachRepository, MockStateRepository};
    use crate::domain::entities::api_outcome::ApiOutcome;
    use crate::domain::entities::capture::Keyframe;
    use crate::domain::entities::drill::Drill;
    use crate::domain::entities::skill::SkillCategory;

    const RESPONSE: &str = r#"{
        "score": 68,
        "proScore": 93,
        "issues": [
            {"severity": "high", "issue": "Plant foot too far in Frame 2", "fix": "Plant closer to the ball"},
            {"severity": "low", "issue": "   ", "fix": "ignored"}
        ],
        "strengths": ["Good body shape in Frame 1", ""],
        "drills": [
            {"drill": "Plant-foot ladder", "duration": 10},
            {"drill": "Wall volleys", "duration": 15},
            {"drill": "", "duration": 5}
        ]
    }"#;

    fn shooting_capture() -> TechniqueCapture {
        TechniqueCapture::new(
            SkillCategory::Shooting,
            "power_shot",
            "Power Shot",
            vec![Keyframe::from_bytes(b"frame"); 5],
        )
    }

    fn use_case(
        outcome: ApiOutcome,
        state: MockStateRepository,
    ) -> (
        AnalyzeTechniqueUseCase<MockCoachRepository, MockStateRepository>,
        Arc<MockCoachRepository>,
        Arc<MockStateRepository>,
    ) {
        let coach = Arc::new(MockCoachRepository::new(outcome));
        let state = Arc::new(state);
        (
            AnalyzeTechniqueUseCase::new(coach.clone(), state.clone()),
            coach,
            state,
        )
    }

    #[tokio::test]
    async fn test_successful_analysis_updates_state() {
        let (use_case, _, state) = use_case(
            ApiOutcome::Success(RESPONSE.to_string()),
            MockStateRepository::new(),
        );

        let report = use_case.execute(&shooting_capture()).await.unwrap();

        assert_eq!(report.analysis.score, 68.0);
        assert_eq!(report.analysis.pro_score, 93.0);
        assert_eq!(report.analysis.issues.len(), 1);
        assert_eq!(report.analysis.strengths.len(), 1);
        assert_eq!(report.analysis.drills.len(), 2);
        assert!(report.personal_best);
        assert_eq!(report.previous_best, 0.0);
        assert_eq!(report.drills_added, 2);

        let progress: ProgressState = state.get(PROGRESS_KEY).unwrap();
        assert_eq!(
            progress
                .get(SkillCategory::Shooting, "power_shot")
                .unwrap()
                .current,
            68.0
        );
        let bank: DrillBank = state.get(DRILL_BANK_KEY).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[tokio::test]
    async fn test_lower_score_keeps_best_and_skips_duplicate_drills() {
        let mut progress = ProgressState::new();
        progress.record_score(SkillCategory::Shooting, "power_shot", 80.0, "t0".to_string());
        let bank = DrillBank::from(vec![Drill::new("Wall volleys", 15.0)]);
        let state = MockStateRepository::new()
            .with(PROGRESS_KEY, &progress)
            .with(DRILL_BANK_KEY, &bank);
        let (use_case, _, state) = use_case(ApiOutcome::Success(RESPONSE.to_string()), state);

        let report = use_case.execute(&shooting_capture()).await.unwrap();

        assert!(!report.personal_best);
        assert_eq!(report.previous_best, 80.0);
        assert_eq!(report.best_score(), 80.0);
        assert_eq!(report.drills_added, 1);

        let stored: ProgressState = state.get(PROGRESS_KEY).unwrap();
        assert_eq!(stored, progress);
        let bank: DrillBank = state.get(DRILL_BANK_KEY).unwrap();
        let names: Vec<_> = bank.drills().iter().map(|d| d.description.as_str()).collect();
        assert_eq!(names, vec!["Wall volleys", "Plant-foot ladder"]);
    }

    #[tokio::test]
    async fn test_missing_keyframes_never_calls_service() {
        let (use_case, coach, state) = use_case(
            ApiOutcome::Success(RESPONSE.to_string()),
            MockStateRepository::new(),
        );
        let mut capture = shooting_capture();
        capture.keyframes.truncate(3);

        let err = use_case.execute(&capture).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::MissingKeyframes {
                category: SkillCategory::Shooting,
                expected: 5,
                actual: 3,
            })
        );
        assert_eq!(coach.calls(), 0);
        assert!(state.keys().is_empty());
    }

    #[tokio::test]
    async fn test_blank_sub_skill_is_rejected() {
        let (use_case, coach, _) = use_case(
            ApiOutcome::Success(RESPONSE.to_string()),
            MockStateRepository::new(),
        );
        let mut capture = shooting_capture();
        capture.sub_skill = " ".to_string();

        let err = use_case.execute(&capture).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::MissingSubSkill)
        );
        assert_eq!(coach.calls(), 0);
    }

    #[tokio::test]
    async fn test_service_failure_leaves_state_untouched() {
        let (use_case, coach, state) = use_case(
            ApiOutcome::Failure("Unable to get response from AI. Network error".to_string()),
            MockStateRepository::new(),
        );

        let err = use_case.execute(&shooting_capture()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Analysis failed: Unable to get response from AI. Network error"
        );
        assert_eq!(coach.calls(), 1);
        assert!(state.keys().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_fatal() {
        let (use_case, _, state) = use_case(
            ApiOutcome::Success("Sure! Here is your analysis".to_string()),
            MockStateRepository::new(),
        );

        let err = use_case.execute(&shooting_capture()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InvalidJson(_))
        ));
        assert!(state.keys().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let (use_case, _, _) = use_case(
            ApiOutcome::Success(RESPONSE.to_string()),
            MockStateRepository::failing_saves(),
        );

        let err = use_case.execute(&shooting_capture()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to save progress"));
    }
}
