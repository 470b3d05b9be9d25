//! # Response Sanitizer
//!
//! 生成AIが返した分析結果のうち、不正なエントリを取り除くサービス

use serde_json::Value;

use crate::domain::entities::analysis::{AnalysisResult, Issue, Severity, DEFAULT_PRO_SCORE};
use crate::domain::entities::drill::Drill;
use crate::domain::errors::AnalysisError;

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// レスポンスサニタイザ
///
/// 上流サービスの出力は完全には信頼できないため、空文字やnullを含むエントリは
/// エラーにせず黙って除外する。引数は変更しない
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    /// AIの応答テキストをパースしてサニタイズする
    ///
    /// # Errors
    ///
    /// テキストがJSONとしてパースできない場合は `AnalysisError::InvalidJson`
    pub fn parse(text: &str) -> Result<AnalysisResult, AnalysisError> {
        let raw: Value = serde_json::from_str(text.trim())
            .map_err(|e| AnalysisError::InvalidJson(e.to_string()))?;
        Ok(Self::sanitize(&raw))
    }

    /// 分析結果をサニタイズする
    ///
    /// オブジェクト以外が渡された場合はデフォルトの結果を返す
    pub fn sanitize(data: &Value) -> AnalysisResult {
        let Some(object) = data.as_object() else {
            log::warn!("Invalid analysis data passed to sanitizer: {}", data);
            return AnalysisResult::default();
        };

        let score = object
            .get("score")
            .and_then(Value::as_f64)
            .map(|s| s.clamp(MIN_SCORE, MAX_SCORE))
            .unwrap_or(MIN_SCORE);

        let pro_score = object
            .get("proScore")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_PRO_SCORE);

        AnalysisResult {
            score,
            pro_score,
            issues: Self::array(object.get("issues"))
                .filter_map(Self::sanitize_issue)
                .collect(),
            strengths: Self::array(object.get("strengths"))
                .filter_map(|s| Self::non_blank(Some(s)))
                .collect(),
            drills: Self::array(object.get("drills"))
                .filter_map(Self::sanitize_drill)
                .collect(),
        }
    }

    /// 配列でなければ空のイテレータ
    fn array(value: Option<&Value>) -> impl Iterator<Item = &Value> {
        value
            .and_then(Value::as_array)
            .map(|items| items.iter())
            .into_iter()
            .flatten()
    }

    fn non_blank(value: Option<&Value>) -> Option<String> {
        value
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    fn sanitize_issue(item: &Value) -> Option<Issue> {
        let issue = Self::non_blank(item.get("issue"))?;
        let fix = Self::non_blank(item.get("fix"))?;
        let severity = item
            .get("severity")
            .and_then(Value::as_str)
            .and_then(Severity::parse)
            .unwrap_or_default();

        Some(Issue {
            severity,
            issue,
            fix,
        })
    }

    fn sanitize_drill(item: &Value) -> Option<Drill> {
        let description = Self::non_blank(item.get("drill"))?;
        let duration = Self::duration(item.get("duration")?)?;
        Some(Drill::new(description, duration))
    }

    /// 所要時間を数値として解釈する（数値文字列も受け付ける）
    fn duration(value: &Value) -> Option<f64> {
        let minutes = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (minutes.is_finite() && minutes > 0.0).then_some(minutes)
    }
}
