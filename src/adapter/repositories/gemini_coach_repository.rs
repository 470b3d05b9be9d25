//! Gemini Coach Repository Implementation
//!
//! CoachRepositoryのGemini実装

use async_trait::async_trait;
use log::info;

use crate::adapter::gemini::client::GenerativeClient;
use crate::adapter::gemini::prompts::{analysis_payload, coach_payload};
use crate::adapter::gemini::resilient_caller::ResilientCaller;
use crate::domain::entities::api_outcome::ApiOutcome;
use crate::domain::entities::capture::TechniqueCapture;
use crate::domain::repositories::coach_repository::CoachRepository;

/// Gemini APIを使ったコーチリポジトリ
pub struct GeminiCoachRepository<C: GenerativeClient> {
    caller: ResilientCaller<C>,
}

impl<C: GenerativeClient> GeminiCoachRepository<C> {
    pub fn new(caller: ResilientCaller<C>) -> Self {
        Self { caller }
    }
}

#[async_trait]
impl<C: GenerativeClient> CoachRepository for GeminiCoachRepository<C> {
    async fn ask(&self, question: &str) -> ApiOutcome {
        info!("Asking coach ({} chars)", question.len());
        self.caller.call(&coach_payload(question)).await
    }

    async fn analyze(&self, capture: &TechniqueCapture) -> ApiOutcome {
        info!(
            "Requesting analysis for {}/{} with {} keyframes",
            capture.category,
            capture.sub_skill,
            capture.keyframes.len()
        );
        self.caller.call(&analysis_payload(capture)).await
    }
}
