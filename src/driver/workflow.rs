//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::config::{Config, API_KEY_ENV};
use crate::adapter::gemini::client::GeminiHttpClient;
use crate::adapter::gemini::resilient_caller::ResilientCaller;
use crate::adapter::repositories::gemini_coach_repository::GeminiCoachRepository;
use crate::adapter::repositories::json_state_repository::JsonStateRepository;
use crate::application::dto::analysis_report::AnalysisReport;
use crate::application::use_cases::analyze_technique::AnalyzeTechniqueUseCase;
use crate::application::use_cases::ask_coach::AskCoachUseCase;
use crate::application::use_cases::generate_schedule::GenerateScheduleUseCase;
use crate::application::use_cases::review_state::ReviewStateUseCase;
use crate::domain::entities::capture::{Keyframe, TechniqueCapture};
use crate::domain::entities::drill::DEFAULT_DRILL_MINUTES;
use crate::domain::entities::drill_bank::DrillBank;
use crate::domain::entities::progress::ProgressState;
use crate::domain::entities::schedule::WeeklySchedule;
use crate::domain::entities::skill::SkillCategory;
use crate::domain::errors::{AnalysisError, ScheduleError};
use crate::domain::services::scheduler::ScheduleGenerator;

use super::cli::{Args, Command};

type GeminiCoach = GeminiCoachRepository<GeminiHttpClient>;

/// Read keyframe images from disk, in order
pub fn read_keyframes(paths: &[PathBuf]) -> Result<Vec<Keyframe>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read keyframe: {}", path.display()))?;
            Ok(Keyframe::from_bytes(&bytes))
        })
        .collect()
}

/// Render a weekly schedule as printable lines
pub fn format_schedule(schedule: &WeeklySchedule) -> Vec<String> {
    let mut lines = Vec::new();

    for advisory in &schedule.advisories {
        lines.push(format!("⚠ {}", advisory));
    }

    for session in &schedule.sessions {
        lines.push(format!(
            "{} ({} min)",
            session.day_label, session.total_minutes
        ));
        for drill in &session.drills {
            lines.push(format!(
                "  - {} ({} min)",
                drill.description,
                drill.effective_minutes(DEFAULT_DRILL_MINUTES)
            ));
        }
    }

    lines
}

/// Render the drill bank as printable lines
pub fn format_drills(bank: &DrillBank) -> Vec<String> {
    bank.drills()
        .iter()
        .enumerate()
        .map(|(i, drill)| match drill.duration_minutes {
            Some(minutes) => format!("{:>3}. {} ({} min)", i + 1, drill.description, minutes),
            None => format!("{:>3}. {}", i + 1, drill.description),
        })
        .collect()
}

/// Render best scores per category and sub-skill
pub fn format_progress(progress: &ProgressState) -> Vec<String> {
    let mut lines = Vec::new();

    for category in SkillCategory::ALL {
        let Some(sub_skills) = progress.skills.get(&category) else {
            continue;
        };
        lines.push(format!(
            "{} (avg {:.0})",
            category,
            progress.category_average(category)
        ));
        for (sub_skill, entry) in sub_skills {
            lines.push(format!(
                "  {}: {}/{} ({:.0}%)",
                sub_skill,
                entry.current,
                entry.target,
                entry.completion() * 100.0
            ));
        }
    }

    lines
}

/// Render an analysis report as printable lines
pub fn format_report(report: &AnalysisReport) -> Vec<String> {
    let analysis = &report.analysis;
    let mut lines = vec![format!(
        "Score: {} / Pro: {} (gap {})",
        analysis.score,
        analysis.pro_score,
        analysis.gap_to_pro()
    )];

    if report.personal_best {
        lines.push(format!("★ New personal best (previous {})", report.previous_best));
    }

    if !analysis.issues.is_empty() {
        lines.push("Issues:".to_string());
        for issue in &analysis.issues {
            lines.push(format!(
                "  [{}] {} -> {}",
                issue.severity.as_str(),
                issue.issue,
                issue.fix
            ));
        }
    }

    if !analysis.strengths.is_empty() {
        lines.push("Strengths:".to_string());
        lines.extend(analysis.strengths.iter().map(|s| format!("  + {}", s)));
    }

    if !analysis.drills.is_empty() {
        lines.push(format!(
            "Drills ({} new in drill bank):",
            report.drills_added
        ));
        lines.extend(analysis.drills.iter().map(|d| {
            format!(
                "  - {} ({} min)",
                d.description,
                d.effective_minutes(DEFAULT_DRILL_MINUTES)
            )
        }));
    }

    lines
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Coach Workflow
pub struct CoachWorkflow {
    config: Config,
    state_repository: Arc<JsonStateRepository>,
}

impl CoachWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let state_repository = Arc::new(JsonStateRepository::new(config.state_dir()));

        Self {
            config,
            state_repository,
        }
    }

    /// Build the Gemini-backed coach repository
    fn coach_repository(&self) -> Result<Arc<GeminiCoach>> {
        let api_key = self.config.resolve_api_key().with_context(|| {
            format!(
                "No Gemini API key: set \"api_key\" in the config file or {}",
                API_KEY_ENV
            )
        })?;

        let client = GeminiHttpClient::new(
            &self.config.base_url,
            &self.config.model,
            &api_key,
            self.config.request_timeout(),
        )?;
        println!("✓ Using model {}", client.model());

        let caller = ResilientCaller::new(client, self.config.retry_policy());
        Ok(Arc::new(GeminiCoachRepository::new(caller)))
    }

    /// Execute the selected command
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting playsmart ({:?})", args.command);
        info!("State directory: {}", self.state_repository.base_dir().display());

        match args.command {
            Command::Ask { question } => self.ask(&question.join(" ")).await,
            Command::Analyze {
                category,
                sub_skill,
                name,
                frames,
            } => {
                let name = name.unwrap_or_else(|| sub_skill.clone());
                self.analyze(category, &sub_skill, &name, &frames).await
            }
            Command::Schedule { hours } => self.schedule(hours).await,
            Command::Drills => self.drills().await,
            Command::Progress => self.progress().await,
        }
    }

    async fn ask(&self, question: &str) -> Result<()> {
        if question.trim().is_empty() {
            println!("✗ Please enter a question");
            return Ok(());
        }

        let use_case = AskCoachUseCase::new(self.coach_repository()?);
        let outcome = use_case.execute(question).await?;

        if outcome.is_success() {
            println!("{}", outcome.render());
        } else {
            println!("✗ {}", outcome.render());
        }
        Ok(())
    }

    async fn analyze(
        &self,
        category: SkillCategory,
        sub_skill: &str,
        name: &str,
        frames: &[PathBuf],
    ) -> Result<()> {
        let keyframes = read_keyframes(frames)?;
        println!(
            "✓ Loaded {} keyframes ({} required for {})",
            keyframes.len(),
            category.required_keyframes(),
            category
        );

        let capture = TechniqueCapture::new(category, sub_skill, name, keyframes);
        let use_case =
            AnalyzeTechniqueUseCase::new(self.coach_repository()?, self.state_repository.clone());

        match use_case.execute(&capture).await {
            Ok(report) => {
                print_lines(&format_report(&report));
                println!("✓ Progress and drill bank updated");
                Ok(())
            }
            Err(e) => match e.downcast_ref::<AnalysisError>() {
                Some(analysis_error) => {
                    println!("✗ {}", analysis_error);
                    Ok(())
                }
                None => Err(e),
            },
        }
    }

    async fn schedule(&self, hours: f64) -> Result<()> {
        let generator = ScheduleGenerator::new(self.config.schedule_config());
        let use_case = GenerateScheduleUseCase::new(self.state_repository.clone(), generator);

        match use_case.execute(hours).await {
            Ok(schedule) => {
                print_lines(&format_schedule(&schedule));
                if !schedule.is_empty() {
                    println!(
                        "✓ Scheduled {} sessions ({} min total)",
                        schedule.sessions.len(),
                        schedule.total_minutes()
                    );
                }
                Ok(())
            }
            Err(e) => match e.downcast_ref::<ScheduleError>() {
                Some(schedule_error) => {
                    println!("✗ {}", schedule_error);
                    Ok(())
                }
                None => Err(e),
            },
        }
    }

    async fn drills(&self) -> Result<()> {
        let bank = ReviewStateUseCase::new(self.state_repository.clone())
            .drill_bank()
            .await?;

        if bank.is_empty() {
            println!("⚠ Drill bank is empty. Analyze a technique to collect drills.");
            return Ok(());
        }

        println!("✓ {} drills in the drill bank", bank.len());
        print_lines(&format_drills(&bank));
        Ok(())
    }

    async fn progress(&self) -> Result<()> {
        let progress = ReviewStateUseCase::new(self.state_repository.clone())
            .progress()
            .await?;

        if progress.skills.is_empty() {
            println!("⚠ No scores recorded yet.");
            return Ok(());
        }

        print_lines(&format_progress(&progress));
        Ok(())
    }

    pub fn state_dir(&self) -> &Path {
        self.state_repository.base_dir()
    }
}
