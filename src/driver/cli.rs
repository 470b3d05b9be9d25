//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapter::config::DEFAULT_CONFIG_PATH;
use crate::domain::entities::skill::SkillCategory;

/// AIコーチ・テクニック分析・練習スケジュールのCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "playsmart")]
#[command(about = "AI football coach, technique analysis and training schedules", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ask the AI coach a question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Analyze a technique from captured keyframe images
    Analyze {
        /// Skill category (shooting, passing, defending, positioning)
        #[arg(long)]
        category: SkillCategory,

        /// Sub-skill key used for progress tracking
        #[arg(long)]
        sub_skill: String,

        /// Sub-skill display name sent to the AI (defaults to the key)
        #[arg(long)]
        name: Option<String>,

        /// Keyframe JPEG files, in capture order
        #[arg(required = true, num_args = 1..)]
        frames: Vec<PathBuf>,
    },

    /// Generate a weekly schedule from the drill bank
    Schedule {
        /// Training hours per week
        #[arg(long, default_value_t = 5.0)]
        hours: f64,
    },

    /// List the drill bank
    Drills,

    /// Show best scores per skill
    Progress,
}
