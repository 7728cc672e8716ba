//! Coach narrative: the payload, the request and the generator seam.
//!
//! The narrative is decoration. Statistics never depend on it, and a failed
//! or missing generator only means the coach panel keeps its last text.

mod gemini;
mod worker;

pub use gemini::GeminiGenerator;
pub use worker::{NarrativeResponse, NarrativeWorker, RequestId};

use serde::{Deserialize, Serialize};
use tradejournal_core::{AccountConfig, JournalEntry, TradingStats};

use crate::error::NarrativeError;
use crate::settings::NarrativeSettings;
use crate::util::format::format_currency;

/// Headline block of the coach analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VibeReport {
    /// Emoji plus a word or two
    pub stoke_meter: String,
    /// Where the account sits on the road to the goal
    pub mustang_progress: String,
    /// Nominally "1"-"10"; kept as text because the service is not strict
    pub momentum_rating: String,
    pub hype_line: String,
    pub reality_check: String,
}

/// Generated commentary on the journal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoachAnalysis {
    pub vibe_report: VibeReport,
    pub coach_insights: String,
    pub next_focus: String,
}

impl CoachAnalysis {
    /// Shown until the first real analysis arrives
    pub fn placeholder() -> Self {
        Self {
            vibe_report: VibeReport {
                stoke_meter: "Neutral".to_string(),
                mustang_progress: "Idling".to_string(),
                momentum_rating: "Waiting for data".to_string(),
                hype_line: "Ready to trade.".to_string(),
                reality_check: "Log your first trade to get coached.".to_string(),
            },
            coach_insights: "Market is open. Discipline is key.".to_string(),
            next_focus: "Execution and Risk Management".to_string(),
        }
    }

    /// Momentum rating as a 0-10 number, if the text starts with one
    pub fn momentum_score(&self) -> Option<u8> {
        let rating = self.vibe_report.momentum_rating.trim();
        let digits: String = rating.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        // Too many digits for a u32 is still "more than 10"
        Some(digits.parse::<u32>().map_or(10, |n| n.min(10)) as u8)
    }

    fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the generator gets to see
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    /// Most recent entries in insertion order
    pub recent_entries: Vec<JournalEntry>,
    pub stats: TradingStats,
    pub account: AccountConfig,
}

impl NarrativeRequest {
    pub fn new(recent_entries: &[JournalEntry], stats: &TradingStats, account: &AccountConfig) -> Self {
        Self {
            recent_entries: recent_entries.to_vec(),
            stats: stats.clone(),
            account: *account,
        }
    }

    /// Persona and rules for the coach
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a professional Trading Performance Analyst and Money Coach for a {balance} \
             funded futures account. Your goal is to help the user reach {goal} in total \
             payouts safely.\n\n\
             Tone: calm, professional fintech analysis with a chill, confident and honest vibe.\n\n\
             The user provides their trading journal. Analyze the data and return a JSON object.\n\n\
             Rules:\n\
             1. Be numbers-driven.\n\
             2. If performance is bad, be brutally honest but constructive.\n\
             3. If performance is good, be hyped but grounded.\n\
             4. \"Mustang Progress\" is a metaphor for the journey to the goal \
             (e.g. \"In the garage\", \"Cruising\", \"Redlining\").",
            balance = format_currency(self.account.initial_balance),
            goal = format_currency(self.account.profit_goal),
        )
    }

    /// User prompt with the current numbers and the recent entries as JSON
    pub fn prompt(&self) -> Result<String, NarrativeError> {
        let entries = serde_json::to_string(&self.recent_entries)?;
        let stats = &self.stats;

        Ok(format!(
            "Current Account Stats:\n\
             - Balance: {balance}\n\
             - Cumulative P/L: {pnl}\n\
             - Total Payouts: {payouts}\n\
             - Progress to Goal: {progress:.1}%\n\
             - Recent Win Rate: {win_rate:.1}%\n\n\
             Recent Entries (Last {count}):\n\
             {entries}\n\n\
             Generate a JSON response with the following fields:\n\
             - vibeReport: object with 'stokeMeter' (emoji + text), 'mustangProgress' (text), \
             'momentumRating' (1-10), 'hypeLine' (short sentence), 'realityCheck' (short sentence).\n\
             - coachInsights: a paragraph analyzing patterns, risk, and timeline.\n\
             - nextFocus: 3-5 words on what to focus on tomorrow.",
            balance = format_currency(stats.current_balance),
            pnl = format_currency(stats.cumulative_pnl),
            payouts = format_currency(stats.total_payouts),
            progress = stats.profit_goal_progress,
            win_rate = stats.win_rate,
            count = self.recent_entries.len(),
        ))
    }
}

/// Produces a [`CoachAnalysis`] for a request.
///
/// Implementations may block; the [`NarrativeWorker`] runs them off the UI
/// thread.
pub trait NarrativeGenerator: Send {
    fn name(&self) -> &'static str;

    fn generate(&self, request: &NarrativeRequest) -> Result<CoachAnalysis, NarrativeError>;
}

/// Build the configured generator, if the coach can run at all.
///
/// `None` when disabled in settings, when running offline, or when no API
/// key is available. None of these are errors.
pub fn generator_from_settings(
    settings: &NarrativeSettings,
    offline: bool,
) -> Option<Box<dyn NarrativeGenerator>> {
    if offline || !settings.enabled {
        tracing::info!(offline, enabled = settings.enabled, "Coach narrative disabled");
        return None;
    }

    match GeminiGenerator::from_settings(settings) {
        Ok(generator) => Some(Box::new(generator)),
        Err(e) => {
            tracing::info!(reason = %e, "Coach narrative unavailable");
            None
        }
    }
}

/// Parse the model's text output into an analysis.
///
/// Tolerates a surrounding Markdown code fence. Missing fields become empty
/// strings, but a response with no usable field at all is rejected.
pub fn parse_analysis(text: &str) -> Result<CoachAnalysis, NarrativeError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }

    let analysis: CoachAnalysis = serde_json::from_str(body)?;
    if analysis.is_blank() {
        return Err(NarrativeError::Malformed(
            "response contained no analysis fields".to_string(),
        ));
    }
    Ok(analysis)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line, if any
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
