//! AI suggestion service.
//!
//! Wraps the AiProvider port with the four oracle operations of the
//! wizard: option brainstorming, consequence analysis, mitigation
//! drafting, and second-order analysis of a mitigation plan.
//!
//! Every operation degrades to an empty result on failure. A broken or
//! unconfigured provider never blocks the wizard; the caller simply
//! gets nothing to offer and the user continues manually.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::decision::Outcome;
use crate::ports::{AiProvider, GenerationRequest, ResponseFormat};

/// Upside and downside lists parsed from an analysis response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConsequenceAnalysis {
    /// Potential benefits.
    #[serde(default)]
    pub upsides: Vec<String>,
    /// Potential risks or costs.
    #[serde(default)]
    pub downsides: Vec<String>,
}

impl ConsequenceAnalysis {
    /// Returns true when neither list has entries.
    pub fn is_empty(&self) -> bool {
        self.upsides.is_empty() && self.downsides.is_empty()
    }
}

/// AI-backed suggestion operations.
///
/// Never mutates decision state; callers feed the returned suggestions
/// through the normal mutation operations.
pub struct SuggestionService {
    provider: Arc<dyn AiProvider>,
}

impl SuggestionService {
    /// Creates a new suggestion service backed by the given provider.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Suggests option titles for the given desired outcomes.
    ///
    /// Returns an empty vec without calling the provider when there are
    /// no outcomes to work from.
    pub async fn suggest_options(&self, outcomes: &[Outcome]) -> Vec<String> {
        if outcomes.is_empty() {
            return Vec::new();
        }

        let outcome_text = outcomes
            .iter()
            .map(|o| format!("Goal: {}. Purpose: {}", o.what(), o.why()))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "I am using the Tony Robbins OOC/EMR decision making framework.\n\
             Based on these desired outcomes:\n\
             {}\n\n\
             Suggest 3 distinct, creative, and actionable \"Options\" (paths to achieve these outcomes).\n\
             Return ONLY the titles of the options as a JSON array of strings. Do not include numbering or markdown.",
            outcome_text
        );

        let request = GenerationRequest::new(prompt).with_format(ResponseFormat::Json);

        match self.provider.generate(request).await {
            Ok(response) => match serde_json::from_str::<Vec<String>>(&response.text) {
                Ok(titles) => filter_blank(titles),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unparseable option suggestions");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Option suggestion request failed");
                Vec::new()
            }
        }
    }

    /// Analyzes an option for upsides and downsides against the outcomes.
    pub async fn analyze_consequences(
        &self,
        option_title: &str,
        outcomes: &[Outcome],
    ) -> ConsequenceAnalysis {
        let outcome_text = outcomes
            .iter()
            .map(|o| o.what())
            .collect::<Vec<_>>()
            .join(", ");

        let prompt = format!(
            "I am evaluating the option: \"{}\" to achieve: \"{}\".\n\
             List 3 potential Upsides (benefits) and 3 potential Downsides (risks/costs) for this option.\n\
             Return JSON in this format: {{ \"upsides\": [\"...\"], \"downsides\": [\"...\"] }}",
            option_title, outcome_text
        );

        self.request_analysis(prompt, "consequence analysis").await
    }

    /// Drafts a one-paragraph mitigation plan for an option's downsides.
    ///
    /// Returns `None` when the provider fails or produces nothing.
    pub async fn suggest_mitigation(
        &self,
        option_title: &str,
        downsides: &[String],
    ) -> Option<String> {
        let prompt = format!(
            "For the decision option \"{}\", here are the risks/downsides:\n\
             {}\n\n\
             Write a concise \"Mitigation Plan\" (1 paragraph) to address these risks.",
            option_title,
            downsides.join("\n")
        );

        let request = GenerationRequest::new(prompt);

        match self.provider.generate(request).await {
            Ok(response) => {
                let plan = response.text.trim();
                if plan.is_empty() {
                    None
                } else {
                    Some(plan.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Mitigation suggestion request failed");
                None
            }
        }
    }

    /// Analyzes the upsides and downsides of implementing a mitigation plan.
    pub async fn analyze_mitigation_plan(&self, plan: &str) -> ConsequenceAnalysis {
        let prompt = format!(
            "I have a mitigation plan: \"{}\".\n\
             What are the potential UPSIDES (benefits) and DOWNSIDES (costs/new risks) of implementing this specific mitigation plan?\n\
             Return JSON in this format: {{ \"upsides\": [\"...\"], \"downsides\": [\"...\"] }}",
            plan
        );

        self.request_analysis(prompt, "mitigation analysis").await
    }

    /// Shared request + parse + degrade path for the two analysis shapes.
    async fn request_analysis(&self, prompt: String, operation: &'static str) -> ConsequenceAnalysis {
        let request = GenerationRequest::new(prompt).with_format(ResponseFormat::Json);

        match self.provider.generate(request).await {
            Ok(response) => match serde_json::from_str::<ConsequenceAnalysis>(&response.text) {
                Ok(analysis) => ConsequenceAnalysis {
                    upsides: filter_blank(analysis.upsides),
                    downsides: filter_blank(analysis.downsides),
                },
                Err(e) => {
                    tracing::warn!(error = %e, operation, "Discarding unparseable analysis response");
                    ConsequenceAnalysis::default()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, operation, "Analysis request failed");
                ConsequenceAnalysis::default()
            }
        }
    }
}

/// Drops empty and whitespace-only entries from a parsed list.
fn filter_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect()
}
