//! Decision Master - interactive decision wizard.
//!
//! A thin terminal front-end over the library crate. Every numbered
//! action maps onto a session operation; rendering is plain stdout and
//! all state handling lives behind `DecisionSession`.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use decision_master::adapters::ai::{GeminiConfig, GeminiProvider};
use decision_master::adapters::document::RecordGenerator;
use decision_master::adapters::storage::FileStateStore;
use decision_master::application::{DecisionSession, SuggestionService};
use decision_master::config::AppConfig;
use decision_master::domain::decision::{
    net_score, rank, score_breakdown, ConsequenceKind, MitigationKind, MAX_CANDIDATES,
};
use decision_master::domain::flow::ResolvePhase;
use decision_master::domain::foundation::{
    ConsequenceId, MitigationItemId, OptionId, OutcomeId, Score, Step,
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::load()?;
    config.validate()?;

    let store = FileStateStore::new(&config.storage.data_dir);
    let mut session = DecisionSession::open(Arc::new(store), config.storage.key.clone()).await;
    let suggestions = build_suggestion_service(&config);

    println!("Decision Master");
    println!("Six stages from open question to committed decision.");
    if suggestions.is_none() {
        println!("AI suggestions disabled: set DECISION_MASTER__AI__GEMINI_API_KEY to enable them.");
    }
    println!("Commands: next, back, reset, print, quit, or a numbered action.");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        render(&session, suggestions.is_some());
        let line = match prompt(&mut input, "> ").await {
            Some(line) => line,
            None => break,
        };
        if line.is_empty() {
            continue;
        }

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => break,
            "next" | "n" => {
                if session.can_proceed() {
                    session.next_step();
                } else {
                    println!("{}", gate_hint(session.step()));
                }
            }
            "back" | "b" => {
                session.previous_step();
            }
            "reset" => {
                if confirm(&mut input, "Discard everything and start over? (y/n) ").await {
                    session.reset().await;
                    println!("Everything cleared.");
                }
            }
            "print" | "p" => {
                println!();
                println!("{}", RecordGenerator::new().generate(session.state()));
            }
            action => {
                handle_stage_action(&mut session, suggestions.as_ref(), &mut input, action).await;
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Logs go to stderr so the wizard's stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("decision_master=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Wires the Gemini provider when an API key is configured.
fn build_suggestion_service(config: &AppConfig) -> Option<SuggestionService> {
    let api_key = config.ai.gemini_api_key.clone().filter(|k| !k.is_empty())?;
    let gemini = GeminiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);
    Some(SuggestionService::new(Arc::new(GeminiProvider::new(gemini))))
}

// ───────────────────────────────────────────────────────────────────
// Rendering
// ───────────────────────────────────────────────────────────────────

fn render(session: &DecisionSession, ai: bool) {
    let step = session.step();
    println!();
    println!(
        "[{}/6] {} - {}",
        step.order_index() + 1,
        step.headline(),
        step.tagline()
    );
    println!();

    match step {
        Step::Outcomes => render_outcomes(session),
        Step::Options => render_options(session, ai),
        Step::Consequences => render_consequences(session, ai),
        Step::Evaluate => render_evaluate(session),
        Step::Mitigate => render_mitigate(session, ai),
        Step::Resolve => render_resolve(session),
    }
}

fn render_outcomes(session: &DecisionSession) {
    let outcomes = session.state().outcomes();
    if outcomes.is_empty() {
        println!("No outcomes yet.");
    } else {
        for (i, outcome) in outcomes.iter().enumerate() {
            if outcome.why().is_empty() {
                println!("  {}. {}", i + 1, outcome.what());
            } else {
                println!("  {}. {} (why: {})", i + 1, outcome.what(), outcome.why());
            }
        }
    }
    println!();
    println!("Actions: [1] add outcome  [2] remove outcome");
}

fn render_options(session: &DecisionSession, ai: bool) {
    let options = session.state().options();
    if options.is_empty() {
        println!("No options yet.");
    } else {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.title());
        }
    }
    println!();
    if ai {
        println!("Actions: [1] add option  [2] remove option  [3] brainstorm with AI");
    } else {
        println!("Actions: [1] add option  [2] remove option");
    }
}

fn render_consequences(session: &DecisionSession, ai: bool) {
    let options = session.state().options();
    if options.is_empty() {
        println!("No options yet. Go back and add some first.");
    } else {
        for (i, option) in options.iter().enumerate() {
            println!(
                "  {}. {} (net {:+})",
                i + 1,
                option.title(),
                score_breakdown(option).net()
            );
            for c in option.upsides() {
                println!("       + {} ({})", c.text(), c.score());
            }
            for c in option.downsides() {
                println!("       - {} ({})", c.text(), c.score());
            }
        }
    }
    println!();
    if ai {
        println!("Actions: [1] add consequence  [2] remove consequence  [3] autofill with AI");
    } else {
        println!("Actions: [1] add consequence  [2] remove consequence");
    }
}

fn render_evaluate(session: &DecisionSession) {
    let state = session.state();
    if state.options().is_empty() {
        println!("No options to evaluate yet.");
    } else {
        for (i, (option, net)) in rank(state.options()).iter().enumerate() {
            let mark = if state.is_candidate(option.id()) {
                "*"
            } else {
                " "
            };
            let breakdown = score_breakdown(option);
            println!(
                " {} {}. {} (net {:+}, up {}, down {})",
                mark,
                i + 1,
                option.title(),
                net,
                breakdown.upside_total,
                breakdown.downside_total
            );
        }
        println!();
        println!(
            "* marks a candidate ({}/{} selected).",
            state.candidate_option_ids().len(),
            MAX_CANDIDATES
        );
    }
    println!();
    println!("Actions: [1] toggle candidate");
}

fn render_mitigate(session: &DecisionSession, ai: bool) {
    let candidates = session.state().candidates();
    if candidates.is_empty() {
        println!("No candidates selected. Go back to Evaluate and pick some.");
    } else {
        for (i, option) in candidates.iter().enumerate() {
            println!("  {}. {}", i + 1, option.title());
            let downsides = option.downsides();
            if downsides.is_empty() {
                println!("       no recorded downsides");
            }
            for c in downsides {
                println!("       - {} ({})", c.text(), c.score());
            }
            match option.mitigation_plan() {
                Some(plan) => println!("       plan: {}", plan),
                None => println!("       plan: (none yet)"),
            }
            for item in option.mitigation_upsides() {
                println!("         + {}", item.text());
            }
            for item in option.mitigation_downsides() {
                println!("         - {}", item.text());
            }
        }
    }
    println!();
    if ai {
        println!(
            "Actions: [1] write plan  [2] clear plan  [3] add analysis note  \
             [4] remove analysis note  [5] draft with AI"
        );
    } else {
        println!("Actions: [1] write plan  [2] clear plan  [3] add analysis note  [4] remove analysis note");
    }
}

fn render_resolve(session: &DecisionSession) {
    match session.resolve_phase() {
        ResolvePhase::Selection => {
            let candidates = session.state().candidates();
            if candidates.is_empty() {
                println!("No candidates to choose from. Go back to Evaluate and pick some.");
            } else {
                println!("Select the winner among your candidates:");
                for (i, option) in candidates.iter().enumerate() {
                    println!("  {}. {} (net {:+})", i + 1, option.title(), net_score(option));
                }
            }
            println!();
            println!("Actions: [1] commit to an option");
        }
        ResolvePhase::Commitment => {
            let state = session.state();
            if let Some(option) = state.final_decision() {
                println!("I have decided to: {}", option.title());
            }
            match state.commitment_reason() {
                Some(reason) => println!("Because: {}", reason),
                None => println!("Because: (no reason recorded yet)"),
            }
            println!();
            println!("Actions: [1] set commitment reason  [2] change decision  [3] print the record");
        }
    }
}

fn gate_hint(step: Step) -> String {
    match step {
        Step::Outcomes => "Describe your first outcome in a few words before moving on.".to_string(),
        Step::Options => "Add at least two options before moving on.".to_string(),
        Step::Evaluate => format!(
            "Select at least one candidate (up to {}) before moving on.",
            MAX_CANDIDATES
        ),
        Step::Resolve => "This is the final stage.".to_string(),
        Step::Consequences | Step::Mitigate => "Cannot advance from here.".to_string(),
    }
}

// ───────────────────────────────────────────────────────────────────
// Input helpers
// ───────────────────────────────────────────────────────────────────

async fn prompt(input: &mut Input, label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    match input.next_line().await {
        Ok(Some(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

async fn confirm(input: &mut Input, label: &str) -> bool {
    matches!(prompt(input, label).await.as_deref(), Some("y") | Some("yes"))
}

fn outcome_by_position(session: &DecisionSession, raw: &str) -> Option<OutcomeId> {
    let idx: usize = raw.parse().ok()?;
    session
        .state()
        .outcomes()
        .get(idx.checked_sub(1)?)
        .map(|o| o.id())
}

fn option_by_position(session: &DecisionSession, raw: &str) -> Option<OptionId> {
    let idx: usize = raw.parse().ok()?;
    session
        .state()
        .options()
        .get(idx.checked_sub(1)?)
        .map(|o| o.id())
}

/// The EVALUATE list is rendered in rank order, so selection follows it.
fn option_by_rank(session: &DecisionSession, raw: &str) -> Option<OptionId> {
    let idx: usize = raw.parse().ok()?;
    rank(session.state().options())
        .get(idx.checked_sub(1)?)
        .map(|(o, _)| o.id())
}

fn candidate_by_position(session: &DecisionSession, raw: &str) -> Option<OptionId> {
    let idx: usize = raw.parse().ok()?;
    session
        .state()
        .candidates()
        .get(idx.checked_sub(1)?)
        .map(|o| o.id())
}

// ───────────────────────────────────────────────────────────────────
// Stage actions
// ───────────────────────────────────────────────────────────────────

async fn handle_stage_action(
    session: &mut DecisionSession,
    suggestions: Option<&SuggestionService>,
    input: &mut Input,
    action: &str,
) {
    match session.step() {
        Step::Outcomes => outcomes_action(session, input, action).await,
        Step::Options => options_action(session, suggestions, input, action).await,
        Step::Consequences => consequences_action(session, suggestions, input, action).await,
        Step::Evaluate => evaluate_action(session, input, action).await,
        Step::Mitigate => mitigate_action(session, suggestions, input, action).await,
        Step::Resolve => resolve_action(session, input, action).await,
    }
}

fn unknown_action() {
    println!("Unknown action. Type a listed number, or next/back/reset/print/quit.");
}

async fn outcomes_action(session: &mut DecisionSession, input: &mut Input, action: &str) {
    match action {
        "1" => {
            let what = match prompt(input, "What result do you want? ").await {
                Some(v) => v,
                None => return,
            };
            let why = prompt(input, "Why do you want it? (optional) ")
                .await
                .unwrap_or_default();
            match session.add_outcome(what, why).await {
                Ok(_) => println!("Added."),
                Err(e) => println!("Cannot add: {}", e),
            }
        }
        "2" => {
            let raw = match prompt(input, "Remove which number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match outcome_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No outcome with that number.");
                    return;
                }
            };
            match session.remove_outcome(id).await {
                Ok(()) => println!("Removed."),
                Err(e) => println!("Cannot remove: {}", e),
            }
        }
        _ => unknown_action(),
    }
}

async fn options_action(
    session: &mut DecisionSession,
    suggestions: Option<&SuggestionService>,
    input: &mut Input,
    action: &str,
) {
    match action {
        "1" => {
            let title = match prompt(input, "Option title? ").await {
                Some(v) => v,
                None => return,
            };
            match session.add_option(title).await {
                Ok(_) => println!("Added."),
                Err(e) => println!("Cannot add: {}", e),
            }
        }
        "2" => {
            let raw = match prompt(input, "Remove which number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match option_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No option with that number.");
                    return;
                }
            };
            match session.remove_option(id).await {
                Ok(()) => println!("Removed."),
                Err(e) => println!("Cannot remove: {}", e),
            }
        }
        "3" => match suggestions {
            Some(oracle) => {
                println!("Asking for suggestions...");
                let added = session.brainstorm_options(oracle).await;
                if added == 0 {
                    println!("No new suggestions this time.");
                } else {
                    println!("Added {} suggested option(s).", added);
                }
            }
            None => println!("AI suggestions are disabled (no API key configured)."),
        },
        _ => unknown_action(),
    }
}

async fn consequences_action(
    session: &mut DecisionSession,
    suggestions: Option<&SuggestionService>,
    input: &mut Input,
    action: &str,
) {
    match action {
        "1" => {
            let raw = match prompt(input, "For which option number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match option_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No option with that number.");
                    return;
                }
            };
            let kind = match prompt(input, "Upside or downside? (u/d) ").await.as_deref() {
                Some("u") | Some("upside") => ConsequenceKind::Upside,
                Some("d") | Some("downside") => ConsequenceKind::Downside,
                Some(_) => {
                    println!("Answer u or d.");
                    return;
                }
                None => return,
            };
            let text = match prompt(input, "Describe it: ").await {
                Some(v) => v,
                None => return,
            };
            let raw_weight = match prompt(input, "Weight 1-10 (enter for 5): ").await {
                Some(v) => v,
                None => return,
            };
            let score = if raw_weight.is_empty() {
                Score::DEFAULT_MANUAL
            } else {
                match raw_weight.parse::<u8>().map(Score::try_new) {
                    Ok(Ok(score)) => score,
                    _ => {
                        println!("Weight must be a whole number from 1 to 10.");
                        return;
                    }
                }
            };
            match session.add_consequence(id, text, kind, score).await {
                Ok(_) => println!("Added."),
                Err(e) => println!("Cannot add: {}", e),
            }
        }
        "2" => {
            let raw = match prompt(input, "For which option number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match option_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No option with that number.");
                    return;
                }
            };
            let consequences: Vec<(ConsequenceId, String)> = match session.state().option(id) {
                Some(option) => option
                    .consequences()
                    .iter()
                    .map(|c| {
                        let sign = match c.kind() {
                            ConsequenceKind::Upside => '+',
                            ConsequenceKind::Downside => '-',
                        };
                        (c.id(), format!("{} {} ({})", sign, c.text(), c.score()))
                    })
                    .collect(),
                None => return,
            };
            if consequences.is_empty() {
                println!("That option has no consequences.");
                return;
            }
            for (i, (_, label)) in consequences.iter().enumerate() {
                println!("  {}. {}", i + 1, label);
            }
            let raw = match prompt(input, "Remove which number? ").await {
                Some(v) => v,
                None => return,
            };
            let picked = raw
                .parse::<usize>()
                .ok()
                .and_then(|v| v.checked_sub(1))
                .and_then(|i| consequences.get(i));
            let consequence_id = match picked {
                Some((cid, _)) => *cid,
                None => {
                    println!("No consequence with that number.");
                    return;
                }
            };
            match session.remove_consequence(id, consequence_id).await {
                Ok(()) => println!("Removed."),
                Err(e) => println!("Cannot remove: {}", e),
            }
        }
        "3" => match suggestions {
            Some(oracle) => {
                let raw = match prompt(input, "Autofill which option number? ").await {
                    Some(v) => v,
                    None => return,
                };
                let id = match option_by_position(session, &raw) {
                    Some(id) => id,
                    None => {
                        println!("No option with that number.");
                        return;
                    }
                };
                println!("Analyzing...");
                match session.autofill_consequences(oracle, id).await {
                    Ok(0) => println!(
                        "Nothing added. Autofill only fills options without consequences."
                    ),
                    Ok(n) => println!("Added {} suggested consequence(s).", n),
                    Err(e) => println!("Cannot autofill: {}", e),
                }
            }
            None => println!("AI suggestions are disabled (no API key configured)."),
        },
        _ => unknown_action(),
    }
}

async fn evaluate_action(session: &mut DecisionSession, input: &mut Input, action: &str) {
    match action {
        "1" => {
            let raw = match prompt(input, "Toggle which number (as listed)? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match option_by_rank(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No option with that number.");
                    return;
                }
            };
            match session.toggle_candidate(id).await {
                Ok(()) => println!("Toggled."),
                Err(e) => println!("Cannot toggle: {}", e),
            }
        }
        _ => unknown_action(),
    }
}

async fn mitigate_action(
    session: &mut DecisionSession,
    suggestions: Option<&SuggestionService>,
    input: &mut Input,
    action: &str,
) {
    match action {
        "1" => {
            let raw = match prompt(input, "For which candidate number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match candidate_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No candidate with that number.");
                    return;
                }
            };
            let plan = match prompt(input, "Your mitigation plan: ").await {
                Some(v) => v,
                None => return,
            };
            match session.set_mitigation_plan(id, Some(plan)).await {
                Ok(()) => println!("Plan saved."),
                Err(e) => println!("Cannot save: {}", e),
            }
        }
        "2" => {
            let raw = match prompt(input, "For which candidate number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match candidate_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No candidate with that number.");
                    return;
                }
            };
            match session.set_mitigation_plan(id, None).await {
                Ok(()) => println!("Plan cleared."),
                Err(e) => println!("Cannot clear: {}", e),
            }
        }
        "3" => {
            let raw = match prompt(input, "For which candidate number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match candidate_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No candidate with that number.");
                    return;
                }
            };
            let kind = match prompt(input, "Upside or downside of the plan? (u/d) ")
                .await
                .as_deref()
            {
                Some("u") | Some("upside") => MitigationKind::Upside,
                Some("d") | Some("downside") => MitigationKind::Downside,
                Some(_) => {
                    println!("Answer u or d.");
                    return;
                }
                None => return,
            };
            let text = match prompt(input, "Describe it: ").await {
                Some(v) => v,
                None => return,
            };
            match session.add_mitigation_item(id, kind, text).await {
                Ok(_) => println!("Added."),
                Err(e) => println!("Cannot add: {}", e),
            }
        }
        "4" => {
            let raw = match prompt(input, "For which candidate number? ").await {
                Some(v) => v,
                None => return,
            };
            let id = match candidate_by_position(session, &raw) {
                Some(id) => id,
                None => {
                    println!("No candidate with that number.");
                    return;
                }
            };
            let items: Vec<(MitigationKind, MitigationItemId, String)> =
                match session.state().option(id) {
                    Some(option) => option
                        .mitigation_upsides()
                        .iter()
                        .map(|item| (MitigationKind::Upside, item.id(), format!("+ {}", item.text())))
                        .chain(option.mitigation_downsides().iter().map(|item| {
                            (MitigationKind::Downside, item.id(), format!("- {}", item.text()))
                        }))
                        .collect(),
                    None => return,
                };
            if items.is_empty() {
                println!("No analysis notes on that candidate.");
                return;
            }
            for (i, (_, _, label)) in items.iter().enumerate() {
                println!("  {}. {}", i + 1, label);
            }
            let raw = match prompt(input, "Remove which number? ").await {
                Some(v) => v,
                None => return,
            };
            let picked = raw
                .parse::<usize>()
                .ok()
                .and_then(|v| v.checked_sub(1))
                .and_then(|i| items.get(i));
            let (kind, item_id) = match picked {
                Some((kind, item_id, _)) => (*kind, *item_id),
                None => {
                    println!("No note with that number.");
                    return;
                }
            };
            match session.remove_mitigation_item(id, kind, item_id).await {
                Ok(()) => println!("Removed."),
                Err(e) => println!("Cannot remove: {}", e),
            }
        }
        "5" => match suggestions {
            Some(oracle) => {
                let raw = match prompt(input, "Draft for which candidate number? ").await {
                    Some(v) => v,
                    None => return,
                };
                let id = match candidate_by_position(session, &raw) {
                    Some(id) => id,
                    None => {
                        println!("No candidate with that number.");
                        return;
                    }
                };
                println!("Drafting...");
                match session.draft_mitigation(oracle, id).await {
                    Ok(true) => println!("Plan drafted and analyzed."),
                    Ok(false) => println!("The oracle had nothing to offer this time."),
                    Err(e) => println!("Cannot draft: {}", e),
                }
            }
            None => println!("AI suggestions are disabled (no API key configured)."),
        },
        _ => unknown_action(),
    }
}

async fn resolve_action(session: &mut DecisionSession, input: &mut Input, action: &str) {
    match session.resolve_phase() {
        ResolvePhase::Selection => match action {
            "1" => {
                let raw = match prompt(input, "Commit to which number? ").await {
                    Some(v) => v,
                    None => return,
                };
                let id = match candidate_by_position(session, &raw) {
                    Some(id) => id,
                    None => {
                        println!("No candidate with that number.");
                        return;
                    }
                };
                match session.set_final_decision(Some(id), None).await {
                    Ok(()) => println!("Decision made. Now put your reason into words."),
                    Err(e) => println!("Cannot commit: {}", e),
                }
            }
            _ => unknown_action(),
        },
        ResolvePhase::Commitment => match action {
            "1" => {
                let reason = match prompt(input, "I am committed to this path because... ").await {
                    Some(v) => v,
                    None => return,
                };
                let id = match session.state().final_decision_id() {
                    Some(id) => id,
                    None => return,
                };
                match session.set_final_decision(Some(id), Some(reason)).await {
                    Ok(()) => println!("Commitment recorded."),
                    Err(e) => println!("Cannot record: {}", e),
                }
            }
            "2" => match session.set_final_decision(None, None).await {
                Ok(()) => println!("Decision cleared. Back to selection."),
                Err(e) => println!("Cannot clear: {}", e),
            },
            "3" => {
                println!();
                println!("{}", RecordGenerator::new().generate(session.state()));
            }
            _ => unknown_action(),
        },
    }
}
