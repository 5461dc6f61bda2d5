/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`:     Interactive chat session
- `ask`:      Submit a single message and print the reply
- `symptoms`: Symptom checker recommendation
- `emotion`:  Emotion detection on a still frame

Every handler drives the same library components: a `SessionStore`, an
`InputCoordinator` and a `Responder` picked by assistant mode.
*/

use crate::assistant_mode::AssistantMode;
use crate::config::Config;
use crate::error::Result;
use crate::responders::{AgeGroup, Subject};
use crate::session::{Message, Role, SessionStore};
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

// Special commands parser for the chat prompt
pub mod special_commands;

/// Applies per-invocation overrides on top of the loaded configuration
///
/// # Returns
///
/// The adjusted configuration and the mode the session starts in
///
/// # Errors
///
/// Returns error if a mode, subject or age group name is unknown
pub fn apply_session_overrides(
    mut config: Config,
    mode: Option<&str>,
    subject: Option<&str>,
    age_group: Option<&str>,
    seed: Option<u64>,
) -> Result<(Config, AssistantMode)> {
    let mode = match mode {
        Some(name) => name.parse::<AssistantMode>()?,
        None => config.session.default_mode,
    };
    if let Some(name) = subject {
        config.tutor.subject = name.parse::<Subject>()?;
    }
    if let Some(name) = age_group {
        config.tutor.age_group = name.parse::<AgeGroup>()?;
    }
    if seed.is_some() {
        config.session.seed = seed;
    }
    Ok((config, mode))
}

/// Writes `text` one character at a time, then a newline
///
/// A zero interval writes the whole text at once.
pub async fn typewrite<W: Write>(out: &mut W, text: &str, interval: Duration) -> Result<()> {
    if interval.is_zero() {
        writeln!(out, "{}", text)?;
        return Ok(());
    }
    for ch in text.chars() {
        write!(out, "{}", ch)?;
        out.flush()?;
        tokio::time::sleep(interval).await;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Prints assistant messages the user has not seen yet
///
/// # Arguments
///
/// * `store` - Session being displayed
/// * `shown` - Number of messages already on screen
/// * `interval` - Typewriter delay per character
///
/// # Returns
///
/// The new number of messages on screen
pub async fn render_new_replies<W: Write>(
    out: &mut W,
    store: &SessionStore,
    shown: usize,
    interval: Duration,
) -> Result<usize> {
    let messages = store.messages();
    // The store was cleared since the last render
    let start = if shown > messages.len() { 0 } else { shown };

    for message in &messages[start..] {
        if message.role() == Role::Assistant {
            writeln!(out)?;
            typewrite(out, message.content(), interval).await?;
            writeln!(out)?;
        }
    }
    Ok(messages.len())
}

fn role_label(message: &Message) -> String {
    match message.role() {
        Role::User => "You".bold().to_string(),
        Role::Assistant => "Assistant".cyan().bold().to_string(),
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Runs a readline loop over one session. Typed lines and `/voice`
    //! dictation both go through the session's `InputCoordinator`; replies
    //! are read back from the `SessionStore` and typed out.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::error::EdcareError;
    use crate::responders::{create_responder, SymptomResponder};
    use crate::session::{InputCoordinator, SubmitOutcome};
    use crate::speech::{listen_once, DictationRecognizer};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Simulated speaking pace for `/voice`
    const DICTATION_WORD_INTERVAL: Duration = Duration::from_millis(150);

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `mode` - Optional override for the starting assistant
    /// * `subject` - Optional override for the tutor subject
    /// * `age_group` - Optional override for the tutor age group
    /// * `seed` - Optional seed for reproducible replies
    ///
    /// # Errors
    ///
    /// Returns error if an override is invalid or the terminal can not be
    /// opened
    pub async fn run_chat(
        config: Config,
        mode: Option<String>,
        subject: Option<String>,
        age_group: Option<String>,
        seed: Option<u64>,
    ) -> Result<()> {
        let (mut config, mut mode) = apply_session_overrides(
            config,
            mode.as_deref(),
            subject.as_deref(),
            age_group.as_deref(),
            seed,
        )?;

        let store = SessionStore::new();
        let mut coordinator = InputCoordinator::new(
            store.clone(),
            create_responder(mode, &config),
            mode.reply_delay(&config),
        );
        tracing::info!(session_id = %store.id(), %mode, "Starting interactive chat");

        let mut rl = DefaultEditor::new().map_err(EdcareError::from)?;
        let typing = Duration::from_millis(config.session.typing_interval_ms);
        let mut stdout = std::io::stdout();
        let mut shown = 0;

        print_welcome_banner(mode);

        loop {
            shown = render_new_replies(&mut stdout, &store, shown, typing).await?;

            let prompt = mode.format_colored_prompt(store.is_busy());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed).map_err(EdcareError::from)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::SwitchMode(new_mode) => {
                            handle_mode_switch(&mut coordinator, &mut mode, new_mode, &config);
                        }
                        SpecialCommand::SwitchSubject(subject) => {
                            config.tutor.subject = subject;
                            println!("Tutor subject set to {}\n", subject);
                            refresh_tutor(&mut coordinator, mode, &config);
                        }
                        SpecialCommand::SwitchAgeGroup(age_group) => {
                            config.tutor.age_group = age_group;
                            println!("Tutor age group set to {}\n", age_group);
                            refresh_tutor(&mut coordinator, mode, &config);
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&coordinator, mode, &config);
                        }
                        SpecialCommand::ShowHistory => print_history(&store),
                        SpecialCommand::Clear => {
                            store.clear();
                            shown = 0;
                            println!("Conversation cleared\n");
                        }
                        SpecialCommand::Voice(spoken) => {
                            let mut recognizer = DictationRecognizer::new(&spoken)
                                .with_word_interval(DICTATION_WORD_INTERVAL);
                            println!("{}", "Listening...".dimmed());
                            let outcome =
                                listen_once(&mut recognizer, &mut coordinator, |interim| {
                                    print!("\r{}", interim.dimmed());
                                    let _ = std::io::stdout().flush();
                                })
                                .await;
                            println!();
                            match outcome {
                                Ok(Some(outcome)) => {
                                    shown = handle_outcome(
                                        &mut stdout,
                                        &store,
                                        outcome,
                                        shown,
                                        typing,
                                    )
                                    .await?;
                                }
                                Ok(None) => println!("{}\n", "Nothing was heard".yellow()),
                                Err(e) => eprintln!("{}\n", e.to_string().red()),
                            }
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            let outcome = coordinator.submit(&line);
                            shown =
                                handle_outcome(&mut stdout, &store, outcome, shown, typing).await?;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        coordinator.shutdown().await;
        tracing::info!(
            session_id = %store.id(),
            messages = store.snapshot().len(),
            "Chat session ended"
        );
        println!("Goodbye!");
        Ok(())
    }

    /// Reports a submission outcome and, when accepted, waits for the reply
    async fn handle_outcome<W: Write>(
        out: &mut W,
        store: &SessionStore,
        outcome: SubmitOutcome,
        shown: usize,
        typing: Duration,
    ) -> Result<usize> {
        match outcome {
            SubmitOutcome::Accepted => {
                println!("{}", "Thinking...".dimmed());
                store.wait_until_idle().await;
                render_new_replies(out, store, shown, typing).await
            }
            SubmitOutcome::Busy => {
                println!(
                    "{}\n",
                    "Please wait for the current reply before sending another message".yellow()
                );
                Ok(shown)
            }
            SubmitOutcome::Empty => Ok(shown),
        }
    }

    /// Swaps the session's assistant
    ///
    /// # Returns
    ///
    /// Returns true if the switch happened; false while a reply is pending
    pub(crate) fn handle_mode_switch(
        coordinator: &mut InputCoordinator,
        mode: &mut AssistantMode,
        new_mode: AssistantMode,
        config: &Config,
    ) -> bool {
        let responder = create_responder(new_mode, config);
        if !coordinator.set_responder(responder, new_mode.reply_delay(config)) {
            println!(
                "{}\n",
                "Can not switch assistant while a reply is pending".yellow()
            );
            return false;
        }

        let old_mode = *mode;
        *mode = new_mode;
        tracing::info!(from = %old_mode, to = %new_mode, "Assistant switched");
        println!("Switched from {} to {} mode\n", old_mode, new_mode);
        if new_mode == AssistantMode::Symptoms {
            println!("{}\n", SymptomResponder::prompt_for_symptoms());
        }
        true
    }

    /// Rebuilds the tutor after its subject or age group changed
    fn refresh_tutor(coordinator: &mut InputCoordinator, mode: AssistantMode, config: &Config) {
        if mode != AssistantMode::Tutor {
            return;
        }
        let responder = create_responder(mode, config);
        if !coordinator.set_responder(responder, mode.reply_delay(config)) {
            println!(
                "{}\n",
                "The new tutor settings apply after the pending reply".yellow()
            );
        }
    }

    /// Display welcome banner at the start of a chat session
    fn print_welcome_banner(mode: AssistantMode) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            edcare Interactive Chat - Welcome!                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Assistant: {} ({})\n", mode.colored_tag(), mode.description());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display detailed status information about the current session
    fn print_status_display(coordinator: &InputCoordinator, mode: AssistantMode, config: &Config) {
        let state = coordinator.store().snapshot();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     edcare Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session:           {}", coordinator.store().id());
        println!(
            "Assistant:         {} ({})",
            mode.colored_tag(),
            mode.description()
        );
        println!("Responder:         {}", coordinator.responder_name());
        println!("Reply Delay:       {} ms", coordinator.reply_delay().as_millis());
        if mode == AssistantMode::Tutor {
            println!(
                "Tutor:             {} / {}",
                config.tutor.subject.label(),
                config.tutor.age_group.label()
            );
        }
        println!("Conversation Size: {} messages", state.len());
        println!(
            "Reply Pending:     {}",
            if state.is_busy() { "yes" } else { "no" }
        );
        println!("Prompt Format:     {}", mode.format_colored_prompt(state.is_busy()));
        println!();
    }

    fn print_history(store: &SessionStore) {
        let messages = store.messages();
        if messages.is_empty() {
            println!("No messages yet\n");
            return;
        }
        println!();
        for message in &messages {
            println!("{}: {}\n", role_label(message), message.content());
        }
    }

}

// One-shot ask handler
pub mod ask {
    //! Submit one message and print the reply.

    use super::*;
    use crate::error::EdcareError;
    use crate::responders::create_responder;
    use crate::session::{InputCoordinator, SessionState, SubmitOutcome};

    /// Runs one submission through a fresh session and waits for the reply
    ///
    /// # Returns
    ///
    /// The final session state: the user message and the assistant reply
    ///
    /// # Errors
    ///
    /// Returns error if the text is blank
    pub async fn ask_once(mode: AssistantMode, config: &Config, text: &str) -> Result<SessionState> {
        let store = SessionStore::new();
        let mut coordinator = InputCoordinator::new(
            store.clone(),
            create_responder(mode, config),
            mode.reply_delay(config),
        );

        match coordinator.submit(text) {
            SubmitOutcome::Accepted => {}
            SubmitOutcome::Empty | SubmitOutcome::Busy => {
                return Err(EdcareError::InvalidValue {
                    kind: "message",
                    value: text.to_string(),
                }
                .into());
            }
        }

        store.wait_until_idle().await;
        coordinator.shutdown().await;
        Ok(store.snapshot())
    }

    /// Handle the `ask` command
    ///
    /// # Errors
    ///
    /// Returns error if an override is invalid or the text is blank
    pub async fn run_ask(
        config: Config,
        mode: Option<String>,
        subject: Option<String>,
        age_group: Option<String>,
        seed: Option<u64>,
        json: bool,
        text: Vec<String>,
    ) -> Result<()> {
        let (config, mode) = apply_session_overrides(
            config,
            mode.as_deref(),
            subject.as_deref(),
            age_group.as_deref(),
            seed,
        )?;
        let text = text.join(" ");
        tracing::info!(%mode, "Asking once");

        let state = ask_once(mode, &config, &text).await?;

        if json {
            let output = serde_json::json!({
                "mode": mode,
                "messages": state.messages(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if let Some(reply) = state
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
        {
            let typing = Duration::from_millis(config.session.typing_interval_ms);
            typewrite(&mut std::io::stdout(), reply.content(), typing).await?;
        }
        Ok(())
    }

}

// Symptom checker handler
pub mod symptoms {
    //! Recommend care for a list of symptom ids.

    use super::*;
    use crate::error::EdcareError;
    use crate::responders::SymptomSet;

    /// Shown under every recommendation
    pub const MEDICAL_NOTICE: &str = "This is an AI-generated recommendation and should not replace professional medical advice. Always consult a healthcare provider for proper diagnosis and treatment.";

    /// Handle the `symptoms` command
    ///
    /// # Errors
    ///
    /// Returns error if an id is not a known symptom or none were given
    pub fn run_symptoms(ids: Vec<String>, json: bool) -> Result<()> {
        let set = SymptomSet::parse_ids(&ids)?;
        let recommendation = set.recommendation().ok_or(EdcareError::InvalidValue {
            kind: "symptom list",
            value: String::new(),
        })?;
        tracing::info!(symptoms = ?set.symptoms(), "Symptom check");

        if json {
            let output = serde_json::json!({
                "symptoms": set.symptoms(),
                "recommendation": recommendation,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let labels: Vec<&str> = set.symptoms().iter().map(|s| s.label()).collect();
        println!("{} {}\n", "Symptoms:".bold(), labels.join(", "));
        println!("{}\n{}\n", "Recommendation:".bold(), recommendation);
        println!("{}", MEDICAL_NOTICE.dimmed());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_run_symptoms_accepts_known_ids() {
            let ids = vec!["headache".to_string(), "fatigue".to_string()];
            assert!(run_symptoms(ids, true).is_ok());
        }

        #[test]
        fn test_run_symptoms_rejects_unknown_id() {
            let err = run_symptoms(vec!["rash".to_string()], false).unwrap_err();
            assert_eq!(err.to_string(), "Invalid symptom: rash");
        }

        #[test]
        fn test_run_symptoms_rejects_empty_list() {
            assert!(run_symptoms(Vec::new(), false).is_err());
        }
    }
}

// Emotion detection handler
pub mod emotion {
    //! Read the emotion on a still frame.

    use super::*;
    use crate::emotion::{
        detect_from_source, RandomEmotionDetector, StillImageSource, NO_EMOTION_RECOMMENDATION,
    };
    use std::path::Path;

    /// Handle the `emotion` command
    ///
    /// # Errors
    ///
    /// Returns the capture error if the frame can not be read
    pub async fn run_emotion(
        config: &Config,
        frame: &Path,
        seed: Option<u64>,
        json: bool,
    ) -> Result<()> {
        let mut source = StillImageSource::new(frame);
        let detector =
            RandomEmotionDetector::from_config(&config.emotion, seed.or(config.session.seed));

        if !json {
            println!("{}", "Analyzing...".dimmed());
        }

        let reading = match detect_from_source(&mut source, &detector).await {
            Ok(reading) => reading,
            Err(e) => {
                if !json {
                    println!("{}", NO_EMOTION_RECOMMENDATION);
                }
                return Err(e);
            }
        };

        if json {
            let output = serde_json::json!({
                "emotion": reading.emotion,
                "confidence": reading.confidence,
                "recommendation": reading.recommendation(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!(
            "{} {} ({}% confidence)\n",
            "Emotion:".bold(),
            reading.emotion.as_str().cyan(),
            reading.confidence
        );
        println!("{}\n{}", "Recommendation:".bold(), reading.recommendation());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_run_emotion_missing_frame_is_error() {
            let err = run_emotion(
                &Config::default(),
                Path::new("/nonexistent/face.jpg"),
                Some(1),
                true,
            )
            .await
            .unwrap_err();
            assert!(err.to_string().contains("Could not access camera"));
        }

        #[tokio::test]
        async fn test_run_emotion_reads_frame() {
            let file = tempfile::NamedTempFile::new().unwrap();
            std::fs::write(file.path(), b"frame").unwrap();
            let config = crate::test_utils::fast_config();

            assert!(run_emotion(&config, file.path(), Some(5), true).await.is_ok());
        }
    }
}
