//! The orchestration loop.
//!
//! A [`Session`] owns the conversation history and drives one user turn at
//! a time through the state machine:
//!
//! ```text
//! AwaitInput → RouteLocal → LocalAnswered ─────────────────────────────┐
//!                        └→ NeedsGeneration → ContextLookup → PromptBuild
//!                           → Streaming → Persisted ──────────→ AwaitInput
//! ```
//!
//! Every failure is caught at the turn boundary. Only an exit command moves
//! the session to `Ended`.

use std::sync::Arc;
use std::time::Duration;

use parley_config::AppConfig;
use parley_core::context::ContextProvider;
use parley_core::error::{BackendError, TurnError};
use parley_core::handler::{HandlerRegistry, LocalAnswer};
use parley_core::message::{History, SessionId, Turn};
use parley_core::provider::{GenerationBackend, GenerationRequest, StreamEvent, Usage};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace, warn};

use crate::assembler::PromptAssembler;
use crate::stream_event::SessionEvent;

/// Where the session currently is in the per-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitInput,
    RouteLocal,
    LocalAnswered,
    NeedsGeneration,
    ContextLookup,
    PromptBuild,
    Streaming,
    Persisted,
    Ended,
}

/// How a single call to [`Session::handle_turn`] resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// A local handler answered.
    Local(LocalAnswer),
    /// The backend answered; the text was appended to the history.
    Generated {
        content: String,
        usage: Option<Usage>,
    },
    /// The turn was aborted. The session is still live.
    Failed(TurnError),
    /// The session is over.
    Ended,
}

/// Per-session behaviour, usually derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub exit_commands: Vec<String>,
    pub system_prompt: Option<String>,
    pub instruction: String,
    pub turn_timeout: Option<Duration>,
    pub history_max_turns: Option<usize>,
    pub record_local_answers: bool,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            exit_commands: config.session.exit_commands.clone(),
            system_prompt: config
                .session
                .system_prompt
                .clone()
                .filter(|p| !p.trim().is_empty()),
            instruction: config.session.instruction.clone(),
            turn_timeout: config
                .session
                .turn_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            history_max_turns: config.session.history_max_turns,
            record_local_answers: config.session.record_local_answers,
            temperature: config.backend.temperature,
            max_tokens: config.backend.max_tokens,
        }
    }

    /// Case-insensitive match against the exit commands.
    pub fn is_exit_command(&self, input: &str) -> bool {
        let input = input.trim();
        !input.is_empty()
            && self
                .exit_commands
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(input))
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// One conversation with its own history and collaborators.
pub struct Session {
    id: SessionId,
    settings: SessionSettings,
    state: SessionState,
    history: History,
    assembler: PromptAssembler,
    backend: Arc<dyn GenerationBackend>,
    handlers: Arc<HandlerRegistry>,
    context: Arc<dyn ContextProvider>,
}

impl Session {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        handlers: Arc<HandlerRegistry>,
        context: Arc<dyn ContextProvider>,
        settings: SessionSettings,
    ) -> Self {
        let history = match &settings.system_prompt {
            Some(framing) => History::with_system(framing.clone()),
            None => History::new(),
        };
        let assembler = PromptAssembler::new(settings.instruction.clone())
            .with_max_turns(settings.history_max_turns);

        let session = Self {
            id: SessionId::new(),
            settings,
            state: SessionState::AwaitInput,
            history,
            assembler,
            backend,
            handlers,
            context,
        };
        info!(
            session_id = %session.id,
            backend = %session.backend.name(),
            model = %session.backend.model(),
            "Session started"
        );
        session
    }

    /// Wire the configured backend, the built-in handlers and the keyword
    /// context provider into a new session.
    pub fn from_config(config: &AppConfig) -> parley_core::Result<Self> {
        let backend = parley_providers::build_from_config(config);
        let handlers = parley_handlers::default_registry(config)?;
        let context = parley_handlers::default_context(config);
        Ok(Self::new(
            backend,
            Arc::new(handlers),
            Arc::new(context),
            SessionSettings::from_config(config),
        ))
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn backend(&self) -> &dyn GenerationBackend {
        self.backend.as_ref()
    }

    /// Handle one line of user input.
    ///
    /// Output is sent on `events` as it is produced; the returned outcome
    /// summarises the turn. Never fails: errors become
    /// [`TurnOutcome::Failed`] and the session stays usable.
    pub async fn handle_turn(
        &mut self,
        input: &str,
        events: &UnboundedSender<SessionEvent>,
    ) -> TurnOutcome {
        if self.is_ended() {
            return TurnOutcome::Ended;
        }

        let text = input.trim();
        if self.settings.is_exit_command(text) {
            info!(session_id = %self.id, turns = self.history.len(), "Session ended");
            self.transition(SessionState::Ended);
            let _ = events.send(SessionEvent::Ended);
            return TurnOutcome::Ended;
        }
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }

        self.transition(SessionState::RouteLocal);
        let routed = self.handlers.match_and_execute(text).await;
        match routed {
            Ok(Some(answer)) => return self.finish_local(text, answer, events),
            Ok(None) => {}
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Local handler failed, falling back to generation");
            }
        }

        self.transition(SessionState::NeedsGeneration);
        let timeout = self.settings.turn_timeout;
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.generate(text, events)).await {
                Ok(result) => result,
                Err(_) => Err(TurnError::Timeout {
                    secs: limit.as_secs(),
                }),
            },
            None => self.generate(text, events).await,
        };

        let outcome = match result {
            Ok((content, usage)) => {
                let _ = events.send(SessionEvent::Done { usage });
                TurnOutcome::Generated { content, usage }
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Turn aborted");
                let _ = events.send(SessionEvent::Error {
                    message: e.to_string(),
                });
                TurnOutcome::Failed(e)
            }
        };
        self.transition(SessionState::AwaitInput);
        outcome
    }

    fn finish_local(
        &mut self,
        text: &str,
        answer: LocalAnswer,
        events: &UnboundedSender<SessionEvent>,
    ) -> TurnOutcome {
        self.transition(SessionState::LocalAnswered);
        debug!(session_id = %self.id, handler = %answer.handler, "Answered locally");

        if self.settings.record_local_answers {
            self.history.append(Turn::user(text));
            self.history.append(Turn::assistant(answer.content.clone()));
        }

        let _ = events.send(SessionEvent::LocalAnswer {
            handler: answer.handler.clone(),
            content: answer.content.clone(),
        });
        self.transition(SessionState::AwaitInput);
        TurnOutcome::Local(answer)
    }

    /// Context lookup, prompt build and streaming for one turn.
    ///
    /// The user turn is appended before the prompt is built; the assistant
    /// turn only once the stream has completed.
    async fn generate(
        &mut self,
        text: &str,
        events: &UnboundedSender<SessionEvent>,
    ) -> Result<(String, Option<Usage>), TurnError> {
        self.transition(SessionState::ContextLookup);
        let retrieved = self.context.retrieve(text).await;
        let passage = match retrieved {
            Ok(passage) if !passage.trim().is_empty() => passage,
            Ok(_) => self.context.fallback_passage().to_string(),
            Err(e) => {
                warn!(session_id = %self.id, provider = %self.context.name(), error = %e, "Context lookup failed, using fallback");
                self.context.fallback_passage().to_string()
            }
        };

        let current = Turn::user(text);
        self.history.append(current.clone());

        self.transition(SessionState::PromptBuild);
        let backend = Arc::clone(&self.backend);
        let format = backend.prompt_format();
        let payload = self
            .assembler
            .assemble(&passage, &self.history, &current, format);
        let request = GenerationRequest {
            model: backend.model().to_string(),
            payload,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        self.transition(SessionState::Streaming);
        debug!(
            session_id = %self.id,
            backend = %backend.name(),
            format = format.name(),
            history = self.history.len(),
            "Requesting generation"
        );
        let _ = events.send(SessionEvent::Thinking);
        let mut stream = backend.generate(request).await?;

        let mut answer = String::new();
        let usage = loop {
            match stream.recv().await {
                Some(Ok(StreamEvent::Fragment { content })) => {
                    answer.push_str(&content);
                    let _ = events.send(SessionEvent::Chunk { content });
                }
                Some(Ok(StreamEvent::End { usage })) => break usage,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(BackendError::StreamInterrupted(
                        "stream closed before completion".into(),
                    )
                    .into());
                }
            }
        };

        let answer = answer.trim_end().to_string();
        self.history.append(Turn::assistant(answer.clone()));
        self.transition(SessionState::Persisted);
        Ok((answer, usage))
    }

    fn transition(&mut self, next: SessionState) {
        trace!(session_id = %self.id, from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::error::{ContextError, HandlerError};
    use parley_core::handler::{HandlerArgs, KeywordRule, LocalHandler, Route};
    use parley_core::message::Role;
    use parley_core::prompt::{FlatTemplate, PromptFormat};
    use parley_core::provider::FragmentStream;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    enum Script {
        Reply(Vec<&'static str>),
        FailAfter(Vec<&'static str>),
        CloseEarly(Vec<&'static str>),
        Refuse,
        Hang,
    }

    /// Plays back one script per `generate` call and records the requests.
    struct ScriptedBackend {
        scripts: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<GenerationRequest>>,
        format: FlatTemplate,
    }

    impl ScriptedBackend {
        fn new(scripts: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(scripts.into()),
                requests: Mutex::new(Vec::new()),
                format: FlatTemplate,
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.payload.as_text().unwrap_or_default().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }
        fn model(&self) -> &str {
            "test-model"
        }
        fn prompt_format(&self) -> &dyn PromptFormat {
            &self.format
        }

        async fn generate(&self, request: GenerationRequest) -> Result<FragmentStream, BackendError> {
            self.requests.lock().unwrap().push(request);
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Script::Reply(vec!["ok"]));

            let (tx, rx) = mpsc::channel(16);
            match script {
                Script::Refuse => {
                    return Err(BackendError::Unavailable("connection refused".into()));
                }
                Script::Reply(fragments) => {
                    tokio::spawn(async move {
                        for f in fragments {
                            let _ = tx.send(Ok(StreamEvent::Fragment { content: f.into() })).await;
                        }
                        let _ = tx.send(Ok(StreamEvent::End { usage: None })).await;
                    });
                }
                Script::FailAfter(fragments) => {
                    tokio::spawn(async move {
                        for f in fragments {
                            let _ = tx.send(Ok(StreamEvent::Fragment { content: f.into() })).await;
                        }
                        let _ = tx
                            .send(Err(BackendError::StreamInterrupted("connection reset".into())))
                            .await;
                    });
                }
                Script::CloseEarly(fragments) => {
                    tokio::spawn(async move {
                        for f in fragments {
                            let _ = tx.send(Ok(StreamEvent::Fragment { content: f.into() })).await;
                        }
                    });
                }
                Script::Hang => {
                    tokio::spawn(async move {
                        let _tx = tx;
                        std::future::pending::<()>().await;
                    });
                }
            }
            Ok(rx)
        }
    }

    struct BrokenBalance;

    #[async_trait]
    impl LocalHandler for BrokenBalance {
        fn name(&self) -> &str {
            "balance_lookup"
        }
        fn description(&self) -> &str {
            "always fails"
        }
        async fn execute(&self, _args: HandlerArgs) -> Result<String, HandlerError> {
            Err(HandlerError::ExecutionFailed {
                handler: "balance_lookup".into(),
                reason: "ledger offline".into(),
            })
        }
    }

    struct OfflineContext;

    #[async_trait]
    impl ContextProvider for OfflineContext {
        fn name(&self) -> &str {
            "offline"
        }
        async fn retrieve(&self, _text: &str) -> Result<String, ContextError> {
            Err(ContextError::Unavailable("index offline".into()))
        }
        fn fallback_passage(&self) -> &str {
            "Passagem genérica."
        }
    }

    fn instant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.handler_latency_ms = 0;
        config.simulation.context_latency_ms = 0;
        config
    }

    fn session_with(backend: Arc<ScriptedBackend>, config: &AppConfig) -> Session {
        Session::new(
            backend,
            Arc::new(parley_handlers::default_registry(config).unwrap()),
            Arc::new(parley_handlers::default_context(config)),
            SessionSettings::from_config(config),
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn local_answer_bypasses_history() {
        let backend = ScriptedBackend::new(vec![]);
        let mut session = session_with(backend.clone(), &instant_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("qual o saldo do cliente?", &tx).await;

        let TurnOutcome::Local(answer) = outcome else {
            panic!("expected a local answer, got {outcome:?}");
        };
        assert_eq!(answer.handler, "balance_lookup");
        assert_eq!(answer.content, "O saldo disponível do cliente 123 é de R$ 732,50.");
        assert_eq!(session.history().len(), 1); // framing only
        assert!(backend.prompts().is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![SessionEvent::LocalAnswer {
                handler: "balance_lookup".into(),
                content: answer.content.clone(),
            }]
        );
        assert_eq!(session.state(), SessionState::AwaitInput);
    }

    #[tokio::test]
    async fn recorded_local_answers_join_history() {
        let mut config = instant_config();
        config.session.record_local_answers = true;
        let mut session = session_with(ScriptedBackend::new(vec![]), &config);
        let (tx, _rx) = mpsc::unbounded_channel();

        session.handle_turn("quero gerar nota fiscal", &tx).await;

        let turns = session.history().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].to_line(), "user: quero gerar nota fiscal");
        assert!(turns[2].content().contains("NF-2025-00123"));
    }

    #[tokio::test]
    async fn generated_answer_streams_and_persists() {
        let backend = ScriptedBackend::new(vec![Script::Reply(vec!["Contratos ", "são vínculos.\n\n"])]);
        let mut session = session_with(backend.clone(), &instant_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = session
            .handle_turn("me explique sobre contratos em geral", &tx)
            .await;

        assert_eq!(
            outcome,
            TurnOutcome::Generated {
                content: "Contratos são vínculos.".into(),
                usage: None,
            }
        );

        let turns = session.history().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].role(), Role::User);
        assert_eq!(turns[1].content(), "me explique sobre contratos em geral");
        assert_eq!(turns[2].role(), Role::Assistant);
        assert_eq!(turns[2].content(), "Contratos são vínculos.");

        let prompt = &backend.prompts()[0];
        assert!(prompt.contains("o módulo de Contratos gerencia"));
        assert!(prompt.contains("user: me explique sobre contratos em geral\n\nAnswer clearly"));

        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::Thinking,
                SessionEvent::Chunk { content: "Contratos ".into() },
                SessionEvent::Chunk { content: "são vínculos.\n\n".into() },
                SessionEvent::Done { usage: None },
            ]
        );
        assert_eq!(session.state(), SessionState::AwaitInput);
    }

    #[tokio::test]
    async fn mid_stream_failure_keeps_session_alive() {
        let backend = ScriptedBackend::new(vec![
            Script::FailAfter(vec!["Parcial"]),
            Script::Reply(vec!["Recuperado."]),
        ]);
        let mut session = session_with(backend, &instant_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("o que é consignação?", &tx).await;
        assert!(matches!(
            outcome,
            TurnOutcome::Failed(TurnError::Backend(BackendError::StreamInterrupted(_)))
        ));
        assert_eq!(session.history().count(Role::Assistant), 0);
        assert_eq!(session.history().count(Role::User), 1);

        let events = drain(&mut rx);
        assert!(matches!(events.last(), Some(SessionEvent::Error { message }) if message.contains("connection reset")));

        let outcome = session.handle_turn("tente de novo", &tx).await;
        assert!(matches!(outcome, TurnOutcome::Generated { .. }));
        assert_eq!(session.history().count(Role::Assistant), 1);
    }

    #[tokio::test]
    async fn unreachable_backend_fails_turn() {
        let mut session = session_with(ScriptedBackend::new(vec![Script::Refuse]), &instant_config());
        let (tx, _rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("olá", &tx).await;
        assert_eq!(
            outcome,
            TurnOutcome::Failed(TurnError::Backend(BackendError::Unavailable(
                "connection refused".into()
            )))
        );
        assert_eq!(session.history().count(Role::Assistant), 0);
        assert!(!session.is_ended());
    }

    #[tokio::test]
    async fn stream_closed_without_end_is_failure() {
        let mut session = session_with(
            ScriptedBackend::new(vec![Script::CloseEarly(vec!["meio"])]),
            &instant_config(),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("olá", &tx).await;
        assert!(matches!(
            outcome,
            TurnOutcome::Failed(TurnError::Backend(BackendError::StreamInterrupted(_)))
        ));
        assert_eq!(session.history().count(Role::Assistant), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_backend_times_out() {
        let mut config = instant_config();
        config.session.turn_timeout_secs = Some(5);
        let mut session = session_with(ScriptedBackend::new(vec![Script::Hang]), &config);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("olá", &tx).await;
        assert_eq!(outcome, TurnOutcome::Failed(TurnError::Timeout { secs: 5 }));
        assert_eq!(session.history().count(Role::Assistant), 0);
        assert_eq!(session.state(), SessionState::AwaitInput);
        assert!(matches!(
            drain(&mut rx).last(),
            Some(SessionEvent::Error { message }) if message == "Turn timed out after 5s"
        ));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let backend = ScriptedBackend::new(vec![]);
        let mut session = session_with(backend.clone(), &instant_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert_eq!(session.handle_turn("   \t", &tx).await, TurnOutcome::Ignored);
        assert_eq!(session.handle_turn("", &tx).await, TurnOutcome::Ignored);
        assert_eq!(session.history().len(), 1);
        assert!(drain(&mut rx).is_empty());
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn exit_command_ends_session() {
        let backend = ScriptedBackend::new(vec![]);
        let mut session = session_with(backend.clone(), &instant_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert_eq!(session.handle_turn("  SAIR ", &tx).await, TurnOutcome::Ended);
        assert!(session.is_ended());
        assert_eq!(drain(&mut rx), vec![SessionEvent::Ended]);

        assert_eq!(session.handle_turn("olá", &tx).await, TurnOutcome::Ended);
        assert_eq!(session.history().len(), 1);
        assert!(backend.prompts().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn handler_failure_falls_back_to_generation() {
        let config = instant_config();
        let mut registry = HandlerRegistry::new();
        registry.register(Box::new(BrokenBalance));
        registry
            .add_route(Route {
                handler: "balance_lookup".into(),
                subject_id: "123".into(),
                rule: KeywordRule::new(["saldo", "cliente"], Vec::<&str>::new()),
            })
            .unwrap();

        let backend = ScriptedBackend::new(vec![Script::Reply(vec!["Gerado."])]);
        let mut session = Session::new(
            backend.clone(),
            Arc::new(registry),
            Arc::new(parley_handlers::default_context(&config)),
            SessionSettings::from_config(&config),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        let outcome = session.handle_turn("qual o saldo do cliente?", &tx).await;
        assert!(matches!(outcome, TurnOutcome::Generated { ref content, .. } if content == "Gerado."));
        assert!(backend.prompts()[0].contains("saldo representa o valor"));
    }

    #[tokio::test]
    async fn context_failure_uses_fallback_passage() {
        let config = instant_config();
        let backend = ScriptedBackend::new(vec![]);
        let mut session = Session::new(
            backend.clone(),
            Arc::new(parley_handlers::default_registry(&config).unwrap()),
            Arc::new(OfflineContext),
            SessionSettings::from_config(&config),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        session.handle_turn("me explique sobre contratos", &tx).await;
        assert!(backend.prompts()[0].starts_with("### SYSTEM CONTEXT ###\nPassagem genérica.\n"));
    }

    #[tokio::test]
    async fn history_window_limits_prompt() {
        let mut config = instant_config();
        config.session.history_max_turns = Some(2);
        let backend = ScriptedBackend::new(vec![
            Script::Reply(vec!["r1"]),
            Script::Reply(vec!["r2"]),
        ]);
        let mut session = session_with(backend.clone(), &config);
        let (tx, _rx) = mpsc::unbounded_channel();

        session.handle_turn("pergunta um", &tx).await;
        session.handle_turn("pergunta dois", &tx).await;

        let prompt = &backend.prompts()[1];
        assert!(prompt.contains("system: Você é um assistente do sistema SICON"));
        assert!(!prompt.contains("pergunta um"));
        assert!(prompt.contains("assistant: r1\nuser: pergunta dois"));
        // History itself stays complete.
        assert_eq!(session.history().len(), 5);
    }

    #[test]
    fn settings_from_config() {
        let mut config = AppConfig::default();
        config.session.turn_timeout_secs = Some(0);
        config.session.system_prompt = Some("   ".into());
        config.session.exit_commands = vec!["sair".into(), "exit".into()];
        let settings = SessionSettings::from_config(&config);
        assert!(settings.turn_timeout.is_none());
        assert!(settings.system_prompt.is_none());
        assert!(settings.is_exit_command("EXIT"));
        assert!(settings.is_exit_command("Sair"));
        assert!(!settings.is_exit_command("sair agora"));
        assert!(!settings.is_exit_command(""));
    }
}
