//! Console Flow Integration Tests
//!
//! Drives the SessionGate through complete operator conversations with an
//! in-process host directory and shell connector.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use admindo::services::droplet::{
    CapturedOutput, ExecError, HostDirectory, ProviderError, RemoteExecutor, ShellConnector,
    ShellSession,
};
use admindo::services::remote::response_mapper::{
    ACCESS_DENIED, CONSOLE_ENTERED, CONSOLE_EXITED, NEXT_COMMAND_PROMPT, NOTHING_TO_CANCEL,
};
use admindo::services::remote::{
    InMemorySessionStore, IncomingRemoteMessage, OutgoingReply, RemoteAdapterType, ReplyFormat,
    SessionGate, SessionStore,
};
use admindo_core::{HostRecord, OperatorId, PowerAction, SessionMode, NO_OUTPUT_PLACEHOLDER};
use async_trait::async_trait;

// ============================================================================
// Fakes
// ============================================================================

const OWNER: i64 = 5303965494;
const INTRUDER: i64 = 777;
const DROPLET: &str = "web-1";

/// Directory holding a fixed host list and recording power actions.
struct FakeDirectory {
    hosts: Vec<HostRecord>,
    power_actions: Mutex<Vec<(u64, PowerAction)>>,
}

impl FakeDirectory {
    fn with_droplet(ip: Option<&str>) -> Self {
        Self {
            hosts: vec![HostRecord {
                id: 4242,
                name: DROPLET.to_string(),
                status: "active".to_string(),
                ip_address: ip.map(str::to_string),
                region: "Amsterdam 3".to_string(),
                size: "s-1vcpu-1gb".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }],
            power_actions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HostDirectory for FakeDirectory {
    async fn list_hosts(&self) -> Result<Vec<HostRecord>, ProviderError> {
        Ok(self.hosts.clone())
    }

    async fn submit_power_action(
        &self,
        host: &HostRecord,
        action: PowerAction,
    ) -> Result<(), ProviderError> {
        self.power_actions.lock().unwrap().push((host.id, action));
        Ok(())
    }
}

/// Scripted shell: maps command text to captured output.
struct ScriptedConnector {
    script: HashMap<String, CapturedOutput>,
    connections: AtomicUsize,
    closes: Arc<AtomicUsize>,
    refuse: bool,
    hang: bool,
}

impl ScriptedConnector {
    fn new() -> Self {
        let mut script = HashMap::new();
        script.insert(
            "uptime".to_string(),
            CapturedOutput {
                stdout: " 10:00:00 up 3 days\n".to_string(),
                ..Default::default()
            },
        );
        script.insert(
            "cat missing".to_string(),
            CapturedOutput {
                stderr: "cat: missing: No such file or directory\n".to_string(),
                exit_status: Some(1),
                ..Default::default()
            },
        );
        script.insert("touch ok".to_string(), CapturedOutput::default());
        script.insert(
            "echo '`x`'".to_string(),
            CapturedOutput {
                stdout: "`x`\n".to_string(),
                ..Default::default()
            },
        );
        Self {
            script,
            connections: AtomicUsize::new(0),
            closes: Arc::new(AtomicUsize::new(0)),
            refuse: false,
            hang: false,
        }
    }

    fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    /// Never completes the handshake.
    fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl ShellConnector for ScriptedConnector {
    async fn connect(&self, _address: &str) -> Result<Box<dyn ShellSession>, ExecError> {
        if self.refuse {
            return Err(ExecError::ConnectFailure("Connection refused".to_string()));
        }
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            script: self.script.clone(),
            closes: self.closes.clone(),
        }))
    }
}

struct ScriptedSession {
    script: HashMap<String, CapturedOutput>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl ShellSession for ScriptedSession {
    async fn exec(&mut self, command: &str) -> Result<CapturedOutput, ExecError> {
        Ok(self.script.get(command).cloned().unwrap_or_default())
    }

    async fn close(self: Box<Self>) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    gate: SessionGate,
    directory: Arc<FakeDirectory>,
    connector: Arc<ScriptedConnector>,
}

fn harness_with(directory: FakeDirectory, connector: ScriptedConnector) -> Harness {
    let directory = Arc::new(directory);
    let connector = Arc::new(connector);
    let executor = Arc::new(RemoteExecutor::new(
        directory.clone(),
        connector.clone(),
        Duration::from_secs(10),
    ));
    let gate = SessionGate::new(
        OperatorId(OWNER),
        DROPLET,
        Arc::new(InMemorySessionStore::new()),
        executor,
        directory.clone(),
    );
    Harness {
        gate,
        directory,
        connector,
    }
}

fn harness() -> Harness {
    harness_with(
        FakeDirectory::with_droplet(Some("203.0.113.7")),
        ScriptedConnector::new(),
    )
}

fn msg(user_id: i64, text: &str) -> IncomingRemoteMessage {
    IncomingRemoteMessage {
        adapter_type: RemoteAdapterType::Telegram,
        chat_id: user_id,
        user_id,
        username: Some("operator".to_string()),
        text: text.to_string(),
        message_id: 1,
        timestamp: chrono::Utc::now(),
    }
}

fn texts(replies: &[OutgoingReply]) -> Vec<&str> {
    replies.iter().map(|r| r.text.as_str()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_full_console_session() {
    let h = harness();

    let replies = h.gate.handle(&msg(OWNER, "/console")).await;
    assert_eq!(texts(&replies), vec![CONSOLE_ENTERED]);

    let replies = h.gate.handle(&msg(OWNER, "uptime")).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].format, ReplyFormat::Literal);
    assert_eq!(replies[0].text, "10:00:00 up 3 days");
    assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);

    let replies = h.gate.handle(&msg(OWNER, "/cancel")).await;
    assert_eq!(texts(&replies), vec![CONSOLE_EXITED]);

    // Back in idle: free text is ignored and nothing is executed
    let replies = h.gate.handle(&msg(OWNER, "uptime")).await;
    assert!(replies.is_empty());
    assert_eq!(h.connector.connections.load(Ordering::SeqCst), 1);
    assert_eq!(h.connector.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stderr_is_reported_as_error_and_console_stays_open() {
    let h = harness();
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "cat missing")).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].format, ReplyFormat::Plain);
    assert_eq!(
        replies[0].text,
        "\u{274C} Error: cat: missing: No such file or directory"
    );
    assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);
    assert_eq!(
        h.gate.sessions().mode(OperatorId(OWNER)).await,
        SessionMode::AwaitingCommand
    );
    assert_eq!(h.connector.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_output_uses_placeholder() {
    let h = harness();
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "touch ok")).await;
    assert_eq!(replies[0].text, NO_OUTPUT_PLACEHOLDER);
    assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);
}

#[tokio::test]
async fn test_literal_output_is_not_interpreted() {
    let h = harness();
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "echo '`x`'")).await;
    assert_eq!(replies[0].format, ReplyFormat::Literal);
    assert_eq!(replies[0].text, "`x`");
}

#[tokio::test]
async fn test_connect_failure_is_reported() {
    let h = harness_with(
        FakeDirectory::with_droplet(Some("203.0.113.7")),
        ScriptedConnector::refusing(),
    );
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "uptime")).await;
    assert_eq!(
        replies[0].text,
        "\u{274C} Error: Failed to connect: Connection refused"
    );
    assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);
    assert_eq!(
        h.gate.sessions().mode(OperatorId(OWNER)).await,
        SessionMode::AwaitingCommand
    );
}

#[tokio::test(start_paused = true)]
async fn test_connect_timeout_keeps_console_open() {
    let h = harness_with(
        FakeDirectory::with_droplet(Some("203.0.113.7")),
        ScriptedConnector::hanging(),
    );
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "uptime")).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(
        replies[0].text,
        "\u{274C} Error: Failed to connect: timed out after 10s"
    );
    assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);
    assert_eq!(
        h.gate.sessions().mode(OperatorId(OWNER)).await,
        SessionMode::AwaitingCommand
    );

    // The session is still cancellable after the failure
    let replies = h.gate.handle(&msg(OWNER, "/cancel")).await;
    assert_eq!(texts(&replies), vec![CONSOLE_EXITED]);
}

#[tokio::test]
async fn test_unknown_host_is_reported() {
    let h = harness_with(
        FakeDirectory {
            hosts: Vec::new(),
            power_actions: Mutex::new(Vec::new()),
        },
        ScriptedConnector::new(),
    );
    h.gate.handle(&msg(OWNER, "/console")).await;

    let replies = h.gate.handle(&msg(OWNER, "uptime")).await;
    assert_eq!(replies[0].text, format!("\u{274C} Error: {} not found", DROPLET));
    assert_eq!(h.connector.connections.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_intruder_never_reaches_executor() {
    let h = harness();

    for text in ["/console", "uptime", "/cancel", "/help", "/power reboot"] {
        let replies = h.gate.handle(&msg(INTRUDER, text)).await;
        assert_eq!(texts(&replies), vec![ACCESS_DENIED]);
    }

    assert_eq!(
        h.gate.sessions().mode(OperatorId(INTRUDER)).await,
        SessionMode::Idle
    );
    assert_eq!(h.gate.sessions().active_count().await, 0);
    assert_eq!(h.connector.connections.load(Ordering::SeqCst), 0);
    assert!(h.directory.power_actions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_intruder_does_not_disturb_owner_session() {
    let h = harness();
    h.gate.handle(&msg(OWNER, "/console")).await;
    h.gate.handle(&msg(INTRUDER, "/cancel")).await;

    assert_eq!(
        h.gate.sessions().mode(OperatorId(OWNER)).await,
        SessionMode::AwaitingCommand
    );
}

#[tokio::test]
async fn test_cancel_when_idle() {
    let h = harness();
    let replies = h.gate.handle(&msg(OWNER, "/cancel")).await;
    assert_eq!(texts(&replies), vec![NOTHING_TO_CANCEL]);
}

#[tokio::test]
async fn test_status_and_power_directives() {
    let h = harness();

    let replies = h.gate.handle(&msg(OWNER, "/status")).await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("Droplet: web-1"));
    assert!(replies[0].text.contains("IP address: 203.0.113.7"));

    let replies = h.gate.handle(&msg(OWNER, "/power reboot")).await;
    assert_eq!(texts(&replies), vec!["reboot action initiated on web-1"]);
    assert_eq!(
        *h.directory.power_actions.lock().unwrap(),
        vec![(4242, PowerAction::Reboot)]
    );

    // Directives outside the console never change the mode
    assert_eq!(
        h.gate.sessions().mode(OperatorId(OWNER)).await,
        SessionMode::Idle
    );
}

#[tokio::test]
async fn test_concurrent_relays_each_get_a_result() {
    let h = Arc::new(harness());
    h.gate.handle(&msg(OWNER, "/console")).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let h = h.clone();
        handles.push(tokio::spawn(async move {
            h.gate.handle(&msg(OWNER, "uptime")).await
        }));
    }

    for handle in handles {
        let replies = handle.await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[1].text, NEXT_COMMAND_PROMPT);
    }
    assert_eq!(h.connector.connections.load(Ordering::SeqCst), 8);
    assert_eq!(h.connector.closes.load(Ordering::SeqCst), 8);
}
