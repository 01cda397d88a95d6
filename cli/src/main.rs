mod render;
mod script;

use std::io::Write;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use events::{ClientEvent, EventError, ExecuteRequest, ExecutorCommand, Request, Role, ServerEvent, WireEvent};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket error: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("event codec failed: {0}")]
    Event(#[from] EventError),
    #[error("timed out waiting for finalize")]
    Timeout,
    #[error("stdout: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ecogen", about = "EcoGen demo executor and console chat client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the relay is up.
    Ping(PingArgs),
    /// Answer queued executions with canned energy and steel forecasts.
    Executor(ExecutorArgs),
    /// Ask one question and stream the answer to stdout.
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct PingArgs {
    #[arg(long, env = "ECOGEN_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,
}

#[derive(Args, Debug)]
struct ExecutorArgs {
    #[arg(long, env = "ECOGEN_EXECUTOR_URL", default_value = "ws://127.0.0.1:5000/executor")]
    url: String,

    #[arg(long, default_value_t = 60, help = "Pause between events, in milliseconds")]
    delay_ms: u64,
}

#[derive(Args, Debug)]
struct AskArgs {
    prompt: String,

    #[arg(long, env = "ECOGEN_SOCKET_URL", default_value = "ws://127.0.0.1:5000/socket")]
    url: String,

    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ping(args) => run_ping(&args).await,
        Command::Executor(args) => run_executor(&args).await,
        Command::Ask(args) => run_ask(&args).await,
    }
}

async fn run_ping(args: &PingArgs) -> Result<(), CliError> {
    let url = format!("{}/healthz", args.base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("{}", response.text().await?);
    Ok(())
}

async fn run_executor(args: &ExecutorArgs) -> Result<(), CliError> {
    let (ws, _) = connect_async(args.url.as_str()).await.map_err(|e| CliError::WsConnect(Box::new(e)))?;
    let (mut write, mut read) = ws.split();
    let delay = Duration::from_millis(args.delay_ms);
    info!(url = %args.url, "executor connected");

    while let Some(msg) = read.next().await {
        let msg = msg.map_err(|e| CliError::Ws(Box::new(e)))?;
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let ExecutorCommand::Execute(order) = match ExecutorCommand::decode(text.as_str()) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "ignoring relay frame");
                continue;
            }
        };

        let events = script::script_for(&order.messages);
        info!(execution_id = %order.id, events = events.len(), "executing");
        for event in events {
            write
                .send(Message::text(event.encode()?))
                .await
                .map_err(|e| CliError::Ws(Box::new(e)))?;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        info!(execution_id = %order.id, "finalized");
    }

    info!("relay closed the socket");
    Ok(())
}

async fn run_ask(args: &AskArgs) -> Result<(), CliError> {
    let (ws, _) = connect_async(args.url.as_str()).await.map_err(|e| CliError::WsConnect(Box::new(e)))?;
    let (mut write, mut read) = ws.split();

    let request = ClientEvent::Execute(ExecuteRequest { messages: vec![Request::new(args.prompt.trim(), Role::User)] });
    write
        .send(Message::text(request.encode()?))
        .await
        .map_err(|e| CliError::Ws(Box::new(e)))?;

    let stream_answer = async {
        let mut stdout = std::io::stdout();
        while let Some(msg) = read.next().await {
            let Message::Text(text) = msg.map_err(|e| CliError::Ws(Box::new(e)))? else {
                continue;
            };
            match ServerEvent::decode(text.as_str()) {
                Ok(ServerEvent::TextReceived(token)) => {
                    write!(stdout, "{}", render::render_token(&token.text))?;
                    stdout.flush()?;
                }
                Ok(ServerEvent::DebugThoughtReceived(thought)) => eprintln!("[thought] {}", thought.text),
                Ok(ServerEvent::ExecutionCreated(execution) | ServerEvent::ExecutionUpdated(execution)) => {
                    eprintln!("[status] {}", render::render_status(&execution));
                }
                Ok(ServerEvent::Finalize(_)) => {
                    writeln!(stdout)?;
                    return Ok(());
                }
                Err(e) => warn!(error = %e, "ignoring relay frame"),
            }
        }
        Err::<(), CliError>(CliError::WsClosed)
    };

    tokio::time::timeout(Duration::from_secs(args.timeout_secs), stream_answer)
        .await
        .map_err(|_| CliError::Timeout)?
}
