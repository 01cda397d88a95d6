use super::*;
use crate::state::test_helpers;
use events::{
    ClientEvent, ExecuteRequest, ExecutionStatus, ExecutorCommand, ExecutorEvent, Request, Role, ServerEvent,
    WireEvent,
};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, timeout};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_relay(state: AppState) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("server failed");
    });
    addr
}

async fn connect(addr: std::net::SocketAddr, path: &str) -> Socket {
    let (socket, _) = connect_async(format!("ws://{addr}{path}")).await.expect("ws connect should succeed");
    socket
}

async fn send<E: WireEvent>(socket: &mut Socket, event: &E) {
    let text = event.encode().expect("encode");
    socket.send(WsMessage::text(text)).await.expect("ws send");
}

async fn recv<E: WireEvent>(socket: &mut Socket) -> E {
    loop {
        let msg = timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("ws receive timed out")
            .expect("socket closed")
            .expect("ws error");
        if let WsMessage::Text(text) = msg {
            return E::decode(text.as_str()).expect("decode");
        }
    }
}

async fn assert_silent(socket: &mut Socket) {
    assert!(timeout(Duration::from_millis(150), socket.next()).await.is_err(), "expected no frame");
}

fn execute(text: &str) -> ClientEvent {
    ClientEvent::Execute(ExecuteRequest { messages: vec![Request::new(text, Role::User)] })
}

fn status_of(event: &ServerEvent) -> ExecutionStatus {
    match event {
        ServerEvent::ExecutionUpdated(execution) => execution.status,
        other => panic!("expected execution_updated, got {other:?}"),
    }
}

fn text_of(event: &ServerEvent) -> String {
    match event {
        ServerEvent::TextReceived(token) => token.text.clone(),
        other => panic!("expected text_received, got {other:?}"),
    }
}

#[tokio::test]
async fn execution_flows_from_browser_through_executor_and_back() {
    let addr = spawn_relay(test_helpers::test_app_state()).await;
    let mut executor = connect(addr, "/executor").await;
    let mut browser = connect(addr, "/socket").await;

    send(&mut browser, &execute("What will energy prices be?")).await;

    let ServerEvent::ExecutionCreated(created) = recv(&mut browser).await else {
        panic!("expected execution_created");
    };
    assert_eq!(created.status, ExecutionStatus::Requested);
    assert_eq!(created.request.content, "What will energy prices be?");

    let ExecutorCommand::Execute(order) = recv(&mut executor).await;
    assert_eq!(order.id, created.id);
    assert_eq!(order.messages.len(), 1);

    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Scheduled);

    send(&mut executor, &ExecutorEvent::SendText("Hello".into())).await;
    send(&mut executor, &ExecutorEvent::SendImage("https://i.imgur.com/2X2IDEA.jpeg".into())).await;
    send(&mut executor, &ExecutorEvent::Finalize).await;

    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Started);
    assert_eq!(text_of(&recv(&mut browser).await), "Hello");
    assert_eq!(text_of(&recv(&mut browser).await), "<asset:image:https://i.imgur.com/2X2IDEA.jpeg>");
    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Completed);
    let ServerEvent::Finalize(Some(done)) = recv(&mut browser).await else {
        panic!("expected finalize");
    };
    assert_eq!(done.id, created.id);
}

#[tokio::test]
async fn executor_loss_finalizes_with_error_marker() {
    let addr = spawn_relay(test_helpers::test_app_state()).await;
    let mut executor = connect(addr, "/executor").await;
    let mut browser = connect(addr, "/socket").await;

    send(&mut browser, &execute("steel prices next month?")).await;
    let _created: ServerEvent = recv(&mut browser).await;
    let _order: ExecutorCommand = recv(&mut executor).await;
    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Scheduled);

    executor.close(None).await.expect("close");

    assert_eq!(text_of(&recv(&mut browser).await), "<asset:error:executor disconnected>");
    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Completed);
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::Finalize(Some(_))));
}

#[tokio::test]
async fn empty_transcript_is_ignored() {
    let addr = spawn_relay(test_helpers::test_app_state()).await;
    let mut browser = connect(addr, "/socket").await;

    send(&mut browser, &ClientEvent::Execute(ExecuteRequest::default())).await;
    assert_silent(&mut browser).await;
}

#[tokio::test]
async fn undecodable_frames_are_dropped_without_closing() {
    let addr = spawn_relay(test_helpers::test_app_state()).await;
    let mut browser = connect(addr, "/socket").await;

    browser.send(WsMessage::text("not json")).await.expect("ws send");
    assert_silent(&mut browser).await;

    send(&mut browser, &execute("still there?")).await;
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::ExecutionCreated(_)));
}

#[tokio::test]
async fn queued_task_waits_for_an_executor() {
    let addr = spawn_relay(test_helpers::test_app_state()).await;
    let mut browser = connect(addr, "/socket").await;

    send(&mut browser, &execute("anyone?")).await;
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::ExecutionCreated(_)));
    assert_silent(&mut browser).await;

    let mut executor = connect(addr, "/executor").await;
    let _order: ExecutorCommand = recv(&mut executor).await;
    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Scheduled);
}

#[tokio::test]
async fn full_queue_closes_extra_requests_instead_of_stalling() {
    let addr = spawn_relay(test_helpers::test_app_state_with_capacity(1, 1)).await;
    let mut executor = connect(addr, "/executor").await;
    let mut browser = connect(addr, "/socket").await;

    // Answer every task with several tokens so the one-slot browser channel
    // fills while more requests are still arriving.
    tokio::spawn(async move {
        loop {
            let ExecutorCommand::Execute(_order) = recv(&mut executor).await;
            for word in ["a ", "b ", "c ", "d ", "e"] {
                send(&mut executor, &ExecutorEvent::SendText(word.into())).await;
            }
            send(&mut executor, &ExecutorEvent::Finalize).await;
        }
    });

    for n in 0..3 {
        send(&mut browser, &execute(&format!("question {n}"))).await;
    }

    let mut created = Vec::new();
    let mut finalized = Vec::new();
    while finalized.len() < 3 {
        match recv::<ServerEvent>(&mut browser).await {
            ServerEvent::ExecutionCreated(execution) => created.push(execution.id),
            ServerEvent::Finalize(Some(execution)) => finalized.push(execution.id),
            _ => {}
        }
    }

    created.sort();
    finalized.sort();
    assert_eq!(created.len(), 3);
    assert_eq!(created, finalized);
}

#[tokio::test]
async fn queue_full_reply_carries_error_marker() {
    let addr = spawn_relay(test_helpers::test_app_state_with_capacity(1, 4)).await;
    let mut browser = connect(addr, "/socket").await;

    // No executor: the first request occupies the only slot.
    send(&mut browser, &execute("first")).await;
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::ExecutionCreated(_)));

    send(&mut browser, &execute("second")).await;
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::ExecutionCreated(_)));
    assert_eq!(text_of(&recv(&mut browser).await), format!("<asset:error:{}>", crate::services::relay::QUEUE_FULL));
    assert_eq!(status_of(&recv(&mut browser).await), ExecutionStatus::Completed);
    assert!(matches!(recv::<ServerEvent>(&mut browser).await, ServerEvent::Finalize(Some(_))));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let state = test_helpers::test_app_state();
    let addr = spawn_relay(state).await;

    let mut stream = TcpStream::connect(addr).await.expect("tcp connect");
    stream
        .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read response");

    assert!(response.starts_with("HTTP/1.1 200"), "unexpected response: {response}");
    assert!(response.contains("ok executors=0"));
}
