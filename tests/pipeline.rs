//! End-to-end pipeline tests against a loopback HTTP stub
//!
//! The stub serves a playlist source plus alive, dead and deliberately slow
//! stream endpoints, so the whole fetch → parse → probe → clean → write path
//! runs without touching the network.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use m3u_sweeper::config::{Config, LivenessConfig};
use m3u_sweeper::errors::AppError;
use m3u_sweeper::liveness::LivenessChecker;
use m3u_sweeper::models::{Channel, ProbeFailure, ProbeOutcome};
use m3u_sweeper::pipeline::Pipeline;

fn http_ok(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Minimal HTTP responder; routes on the request path
async fn spawn_stub(playlist: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let playlist = playlist.clone();

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let response = match path {
                    "/playlist.m3u" => http_ok(&playlist),
                    "/alive" | "/alive2" => http_ok("OK"),
                    "/slow" => {
                        tokio::time::sleep(Duration::from_secs(3)).await;
                        http_ok("too late")
                    }
                    _ => NOT_FOUND.to_string(),
                };

                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing listens on: bind, read the port, drop the listener
async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[tokio::test]
async fn liveness_outcomes_align_with_input_order() {
    let addr = spawn_stub(String::new()).await;

    let channels = vec![
        Channel::new("A", "G", format!("http://{addr}/alive")),
        Channel::new("B", "G", format!("http://{addr}/dead")),
        Channel::new("C", "G", format!("http://{addr}/slow")),
        Channel::new("D", "G", format!("http://{addr}/alive2")),
    ];

    let checker = LivenessChecker::new(&LivenessConfig {
        concurrency: 4,
        timeout_secs: 1,
    });
    let outcomes = checker.check_all(&channels).await;

    // One outcome per channel, in channel order; the slow probe's timeout did
    // not abort its siblings
    assert_eq!(outcomes.len(), channels.len());
    assert_eq!(outcomes[0], ProbeOutcome::Alive);
    assert_eq!(outcomes[1], ProbeOutcome::Dead(ProbeFailure::Status(404)));
    assert_eq!(outcomes[2], ProbeOutcome::Dead(ProbeFailure::Timeout));
    assert_eq!(outcomes[3], ProbeOutcome::Alive);
}

#[tokio::test]
async fn liveness_respects_single_permit() {
    let addr = spawn_stub(String::new()).await;

    let channels: Vec<Channel> = (0..5)
        .map(|i| Channel::new(format!("C{i}"), "G", format!("http://{addr}/alive")))
        .collect();

    let checker = LivenessChecker::new(&LivenessConfig {
        concurrency: 1,
        timeout_secs: 1,
    });
    let outcomes = checker.check_all(&channels).await;

    assert!(outcomes.iter().all(ProbeOutcome::is_alive));
}

#[tokio::test]
async fn pipeline_end_to_end_writes_cleaned_playlist() {
    // One stub serves the stream endpoints, a second serves the playlist
    // that references them
    let streams = spawn_stub(String::new()).await;
    let playlist = format!(
        "#EXTM3U\n\
         #EXTINF:-1 tvg-name=\"Kanal1\" group-title=\"Sport Channel\",Kanal1\n\
         http://{streams}/alive\n\
         #EXTINF:-1 tvg-name=\"Gone\" tvg-group=\"News\",Gone\n\
         http://{streams}/dead\n\
         #EXTINF:-1 tvg-name=\"Late Night\" tvg-group=\"XXX Movies\",Late Night\n\
         http://{streams}/alive2\n"
    );
    let addr = spawn_stub(playlist).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("filtered.m3u");

    let mut config = Config::default();
    config.sources = vec![format!("http://{addr}/playlist.m3u")];
    config.output.path = output.clone();
    config.liveness = LivenessConfig {
        concurrency: 4,
        timeout_secs: 1,
    };
    config.fetch.timeout_secs = 2;

    let summary = Pipeline::new(config).run().await.unwrap();

    assert_eq!(summary.aggregated, 3);
    assert_eq!(summary.alive, 2);
    assert_eq!(summary.written, 1);

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        format!(
            "#EXTM3U\n#EXTINF:-1 tvg-name=\"Kanal1\" tvg-group=\"Sports\",Kanal1\nhttp://{streams}/alive\n"
        )
    );
}

#[tokio::test]
async fn pipeline_halts_when_no_source_is_reachable() {
    let refused = refused_addr().await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("filtered.m3u");

    let mut config = Config::default();
    config.sources = vec![format!("http://{refused}/playlist.m3u")];
    config.output.path = output.clone();
    config.fetch.timeout_secs = 1;

    let err = Pipeline::new(config).run().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::EmptyPipeline)
    ));
    assert!(!output.exists());
}
