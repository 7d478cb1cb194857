//! `HttpSource` against a real socket: status and body mapping.

#![cfg(not(target_arch = "wasm32"))]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use ui::core::config::DashboardConfig;
use ui::metrics::{Endpoint, FetchError, HttpSource, MetricsSource};

/// Serve one canned response per accepted connection, in order.
fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn fetch_all(base_url: String, times: usize) -> Vec<Result<ui::metrics::MetricsSnapshot, FetchError>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let source = HttpSource::new(DashboardConfig {
        base_url,
        ..DashboardConfig::default()
    });
    runtime.block_on(async {
        let mut results = Vec::new();
        for _ in 0..times {
            results.push(source.fetch(Endpoint::Admin).await);
        }
        results
    })
}

#[test]
fn server_error_and_garbage_body_map_to_fetch_errors() {
    let base = serve(vec![
        ("500 Internal Server Error", r#"{"error":"boom"}"#),
        ("200 OK", "<html>not json</html>"),
    ]);

    let results = fetch_all(base, 2);

    assert_eq!(results[0], Err(FetchError::BadStatus(500)));
    assert!(
        matches!(results[1], Err(FetchError::Transport(_))),
        "{:?}",
        results[1]
    );
}

#[test]
fn success_body_is_normalized() {
    let base = serve(vec![(
        "200 OK",
        r#"{"monthlyTransactions":[1,2,3,4,5,6,7,8,9,10,11,12],"riskDistribution":{"low":"4","medium":2,"high":null},"total":6,"flagged":1}"#,
    )]);

    let snapshot = fetch_all(base, 1).remove(0).expect("snapshot");

    assert_eq!(snapshot.monthly_transactions[11], 12);
    assert_eq!(snapshot.risk_distribution.as_array(), [4, 2, 0]);
    assert_eq!(snapshot.total, 6);
    assert_eq!(snapshot.flagged, 1);
}
