use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use upswatch::core::monitor::AlertEvent;
use upswatch::core::sms::dispatch_alert;
use upswatch::UpswatchError;

/// Stub gateway: accepts one connection and records everything it
/// receives until logout or disconnect.
async fn spawn_stub_gateway() -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = String::new();
        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    received.push_str(&String::from_utf8_lossy(&buf[..n]));
                    if received.contains("aLOGO") {
                        break;
                    }
                }
            }
        }
        received
    });

    (addr, handle)
}

#[tokio::test]
async fn test_session_command_sequence_and_recipient_order() {
    let (addr, gateway) = spawn_stub_gateway().await;

    let recipients = vec!["111".to_string(), "222 ".to_string(), "333".to_string()];
    let alert = AlertEvent::CriticalBattery {
        battery_minutes: Some(5),
    };

    let report = dispatch_alert(&addr, &recipients, &alert)
        .await
        .expect("session should complete");
    assert_eq!(report.sends_attempted, 3);
    assert_eq!(report.sends_failed, 0);

    let received = gateway.await.unwrap();
    let lines: Vec<&str> = received.lines().collect();

    assert_eq!(lines.len(), 5, "login + 3 sends + logout, got: {:?}", lines);
    assert_eq!(lines[0], "aLOGI G001 7705");
    assert!(lines[1].starts_with("aSMSS G001 111 N 167 "));
    assert!(lines[2].starts_with("aSMSS G001 222 N 167 "));
    assert!(lines[3].starts_with("aSMSS G001 333 N 167 "));
    assert_eq!(lines[4], "aLOGO G001");
}

#[tokio::test]
async fn test_session_body_carries_alert_message() {
    let (addr, gateway) = spawn_stub_gateway().await;

    let recipients = vec!["777".to_string()];
    let alert = AlertEvent::SourceChanged {
        from: "Normal".to_string(),
        to: "Battery".to_string(),
        battery_minutes: Some(12),
    };

    dispatch_alert(&addr, &recipients, &alert).await.unwrap();

    let received = gateway.await.unwrap();
    assert!(received.contains("from Normal to Battery"));
    assert!(received.contains("12 min"));
}

#[tokio::test]
async fn test_unreachable_gateway_is_a_connect_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let recipients = vec!["111".to_string()];
    let alert = AlertEvent::CriticalBattery {
        battery_minutes: Some(2),
    };

    let err = dispatch_alert(&addr, &recipients, &alert)
        .await
        .expect_err("connect must fail");
    assert!(matches!(err, UpswatchError::Connect(_)));
}

#[tokio::test]
async fn test_failed_sends_do_not_block_remaining_recipients() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    // Accept and immediately drop the connection; later writes fail
    // but every recipient must still be attempted, in order.
    let gateway = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);
    });

    let recipients = vec!["111".to_string(), "222".to_string(), "333".to_string()];
    let alert = AlertEvent::CriticalBattery {
        battery_minutes: Some(2),
    };

    let report = dispatch_alert(&addr, &recipients, &alert)
        .await
        .expect("send failures must not abort the session");

    assert_eq!(report.sends_attempted, 3);
    gateway.await.unwrap();
}
