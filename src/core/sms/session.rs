//! One notification session: login, paced per-recipient sends, logout.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

use super::protocol;
use crate::core::monitor::AlertEvent;
use crate::error::{Result, UpswatchError};

/// Settle delay between login and the first recipient send
const LOGIN_SETTLE: Duration = Duration::from_millis(500);

/// How long to keep draining gateway responses after logout
const RESPONSE_GRACE: Duration = Duration::from_secs(1);

/// Outcome of one gateway session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Send commands attempted, one per recipient
    pub sends_attempted: usize,
    /// Send commands whose write failed (logged, not retried)
    pub sends_failed: usize,
}

/// Run one full gateway session for a single alert.
///
/// Connecting is the only failure the caller sees. Once connected the
/// session is best-effort per command: a failed write is logged and the
/// remaining recipients are still attempted, and the connection is torn
/// down on every exit path. Recipients are messaged strictly in the
/// given order over the single stream; the report says how many sends
/// were attempted and how many failed.
pub async fn dispatch_alert(
    gateway_addr: &str,
    recipients: &[String],
    alert: &AlertEvent,
) -> Result<SessionReport> {
    let stream = TcpStream::connect(gateway_addr)
        .await
        .map_err(|e| UpswatchError::connect(format!("{}: {}", gateway_addr, e)))?;

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = tokio::spawn(drain_responses(read_half));

    let body = alert.message();
    let pacing = alert.pacing();
    let mut report = SessionReport::default();

    send_line(&mut write_half, &protocol::login_command()).await;
    sleep(LOGIN_SETTLE).await;

    for recipient in recipients {
        report.sends_attempted += 1;
        if !send_line(&mut write_half, &protocol::send_command(recipient, &body)).await {
            report.sends_failed += 1;
        }
        sleep(pacing).await;
    }

    send_line(&mut write_half, &protocol::logout_command()).await;

    let _ = write_half.shutdown().await;
    drop(write_half);

    // Give the gateway a moment to flush its final response, then cut
    // the reader loose; receipt is logging-only.
    if timeout(RESPONSE_GRACE, &mut reader).await.is_err() {
        reader.abort();
    }

    Ok(report)
}

/// Best-effort write of one command line. Failures are logged and the
/// session moves on to the next command; no retry. Returns whether the
/// write succeeded.
async fn send_line(write_half: &mut OwnedWriteHalf, line: &str) -> bool {
    match write_half.write_all(line.as_bytes()).await {
        Ok(()) => {
            log::info!("SMS client message: {}", line.trim_end());
            true
        }
        Err(e) => {
            let err = UpswatchError::send(format!("{}: {}", line.trim_end(), e));
            log::error!("{}", err);
            false
        }
    }
}

/// Drain and log everything the gateway sends back. Runs until the
/// socket closes or the read side errors; never surfaces as a session
/// failure.
async fn drain_responses(mut read_half: OwnedReadHalf) {
    let mut buf = vec![0u8; 4096];
    loop {
        match read_half.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let text = String::from_utf8_lossy(&buf[..n]);
                log::info!("SMS server response: {}", text.trim_end());
            }
            Err(e) => {
                let err = UpswatchError::receive(e.to_string());
                log::warn!("{}", err);
                break;
            }
        }
    }
}
