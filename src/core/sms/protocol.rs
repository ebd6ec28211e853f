//! Command grammar of the SMS gateway: plain-text lines over TCP,
//! CRLF-terminated.

/// Station identifier used to authenticate with the gateway
pub const STATION_ID: &str = "G001";

/// Gateway login password for the station
const STATION_PASSWORD: &str = "7705";

/// Maximum message body length accepted by the gateway
const MAX_MESSAGE_LEN: u16 = 167;

/// `aLOGI` - open a gateway session for the station.
pub fn login_command() -> String {
    format!("aLOGI {} {}\r\n", STATION_ID, STATION_PASSWORD)
}

/// `aSMSS` - send one message to one recipient. Surrounding whitespace
/// on the recipient is trimmed before it hits the wire.
pub fn send_command(recipient: &str, body: &str) -> String {
    format!(
        "aSMSS {} {} N {} {}\r\n",
        STATION_ID,
        recipient.trim(),
        MAX_MESSAGE_LEN,
        body
    )
}

/// `aLOGO` - close the station's gateway session.
pub fn logout_command() -> String {
    format!("aLOGO {}\r\n", STATION_ID)
}
