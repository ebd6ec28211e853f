//! SNMP query against the monitored UPS.

use std::net::SocketAddr;
use std::time::Duration;

use csnmp::{ObjectIdentifier, ObjectValue, Snmp2cClient};
use once_cell::sync::Lazy;
use tokio::net::lookup_host;
use tokio::time::timeout;

use crate::error::{Result, UpswatchError};

/// OID of the UPS output power source label
static OID_OUTPUT_SOURCE: Lazy<ObjectIdentifier> = Lazy::new(|| {
    "1.3.6.1.4.1.476.1.42.3.9.20.1.20.1.2.1.4872"
        .parse()
        .unwrap()
});

/// OID of the remaining battery runtime in minutes
static OID_BATTERY_MINUTES: Lazy<ObjectIdentifier> = Lazy::new(|| {
    "1.3.6.1.4.1.476.1.42.3.9.20.1.20.1.2.1.4150"
        .parse()
        .unwrap()
});

/// How long to wait for the device before declaring it unreachable.
/// A rejected community string manifests the same way: SNMP v2c agents
/// silently drop requests with a bad community.
const DEVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// One successful poll of the UPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceReading {
    /// Output power source label, e.g. "Normal" or "Battery"
    pub power_source: String,
    /// Remaining battery runtime in minutes; `None` when the device
    /// returned a non-numeric or out-of-range value
    pub battery_minutes: Option<u32>,
}

/// SNMP v2c endpoint of the monitored UPS
pub struct UpsDevice {
    addr: String,
    community: String,
}

impl UpsDevice {
    pub fn new(addr: String, community: String) -> Self {
        Self { addr, community }
    }

    /// Query the two monitored attributes. No state is touched here;
    /// the caller owns the interpretation of the reading.
    pub async fn query(&self) -> Result<DeviceReading> {
        let target = self.resolve().await?;

        let client = Snmp2cClient::new(target, self.community.as_bytes().to_vec(), None, None)
            .await
            .map_err(|e| UpswatchError::unreachable(format!("{}: {}", self.addr, e)))?;

        let source = self.get_value(&client, &OID_OUTPUT_SOURCE, "output source").await?;
        let minutes = self
            .get_value(&client, &OID_BATTERY_MINUTES, "battery minutes")
            .await?;

        let power_source = decode_label(&source)
            .ok_or_else(|| UpswatchError::malformed("output source value is not textual"))?;

        Ok(DeviceReading {
            power_source,
            battery_minutes: decode_minutes(&minutes),
        })
    }

    async fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = lookup_host(&self.addr)
            .await
            .map_err(|e| UpswatchError::unreachable(format!("{}: {}", self.addr, e)))?;

        addrs
            .next()
            .ok_or_else(|| UpswatchError::unreachable(format!("{}: no address found", self.addr)))
    }

    async fn get_value(
        &self,
        client: &Snmp2cClient,
        oid: &ObjectIdentifier,
        attribute: &str,
    ) -> Result<ObjectValue> {
        match timeout(DEVICE_TIMEOUT, client.get(*oid)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(UpswatchError::malformed(format!(
                "{} missing from reply: {}",
                attribute, e
            ))),
            Err(_) => Err(UpswatchError::unreachable(format!(
                "{}: no reply within {:?}",
                self.addr, DEVICE_TIMEOUT
            ))),
        }
    }
}

/// Decode an SNMP value into a power-source label.
fn decode_label(value: &ObjectValue) -> Option<String> {
    match value {
        ObjectValue::String(bytes) => Some(String::from_utf8_lossy(bytes).trim().to_string()),
        ObjectValue::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

/// Decode an SNMP value into remaining minutes. Anything non-numeric or
/// out of u32 range degrades to `None` instead of failing the cycle.
fn decode_minutes(value: &ObjectValue) -> Option<u32> {
    match value {
        ObjectValue::Integer(i) => u32::try_from(*i).ok(),
        ObjectValue::Counter32(v) | ObjectValue::Unsigned32(v) | ObjectValue::TimeTicks(v) => {
            Some(*v)
        }
        ObjectValue::Counter64(v) => u32::try_from(*v).ok(),
        ObjectValue::String(bytes) => String::from_utf8_lossy(bytes).trim().parse().ok(),
        _ => None,
    }
}
