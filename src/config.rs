//! Flash-time configuration.
//!
//! Nothing here is reloadable at runtime: values are baked into the image
//! at build time through `OUTLET_*` environment variables and fall back to
//! the defaults below.  Addresses are kept as octets so the struct stays
//! serde-friendly without `std::net` impls.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type Ipv4Octets = [u8; 4];

/// Static IPv4 station configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub wifi_ssid: heapless::String<32>,
    /// Never serialised, so the boot summary cannot leak it.
    #[serde(skip_serializing, default)]
    pub wifi_pass: heapless::String<64>,
    pub ip: Ipv4Octets,
    pub subnet: Ipv4Octets,
    pub gateway: Ipv4Octets,
    pub dns: Ipv4Octets,
}

/// Core system configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletConfig {
    pub network: NetworkConfig,
    /// `<title>` of every served page.
    pub title: heapless::String<32>,

    // --- HTTP ---
    pub http_port: u16,
    /// Listen backlog; queued clients wait here while one is served.
    pub http_backlog: u8,

    // --- Timing ---
    /// Unconditional restart period (milliseconds), never renewed.
    pub reset_period_ms: u64,
    /// How long `/cycle` keeps the relay off (milliseconds).
    pub cycle_off_ms: u32,
    /// Watchdog thread poll interval for the button latch (milliseconds).
    pub watchdog_poll_ms: u32,
}

impl Default for OutletConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                wifi_ssid: heapless_str("xxx"),
                wifi_pass: heapless_str("yyyyyyyy"),
                ip: [172, 30, 2, 111],
                subnet: [255, 255, 0, 0],
                gateway: [172, 30, 1, 240],
                dns: [172, 30, 1, 240],
            },
            title: heapless_str("Outlet TC"),

            // HTTP
            http_port: 80,
            http_backlog: 5,

            // Timing
            reset_period_ms: 300 * 1000, // 5 min
            cycle_off_ms: 2000,
            watchdog_poll_ms: 10,
        }
    }
}

impl OutletConfig {
    /// Defaults overridden by whatever `OUTLET_*` variables were set when
    /// the image was built.  The result is validated.
    pub fn from_build_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply(&[
            ("OUTLET_WIFI_SSID", option_env!("OUTLET_WIFI_SSID")),
            ("OUTLET_WIFI_PASS", option_env!("OUTLET_WIFI_PASS")),
            ("OUTLET_IP", option_env!("OUTLET_IP")),
            ("OUTLET_SUBNET", option_env!("OUTLET_SUBNET")),
            ("OUTLET_GATEWAY", option_env!("OUTLET_GATEWAY")),
            ("OUTLET_DNS", option_env!("OUTLET_DNS")),
            ("OUTLET_TITLE", option_env!("OUTLET_TITLE")),
        ])?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `(variable, value)` overrides.  `None` values are skipped.
    pub fn apply(&mut self, overrides: &[(&str, Option<&str>)]) -> Result<()> {
        for (key, value) in overrides {
            let Some(value) = value else { continue };
            let net = &mut self.network;
            match *key {
                "OUTLET_WIFI_SSID" => net.wifi_ssid = bounded(value, "SSID longer than 32 bytes")?,
                "OUTLET_WIFI_PASS" => {
                    net.wifi_pass = bounded(value, "passphrase longer than 64 bytes")?;
                }
                "OUTLET_IP" => net.ip = parse_ipv4(value)?,
                "OUTLET_SUBNET" => net.subnet = parse_ipv4(value)?,
                "OUTLET_GATEWAY" => net.gateway = parse_ipv4(value)?,
                "OUTLET_DNS" => net.dns = parse_ipv4(value)?,
                "OUTLET_TITLE" => self.title = bounded(value, "title longer than 32 bytes")?,
                _ => return Err(Error::Config("unknown configuration key")),
            }
        }
        Ok(())
    }

    /// Reject values the device cannot run with.
    pub fn validate(&self) -> Result<()> {
        crate::adapters::wifi::validate_ssid(&self.network.wifi_ssid)?;
        crate::adapters::wifi::validate_password(&self.network.wifi_pass)?;
        subnet_prefix_len(self.network.subnet)?;
        if self.network.ip == [0, 0, 0, 0] {
            return Err(Error::Config("static IP must not be 0.0.0.0"));
        }
        if self.http_backlog == 0 {
            return Err(Error::Config("listen backlog must be at least 1"));
        }
        if self.reset_period_ms == 0 {
            return Err(Error::Config("reset period must be non-zero"));
        }
        if self.watchdog_poll_ms == 0 || u64::from(self.watchdog_poll_ms) >= self.reset_period_ms {
            return Err(Error::Config("watchdog poll must be shorter than the reset period"));
        }
        Ok(())
    }
}

/// Parse dotted-quad notation.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Octets> {
    s.trim()
        .parse::<std::net::Ipv4Addr>()
        .map(|addr| addr.octets())
        .map_err(|_| Error::Config("invalid IPv4 address"))
}

/// Prefix length of a contiguous subnet mask (`255.255.0.0` → 16).
pub fn subnet_prefix_len(mask: Ipv4Octets) -> Result<u8> {
    let bits = u32::from_be_bytes(mask);
    let host = !bits;
    if host & host.wrapping_add(1) != 0 {
        return Err(Error::Config("subnet mask is not contiguous"));
    }
    Ok(bits.count_ones() as u8)
}

fn bounded<const N: usize>(s: &str, msg: &'static str) -> Result<heapless::String<N>> {
    heapless::String::try_from(s).map_err(|()| Error::Config(msg))
}

/// Longest prefix of `s` that fits in `N` bytes, cut at a char boundary.
fn heapless_str<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
