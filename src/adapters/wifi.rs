//! WiFi station-mode adapter.
//!
//! Joins the configured network with a fixed IPv4 configuration and blocks
//! until the interface is up.  The access point side stays disabled.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all targets**: credential validation, shared with [`OutletConfig`].
//!
//! ## Failure policy
//!
//! There is no reconnect loop.  A failed association is returned as
//! [`Error::Wifi`] or [`Error::Platform`] and the boot boundary restarts
//! the device, which retries from a clean radio state.
//!
//! [`OutletConfig`]: crate::config::OutletConfig

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::{Error, Result};

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// 1..=32 printable ASCII bytes.
pub fn validate_ssid(ssid: &str) -> Result<()> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(Error::Config("SSID must be 1-32 printable ASCII bytes"));
    }
    Ok(())
}

/// Empty for an open network, otherwise an 8..=64 byte WPA2 passphrase.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(Error::Config("WPA2 passphrase must be 8-64 bytes"));
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Station bring-up (device only)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::ipv4::{
        ClientConfiguration as IpClientConfiguration, ClientSettings as IpClientSettings,
        Configuration as IpConfiguration, Ipv4Addr, Mask, Subnet,
    };
    use esp_idf_svc::netif::{EspNetif, NetifConfiguration};
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

    use super::info;
    use crate::config::{Ipv4Octets, NetworkConfig};
    use crate::error::{Error, Result};

    /// The running station.  Dropping it tears the link down.
    pub type Station = BlockingWifi<EspWifi<'static>>;

    fn addr(o: Ipv4Octets) -> Ipv4Addr {
        Ipv4Addr::new(o[0], o[1], o[2], o[3])
    }

    fn static_netif(network: &NetworkConfig) -> Result<EspNetif> {
        let mask = Mask::try_from(addr(network.subnet))
            .map_err(|_| Error::Wifi("invalid subnet mask"))?;

        let conf = NetifConfiguration {
            ip_configuration: Some(IpConfiguration::Client(IpClientConfiguration::Fixed(
                IpClientSettings {
                    ip: addr(network.ip),
                    subnet: Subnet {
                        gateway: addr(network.gateway),
                        mask,
                    },
                    dns: Some(addr(network.dns)),
                    secondary_dns: None,
                },
            ))),
            ..NetifConfiguration::wifi_default_client()
        };
        Ok(EspNetif::new_with_conf(&conf)?)
    }

    /// Associate and block until the static address is up.
    pub fn connect(
        modem: Modem,
        sys_loop: EspSystemEventLoop,
        network: &NetworkConfig,
    ) -> Result<Station> {
        let mut esp_wifi = EspWifi::new(modem, sys_loop.clone(), None)?;
        esp_wifi.swap_netif_sta(static_netif(network)?)?;

        let mut wifi = BlockingWifi::wrap(esp_wifi, sys_loop)?;

        let auth_method = if network.wifi_pass.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: network
                .wifi_ssid
                .as_str()
                .try_into()
                .map_err(|_| Error::Wifi("ssid too long"))?,
            password: network
                .wifi_pass
                .as_str()
                .try_into()
                .map_err(|_| Error::Wifi("password too long"))?,
            auth_method,
            ..Default::default()
        }))?;

        wifi.start()?;
        info!("WiFi: started, connecting to '{}'", network.wifi_ssid);
        wifi.connect()?;
        wifi.wait_netif_up()?;

        let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
        info!(
            "WiFi: up | ip={} gw={} mask=/{} dns={:?}",
            ip_info.ip, ip_info.subnet.gateway, ip_info.subnet.mask.0, ip_info.dns
        );
        Ok(wifi)
    }
}

#[cfg(target_os = "espidf")]
pub use esp::{Station, connect};
