//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SwitchPort         | relay + LED GPIO         |
//! |                | ButtonPort         | button GPIO              |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `system`       | SystemPort         | ESP32 timer, heap stats  |
//! | `tcp_listener` | (none)             | lwIP listening socket    |
//! | `wifi`         | (none)             | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod system;
pub mod tcp_listener;
pub mod wifi;
