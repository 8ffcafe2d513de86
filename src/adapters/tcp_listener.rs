//! TCP listener for the control surface.
//!
//! `std::net::TcpListener::bind` always listens with the platform's default
//! backlog.  The outlet serves one client at a time and wants a short, known
//! queue (5), so on the device the socket is built with lwIP calls and then
//! handed to `std` for the blocking accept loop.
//!
//! - **`target_os = "espidf"`**: `lwip_socket` → `SO_REUSEADDR` →
//!   `lwip_bind(INADDR_ANY)` → `lwip_listen(backlog)`.
//! - **all other targets**: `TcpListener::bind`, backlog left to the OS.

use std::net::TcpListener;

use log::info;

use crate::error::Result;

#[cfg(target_os = "espidf")]
pub fn bind(port: u16, backlog: u8) -> Result<TcpListener> {
    use std::os::fd::FromRawFd;

    use esp_idf_sys::{
        AF_INET, SO_REUSEADDR, SOCK_STREAM, SOL_SOCKET, in_addr, lwip_bind, lwip_close,
        lwip_htons, lwip_listen, lwip_setsockopt, lwip_socket, sockaddr_in,
    };
    use log::warn;

    use crate::error::Error;

    // SAFETY: lwIP socket call with valid domain/type/protocol.
    let fd = unsafe { lwip_socket(AF_INET as _, SOCK_STREAM as _, 0) };
    if fd < 0 {
        warn!("TCP: lwip_socket failed ({})", fd);
        return Err(Error::Platform(fd));
    }

    let fail = |step: &str, rc: i32| {
        // SAFETY: `fd` is a valid socket that nothing else owns yet.
        unsafe {
            lwip_close(fd);
        }
        warn!("TCP: {} failed ({})", step, rc);
        Error::Platform(rc)
    };

    let reuse: i32 = 1;
    // SAFETY: `reuse` outlives the call and the length matches its type.
    let rc = unsafe {
        lwip_setsockopt(
            fd,
            SOL_SOCKET as _,
            SO_REUSEADDR as _,
            core::ptr::addr_of!(reuse).cast(),
            core::mem::size_of::<i32>() as _,
        )
    };
    if rc < 0 {
        return Err(fail("SO_REUSEADDR", rc));
    }

    let addr = sockaddr_in {
        sin_len: 0,
        sin_family: AF_INET as _,
        // SAFETY: lwip_htons takes a u16 and returns the network-byte-order value.
        sin_port: unsafe { lwip_htons(port) },
        sin_addr: in_addr { s_addr: 0 }, // INADDR_ANY
        sin_zero: [0u8; 8],
    };

    // SAFETY: `addr` is valid for the bind() call; errors are checked.
    let rc = unsafe {
        lwip_bind(
            fd,
            core::ptr::addr_of!(addr).cast(),
            core::mem::size_of::<sockaddr_in>() as _,
        )
    };
    if rc < 0 {
        return Err(fail("lwip_bind", rc));
    }

    // SAFETY: listen() on a bound stream socket.
    let rc = unsafe { lwip_listen(fd, i32::from(backlog)) };
    if rc < 0 {
        return Err(fail("lwip_listen", rc));
    }

    info!("TCP: listening on 0.0.0.0:{} (backlog {})", port, backlog);
    // SAFETY: `fd` is an open, listening socket; ownership moves to std,
    // which closes it on drop.
    Ok(unsafe { TcpListener::from_raw_fd(fd) })
}

#[cfg(not(target_os = "espidf"))]
pub fn bind(port: u16, backlog: u8) -> Result<TcpListener> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    info!(
        "TCP(sim): listening on {} (backlog {} requested, OS default used)",
        listener.local_addr()?,
        backlog
    );
    Ok(listener)
}
