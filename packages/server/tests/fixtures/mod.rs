//! Test fixtures shared by the integration tests.

use std::{
    net::TcpStream,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

/// A `chitchat-server` process listening on a local port.
///
/// The process is killed when the fixture is dropped.
pub struct TestServer {
    port: u16,
    process: Child,
}

impl TestServer {
    /// Spawn the server binary and wait until it accepts connections
    pub fn start(port: u16) -> Self {
        let process = Command::new(env!("CARGO_BIN_EXE_chitchat-server"))
            .args(["--port", &port.to_string(), "--log-level", "warn"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start chitchat-server");

        let server = Self { port, process };
        server.wait_until_ready(Duration::from_secs(10));
        server
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    #[allow(dead_code)]
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    fn wait_until_ready(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if TcpStream::connect(("127.0.0.1", self.port)).is_ok() {
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
        panic!("chitchat-server did not start on port {}", self.port);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
