//! Minimal HTTP/1.1 server with per-path scripted replies for integration tests.
//!
//! Each path maps to a reply for HEAD and one for GET. Unknown paths get 404.
//! Every connection serves one request and is closed. Requests are logged as
//! "METHOD /path" so tests can assert on the escalation sequence.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Respond with this status code.
    Status(u16),
    /// Hold the connection open without answering, then close it.
    Stall(Duration),
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub head: Reply,
    pub get: Reply,
}

impl Route {
    pub fn new(head: Reply, get: Reply) -> Self {
        Self { head, get }
    }

    pub fn status(head: u16, get: u16) -> Self {
        Self::new(Reply::Status(head), Reply::Status(get))
    }
}

pub struct TestServer {
    pub base_url: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Requests seen so far, e.g. `["HEAD /a", "GET /a"]`.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: &[(&str, Route)]) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .iter()
            .map(|(p, r)| (p.to_string(), *r))
            .collect(),
    );
    let log = Arc::new(Mutex::new(Vec::new()));
    let server_log = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&server_log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        log,
    }
}

/// A URL on localhost where nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("/").to_string();
    log.lock().unwrap().push(format!("{} {}", method, path));

    let route = routes
        .get(&path)
        .copied()
        .unwrap_or_else(|| Route::status(404, 404));
    let (reply, is_head) = if method.eq_ignore_ascii_case("HEAD") {
        (route.head, true)
    } else {
        (route.get, false)
    };

    match reply {
        Reply::Stall(d) => thread::sleep(d),
        Reply::Status(code) => {
            let body: &[u8] = b"hello";
            let response = format!(
                "HTTP/1.1 {} Scripted\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                code,
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            if !is_head {
                let _ = stream.write_all(body);
            }
        }
    }
}
