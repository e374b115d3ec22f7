//! Minimal HTTP/1.1 server imitating the GitHub release-listing endpoint.
//!
//! Serves pre-built JSON pages selected by the `page` query parameter and
//! records every request line and header block it receives.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ReleaseServerOptions {
    /// Page number (1-based) answered with HTTP 500 instead of its body.
    pub fail_page: Option<u32>,
    /// Page number answered with a body that is not JSON.
    pub garbage_page: Option<u32>,
}

/// One request as received: the request line and lowercased header pairs.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct ReleaseServer {
    /// Base URL to use as the API root (e.g. "http://127.0.0.1:12345").
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ReleaseServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `pages[0]` is served for `page=1`;
/// pages past the end are served as `[]`. The server runs until the process exits.
pub fn start(pages: Vec<String>) -> ReleaseServer {
    start_with_options(pages, ReleaseServerOptions::default())
}

pub fn start_with_options(pages: Vec<String>, opts: ReleaseServerOptions) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let pages = Arc::new(pages);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let pages = Arc::clone(&pages);
            let log = Arc::clone(&log);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &pages, &log, &opts));
        }
    });
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(data).ok()
}

fn handle(
    mut stream: TcpStream,
    pages: &[String],
    log: &Mutex<Vec<Recorded>>,
    opts: &ReleaseServerOptions,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(head) = read_head(&mut stream) else {
        return;
    };

    let mut lines = head.split("\r\n");
    let target = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let headers = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let page = page_param(&target);
    log.lock().unwrap().push(Recorded { target, headers });

    let (status, body) = match page {
        Some(p) if opts.fail_page == Some(p) => ("500 Internal Server Error", "{}".to_string()),
        Some(p) if opts.garbage_page == Some(p) => ("200 OK", "<html>oops</html>".to_string()),
        Some(p) if p >= 1 => (
            "200 OK",
            pages.get(p as usize - 1).cloned().unwrap_or_else(|| "[]".to_string()),
        ),
        _ => ("404 Not Found", "{}".to_string()),
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

fn page_param(target: &str) -> Option<u32> {
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(k, _)| *k == "page")
        .and_then(|(_, v)| v.parse().ok())
}
