#![allow(dead_code)]

use std::{
    fs,
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    path::{Path, PathBuf},
    thread,
};

use assert_cmd::Command;
use serde_json::{json, Value};

/// Script-mode command isolated in `home`, with no API key in the environment.
pub fn financia(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("financia").expect("financia binary");
    cmd.env("FINANCIA_CLI_SCRIPT", "1")
        .env("FINANCIA_HOME", home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

pub fn slot_path(home: &Path) -> PathBuf {
    home.join("data").join("financia_transactions.json")
}

pub fn write_config(home: &Path, config: Value) {
    let dir = home.join("config");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(
        dir.join("config.json"),
        serde_json::to_string_pretty(&config).expect("config json"),
    )
    .expect("write config");
}

/// Endpoint on a loopback port nothing listens on.
pub fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/v1beta")
}

/// Serves one canned `generateContent` reply per incoming request, in order.
pub fn serve_model_replies(replies: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}/v1beta", listener.local_addr().expect("addr"));
    thread::spawn(move || {
        for text in replies {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let Ok(clone) = stream.try_clone() else {
                return;
            };
            let mut reader = BufReader::new(clone);
            let mut length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    break;
                }
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    if key.eq_ignore_ascii_case("content-length") {
                        length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut body = vec![0u8; length];
            let _ = reader.read_exact(&mut body);

            let payload = json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
            })
            .to_string();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                payload.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    endpoint
}

pub fn ai_config(endpoint: &str) -> Value {
    json!({
        "ai": {
            "enabled": true,
            "endpoint": endpoint,
            "model": "test-model",
            "api_key_env": "FINANCIA_TEST_KEY",
            "timeout_secs": 5
        }
    })
}
