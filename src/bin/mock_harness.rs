//! Minimal stand-in harness for manual runs of uiset-driver

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

fn serve(mut stream: TcpStream) -> std::io::Result<usize> {
    stream.set_nodelay(true)?;
    let mut buf = [0u8; 4096];
    let mut count = 0;

    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Ok(count);
        }
        count += 1;
        let cmd = String::from_utf8_lossy(&buf[..n]);
        println!("📥 #{} {}", count, cmd);

        stream.write_all(format!("{{\"command\":{},\"status\":\"accepted\"}}", count).as_bytes())?;
        thread::sleep(Duration::from_millis(50));
        stream.write_all(format!("{{\"command\":{},\"status\":\"done\",\"echo\":{:?}}}", count, cmd).as_bytes())?;
    }
}

fn main() {
    let port: u16 = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(27960);

    let listener = match TcpListener::bind(("127.0.0.1", port)) {
        Ok(l) => {
            println!("✅ Mock harness listening on 127.0.0.1:{}", port);
            l
        }
        Err(e) => {
            println!("❌ Failed to bind: {}", e);
            return;
        }
    };

    for stream in listener.incoming() {
        match stream.and_then(serve) {
            Ok(count) => println!("🔌 Client done after {} commands", count),
            Err(e) => println!("❌ Client error: {}", e),
        }
    }
}
