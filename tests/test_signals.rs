//! Ctrl+C handling against the real binary
#![cfg(unix)]

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const DEADLINE: Duration = Duration::from_secs(10);

fn spawn(config_dir: &TempDir, args: &[&str]) -> Child {
    Command::new(env!("CARGO_BIN_EXE_streamconv"))
        .args(args)
        .env("STREAMCONV_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn streamconv")
}

fn sigint(child: &Child) {
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("Failed to run kill");
    assert!(status.success());
}

/// Wait for the process to exit, killing it when the deadline passes
fn wait_code(child: &mut Child) -> Option<i32> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status.code();
        }
        if started.elapsed() > DEADLINE {
            child.kill().ok();
            child.wait().ok();
            panic!("streamconv still running {:?} after SIGINT", DEADLINE);
        }
        thread::sleep(Duration::from_millis(20));
    }
}

/// Forward stderr lines to a channel
fn stderr_lines(child: &mut Child) -> Receiver<String> {
    let stderr = child.stderr.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stderr).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Forward stdout chunks to a channel
fn stdout_chunks(child: &mut Child) -> Receiver<Vec<u8>> {
    let mut stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 256];
        while let Ok(n) = stdout.read(&mut buf) {
            if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
                break;
            }
        }
    });
    rx
}

#[test]
fn test_second_sigint_ends_run_blocked_on_stdin() {
    let config = TempDir::new().unwrap();
    let mut child = spawn(&config, &["--debug"]);
    // stdin stays open and silent, so the first read never returns
    let _stdin = child.stdin.take();

    let lines = stderr_lines(&mut child);
    loop {
        let line = lines.recv_timeout(DEADLINE).expect("no debug output");
        if line.contains("options") {
            break;
        }
    }

    sigint(&child);
    thread::sleep(Duration::from_millis(300));
    sigint(&child);

    assert_eq!(wait_code(&mut child), Some(130));
}

#[test]
fn test_sigint_between_blocks_unwinds_with_130() {
    let config = TempDir::new().unwrap();
    let mut child = spawn(&config, &["--block-size", "4"]);
    let mut stdin = child.stdin.take().unwrap();
    let output = stdout_chunks(&mut child);

    stdin.write_all(b"one\n").unwrap();
    stdin.flush().unwrap();
    let first = output.recv_timeout(DEADLINE).expect("first block not copied");
    assert_eq!(first, b"one\n");

    sigint(&child);
    thread::sleep(Duration::from_millis(300));
    // wakes the pending read; the flag is seen before the next one
    stdin.write_all(b"two\n").unwrap();
    stdin.flush().unwrap();

    assert_eq!(wait_code(&mut child), Some(130));
    drop(stdin);

    let mut copied = first;
    while let Ok(chunk) = output.recv_timeout(Duration::from_secs(1)) {
        copied.extend(chunk);
    }
    assert_eq!(copied, b"one\ntwo\n");
}
