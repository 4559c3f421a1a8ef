use std::io::Write;
use std::process::{Command, Output, Stdio};

fn jpconv(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jpconv"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn jpconv");
    // The child may exit before reading everything when it rejects its flags.
    let _ = child.stdin.take().unwrap().write_all(input);
    child.wait_with_output().unwrap()
}

#[test]
fn test_encode_default_shift_jis() {
    let output = jpconv(&[], "日本語〜😀\n".as_bytes());
    assert!(output.status.success());
    assert_eq!(
        output.stdout,
        vec![0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA, 0x81, 0x60, b'?', b'\n']
    );
}

#[test]
fn test_decode_flag() {
    let output = jpconv(&["-d"], &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA, b'\n']);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "日本語\n");
}

#[test]
fn test_euc_jp_with_small_chunks() {
    let output = jpconv(&["-e", "eucjp", "--chunk-size", "1"], "日!".as_bytes());
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0xC6, 0xFC, b'!']);
}

#[test]
fn test_empty_input() {
    let output = jpconv(&[], b"");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unsupported_encoding_fails() {
    let output = jpconv(&["-e", "big5"], b"abc");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported encoding"));
}

#[test]
fn test_zero_chunk_size_fails() {
    let output = jpconv(&["--chunk-size", "0"], b"abc");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_huge_chunk_size_fails_cleanly() {
    let huge = usize::MAX.to_string();
    let output = jpconv(&["--chunk-size", &huge], b"abc");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("chunk_size must be between"));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "encoding": "EUC-JP" }}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let output = jpconv(&["--config", &path], "日".as_bytes());
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0xC6, 0xFC]);

    // Flags win over the file.
    let output = jpconv(&["--config", &path, "-e", "sjis"], "日".as_bytes());
    assert_eq!(output.stdout, vec![0x93, 0xFA]);
}

#[test]
fn test_missing_config_file_fails() {
    let output = jpconv(&["--config", "/nonexistent/jpconv.json"], b"abc");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load configuration"));
}
