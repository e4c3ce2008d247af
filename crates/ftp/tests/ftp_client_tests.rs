// crates/ftp/tests/ftp_client_tests.rs
//! Integration tests against a scripted in-process FTP server

use mcsync_ftp::{FtpClient, FtpError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

type Uploads = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// Spawns a single-session server that understands the command subset the
/// client speaks. Remote files all report mtime 2000-01-01T00:00:00Z.
async fn spawn_server(files: HashMap<String, Vec<u8>>) -> (String, Uploads) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let uploads: Uploads = Arc::new(Mutex::new(HashMap::new()));

    let session_uploads = uploads.clone();
    tokio::spawn(async move {
        let (control, _) = listener.accept().await.unwrap();
        run_session(control, files, session_uploads).await;
    });

    (addr.to_string(), uploads)
}

async fn run_session(control: TcpStream, files: HashMap<String, Vec<u8>>, uploads: Uploads) {
    let (read_half, mut out) = control.into_split();
    let mut lines = BufReader::new(read_half).lines();
    out.write_all(b"220 test server ready\r\n").await.unwrap();

    let mut data_listener: Option<TcpListener> = None;

    while let Ok(Some(line)) = lines.next_line().await {
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg),
            None => (line.as_str(), ""),
        };

        match cmd {
            "USER" => out.write_all(b"331 need password\r\n").await.unwrap(),
            "PASS" => out.write_all(b"230 logged in\r\n").await.unwrap(),
            "TYPE" => out.write_all(b"200 binary\r\n").await.unwrap(),
            "MDTM" => {
                let reply = if files.contains_key(arg) {
                    "213 20000101000000\r\n".to_string()
                } else {
                    "550 No such file\r\n".to_string()
                };
                out.write_all(reply.as_bytes()).await.unwrap();
            }
            "SIZE" => {
                let reply = match files.get(arg) {
                    Some(content) => format!("213 {}\r\n", content.len()),
                    None => "550 No such file\r\n".to_string(),
                };
                out.write_all(reply.as_bytes()).await.unwrap();
            }
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                let port = listener.local_addr().unwrap().port();
                let reply = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{}).\r\n",
                    port / 256,
                    port % 256
                );
                data_listener = Some(listener);
                out.write_all(reply.as_bytes()).await.unwrap();
            }
            "RETR" => {
                let listener = data_listener.take().unwrap();
                out.write_all(b"150 opening data connection\r\n")
                    .await
                    .unwrap();
                let (mut data, _) = listener.accept().await.unwrap();
                data.write_all(&files[arg]).await.unwrap();
                data.shutdown().await.unwrap();
                drop(data);
                out.write_all(b"226 transfer complete\r\n").await.unwrap();
            }
            "STOR" => {
                let listener = data_listener.take().unwrap();
                out.write_all(b"150 opening data connection\r\n")
                    .await
                    .unwrap();
                let (mut data, _) = listener.accept().await.unwrap();
                let mut received = Vec::new();
                data.read_to_end(&mut received).await.unwrap();
                uploads.lock().unwrap().insert(arg.to_string(), received);
                out.write_all(b"226 transfer complete\r\n").await.unwrap();
            }
            "QUIT" => {
                out.write_all(b"221 bye\r\n").await.unwrap();
                break;
            }
            _ => out.write_all(b"502 not implemented\r\n").await.unwrap(),
        }
    }
}

fn card_fixture() -> HashMap<String, Vec<u8>> {
    let mut files = HashMap::new();
    files.insert(
        "PS2/SLUS-21274-1/SLUS-21274-1.mc2".to_string(),
        b"card image payload".to_vec(),
    );
    files
}

#[tokio::test]
async fn test_login_and_queries() {
    let (host, _) = spawn_server(card_fixture()).await;

    let mut client = FtpClient::connect(&host).await.unwrap();
    client.login("ftpuser", "secret").await.unwrap();

    let mtime = client
        .mdtm("PS2/SLUS-21274-1/SLUS-21274-1.mc2")
        .await
        .unwrap();
    assert_eq!(mtime, 946_684_800);

    let size = client
        .size("PS2/SLUS-21274-1/SLUS-21274-1.mc2")
        .await
        .unwrap();
    assert_eq!(size, 18);

    client.quit().await.unwrap();
}

#[tokio::test]
async fn test_mdtm_missing_file_is_unexpected_reply() {
    let (host, _) = spawn_server(card_fixture()).await;

    let mut client = FtpClient::connect(&host).await.unwrap();
    client.login("ftpuser", "secret").await.unwrap();

    let err = client
        .mdtm("PS2/MISSING-1/MISSING-1.mc2")
        .await
        .unwrap_err();
    match err {
        FtpError::UnexpectedReply { reply, .. } => assert_eq!(reply.code, 550),
        other => panic!("expected UnexpectedReply, got {other}"),
    }
}

#[tokio::test]
async fn test_download_stream_in_chunks() {
    let (host, _) = spawn_server(card_fixture()).await;

    let mut client = FtpClient::connect(&host).await.unwrap();
    client.login("ftpuser", "secret").await.unwrap();

    let mut stream = client
        .open_download("PS2/SLUS-21274-1/SLUS-21274-1.mc2")
        .await
        .unwrap();

    let mut payload = Vec::new();
    let mut buf = [0u8; 4];
    loop {
        let read = stream.read_chunk(&mut buf).await.unwrap();
        if read == 0 {
            break;
        }
        payload.extend_from_slice(&buf[..read]);
    }
    stream.finish().await.unwrap();
    client.complete_transfer().await.unwrap();

    assert_eq!(payload, b"card image payload");
}

#[tokio::test]
async fn test_upload_stream_in_chunks() {
    let (host, uploads) = spawn_server(card_fixture()).await;

    let mut client = FtpClient::connect(&host).await.unwrap();
    client.login("ftpuser", "secret").await.unwrap();

    let mut stream = client
        .open_upload("PS2/SLUS-21274-2/SLUS-21274-2.mc2")
        .await
        .unwrap();
    for chunk in b"fresh card contents".chunks(5) {
        stream.write_chunk(chunk).await.unwrap();
    }
    stream.finish().await.unwrap();
    client.complete_transfer().await.unwrap();

    let stored = uploads
        .lock()
        .unwrap()
        .get("PS2/SLUS-21274-2/SLUS-21274-2.mc2")
        .cloned()
        .unwrap();
    assert_eq!(stored, b"fresh card contents");
}

#[tokio::test]
async fn test_connect_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    drop(listener);

    let err = FtpClient::connect(&host).await.unwrap_err();
    assert!(matches!(err, FtpError::Connect { .. }));
}
