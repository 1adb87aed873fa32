use std::io::{self, BufRead};

use futures::Stream;
use futures::stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Split a reader into raw byte lines.
///
/// The stream ends after EOF or after the first I/O error.
pub(crate) fn byte_lines<R>(reader: R) -> impl Stream<Item = io::Result<Vec<u8>>> + Send + 'static
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    stream::unfold(Some(reader), |state| async move {
        let mut reader = state?;
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => None,
            Ok(_) => {
                strip_line_ending(&mut buf);
                Some((Ok(buf), Some(reader)))
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Split a blocking reader, such as a process pipe, into raw byte lines.
///
/// Reading happens on the blocking pool; the thread exits at EOF, after the
/// first I/O error or once the returned stream is dropped and the next line
/// arrives.
pub(crate) fn blocking_byte_lines<R>(reader: R) -> impl Stream<Item = io::Result<Vec<u8>>> + Send + 'static
where
    R: io::Read + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        let mut reader = io::BufReader::new(reader);
        loop {
            let mut buf = Vec::new();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    strip_line_ending(&mut buf);
                    if tx.send(Ok(buf)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });

    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|line| (line, rx)) })
}

/// Split an in-memory buffer into lines, dropping the empty tail after a
/// final newline.
pub(crate) fn split_lines(data: &[u8]) -> Vec<Vec<u8>> {
    let data = data.strip_suffix(b"\n").unwrap_or(data);
    if data.is_empty() {
        return Vec::new();
    }
    data.split(|b| *b == b'\n')
        .map(|line| {
            let mut line = line.to_vec();
            strip_line_ending(&mut line);
            line
        })
        .collect()
}

fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_byte_lines_strip_terminators() {
        let input: &[u8] = b"first\r\nsecond\nthird";
        let lines: Vec<Vec<u8>> = byte_lines(input)
            .map(|line| line.unwrap())
            .collect()
            .await;
        assert_eq!(lines, vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]);
    }

    #[tokio::test]
    async fn test_byte_lines_keep_binary_header() {
        let input: &[u8] = b"\x01\x00\x00\x00\x00\x00\x00\x05hello\n";
        let lines: Vec<Vec<u8>> = byte_lines(input)
            .map(|line| line.unwrap())
            .collect()
            .await;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0], 0x01);
        assert!(lines[0].ends_with(b"hello"));
    }

    #[tokio::test]
    async fn test_blocking_byte_lines_keep_order() {
        let input = io::Cursor::new(b"first\r\nsecond\n\nlast".to_vec());
        let lines: Vec<Vec<u8>> = blocking_byte_lines(input)
            .map(|line| line.unwrap())
            .collect()
            .await;
        assert_eq!(
            lines,
            vec![b"first".to_vec(), b"second".to_vec(), Vec::new(), b"last".to_vec()]
        );
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(split_lines(b"a\n\nb"), vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]);
        assert!(split_lines(b"").is_empty());
        assert!(split_lines(b"\n").is_empty());
    }
}
