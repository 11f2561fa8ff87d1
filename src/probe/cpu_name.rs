use std::io::{self, BufRead, Read};

use super::Error;

const MODEL_NAME_LABEL: &str = "model name";
const MAX_LINE_LEN: usize = 4095;

/// Scans a `/proc/cpuinfo`-shaped source for the first `model name` line and
/// returns its value followed by a single newline.
pub fn read_model_name<R: BufRead>(mut reader: R) -> Result<String, Error> {
    let mut line = Vec::with_capacity(256);
    loop {
        line.clear();
        if read_capped_line(&mut reader, &mut line)? == 0 {
            return Err(Error::FieldNotFound(MODEL_NAME_LABEL));
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let text = String::from_utf8_lossy(&line);
        if !text.contains(MODEL_NAME_LABEL) {
            continue;
        }
        let Some((_, value)) = text.split_once(':') else {
            tracing::debug!(line = %text, "Label without a value");
            continue;
        };
        let value = value.strip_prefix(' ').unwrap_or(value);

        let mut payload = String::with_capacity(value.len() + 1);
        payload.push_str(value);
        payload.push('\n');
        return Ok(payload);
    }
}

/// Reads at most `MAX_LINE_LEN` bytes of the next line into `line` and
/// discards whatever is left of it.
fn read_capped_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<usize> {
    let read = reader.by_ref().take(MAX_LINE_LEN as u64).read_until(b'\n', line)?;
    if read == MAX_LINE_LEN && line.last() != Some(&b'\n') {
        skip_line(reader)?;
    }
    Ok(read)
}

fn skip_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}
