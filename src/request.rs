use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{space0, space1},
    combinator::{rest, verify},
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::Error;

/// Everything past this is never read from a connection.
pub const MAX_REQUEST_LEN: usize = 4096;

/// Extracts the path from the request line of `GET <path> <version>`.
///
/// Only the first line is looked at and the version is only checked for
/// presence. The path is returned exactly as sent.
pub fn parse_path(request: &[u8]) -> Result<&str, Error> {
    let request = request.split(|&b| b == 0).next().unwrap_or_default();
    let line = request.split(|&b| b == b'\n').next().unwrap_or_default();
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let line = std::str::from_utf8(line).map_err(|_| Error::BadRequest)?;

    match request_line(line) {
        Ok((_, path)) => Ok(path),
        Err(_) => Err(Error::BadRequest),
    }
}

fn request_line(input: &str) -> IResult<&str, &str> {
    let (input, path) = delimited(
        preceded(space0, tag("GET")),
        preceded(space1, token),
        space1,
    )(input)?;
    let (input, _version) = verify(rest, |version: &str| !version.is_empty())(input)?;
    Ok((input, path))
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ' || c == '\t')(input)
}

#[cfg(test)]
mod tests {
    use rand::{distributions::Uniform, Rng};

    use super::*;

    #[test]
    fn extracts_path() {
        let request = b"GET /hostname HTTP/1.1\r\nHost: localhost:12345\r\nAccept: */*\r\n\r\n";
        assert_eq!(parse_path(request).unwrap(), "/hostname");
    }

    #[test]
    fn path_is_not_decoded() {
        let request = b"GET /cpu%2Dname?x=1 HTTP/1.1\r\n\r\n";
        assert_eq!(parse_path(request).unwrap(), "/cpu%2Dname?x=1");
    }

    #[test]
    fn version_content_is_not_validated() {
        assert_eq!(parse_path(b"GET /load whatever\r\n").unwrap(), "/load");
        assert_eq!(parse_path(b"GET /load HTTP/1.1").unwrap(), "/load");
        assert_eq!(parse_path(b"GET\t/load\tHTTP/1.0\n").unwrap(), "/load");
    }

    #[test]
    fn stops_at_nul() {
        assert_eq!(parse_path(b"GET /load HTTP/1.1\0garbage").unwrap(), "/load");
        assert!(matches!(parse_path(b"GET /load\0 HTTP/1.1"), Err(Error::BadRequest)));
    }

    #[test]
    fn rejects_missing_tokens() {
        for request in [
            &b""[..],
            b"\r\n",
            b"GET\r\n",
            b"GET /hostname\r\n",
            b"GET /hostname \r\n",
            b"GET /hostname\r\nHTTP/1.1\r\n",
            b"/hostname HTTP/1.1\r\n",
        ] {
            assert!(
                matches!(parse_path(request), Err(Error::BadRequest)),
                "{:?}",
                String::from_utf8_lossy(request)
            );
        }
    }

    #[test]
    fn rejects_other_methods() {
        for request in [
            &b"POST /hostname HTTP/1.1\r\n"[..],
            b"get /hostname HTTP/1.1\r\n",
            b"GETS /hostname HTTP/1.1\r\n",
            b"HEAD /hostname HTTP/1.1\r\n",
        ] {
            assert!(matches!(parse_path(request), Err(Error::BadRequest)));
        }
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            parse_path(b"GET /\xff\xfe HTTP/1.1\r\n"),
            Err(Error::BadRequest)
        ));
    }

    #[test]
    fn random_paths_round_trip() {
        let mut rng = rand::thread_rng();
        let printable = Uniform::new_inclusive(b'!', b'~');
        for _ in 0..256 {
            let len = rng.gen_range(0..64);
            let mut path = String::from("/");
            path.extend((0..len).map(|_| rng.sample(printable) as char));
            let request = format!("GET {path} HTTP/1.1\r\nHost: example\r\n\r\n");
            assert_eq!(parse_path(request.as_bytes()).unwrap(), path);
        }
    }
}
