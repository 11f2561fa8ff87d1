use super::Error;

pub fn read() -> Result<String, Error> {
    let name = nix::unistd::gethostname()?;
    Ok(payload(&name.to_string_lossy()))
}

fn payload(raw: &str) -> String {
    let first_line = raw.lines().next().unwrap_or_default();
    let mut payload = String::with_capacity(first_line.len() + 1);
    payload.push_str(first_line);
    payload.push('\n');
    payload
}
