use std::{io::BufRead, thread, time::Duration};

use nom::{
    bytes::complete::tag,
    character::complete::{space0, space1, u64 as counter},
    sequence::preceded,
    IResult,
};

use super::Error;

/// Cumulative tick counters from the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuSample {
    /// Reads the first line of the source. Only the aggregate line is accepted,
    /// so a source starting with `cpu0` is malformed.
    pub fn read<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        Self::parse(&line)
    }

    pub fn parse(line: &str) -> Result<Self, Error> {
        match aggregate_line(line) {
            Ok((_, counters)) => Ok(Self::from(counters)),
            Err(_) => Err(Error::MalformedStat(line.trim_end().to_owned())),
        }
    }

    fn idle_time(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    fn non_idle_time(&self) -> u64 {
        [self.user, self.nice, self.system, self.irq, self.softirq, self.steal]
            .into_iter()
            .fold(0, u64::saturating_add)
    }

    fn total_time(&self) -> u64 {
        self.idle_time().saturating_add(self.non_idle_time())
    }
}

impl From<[u64; 8]> for CpuSample {
    fn from([user, nice, system, idle, iowait, irq, softirq, steal]: [u64; 8]) -> Self {
        CpuSample {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        }
    }
}

fn aggregate_line(input: &str) -> IResult<&str, [u64; 8]> {
    let (mut input, _) = preceded(space0, tag("cpu"))(input)?;
    let mut counters = [0; 8];
    for slot in counters.iter_mut() {
        let (rest, value) = preceded(space1, counter)(input)?;
        *slot = value;
        input = rest;
    }
    Ok((input, counters))
}

/// Share of the ticks between two samples that were not spent idle, in percent.
pub fn load_percent(first: &CpuSample, second: &CpuSample) -> Result<f64, Error> {
    let total_diff = second
        .total_time()
        .checked_sub(first.total_time())
        .ok_or(Error::CountersWentBackwards)?;
    let idle_diff = second
        .idle_time()
        .checked_sub(first.idle_time())
        .ok_or(Error::CountersWentBackwards)?;
    if total_diff == 0 {
        return Err(Error::NoProgress);
    }
    let busy_diff = total_diff
        .checked_sub(idle_diff)
        .ok_or(Error::CountersWentBackwards)?;
    Ok(busy_diff as f64 / total_diff as f64 * 100.0)
}

pub fn format_load(load: f64) -> String {
    format!("{}%\n", load.round() as u64)
}

/// Takes two samples `window` apart, opening the source anew for each one.
pub fn measure<R, F>(mut open: F, window: Duration) -> Result<String, Error>
where
    R: BufRead,
    F: FnMut() -> Result<R, Error>,
{
    let first = CpuSample::read(open()?)?;
    tracing::debug!(sample = ?first, "Took first cpu sample");
    thread::sleep(window);
    let second = CpuSample::read(open()?)?;
    tracing::debug!(sample = ?second, "Took second cpu sample");

    let load = load_percent(&first, &second)?;
    Ok(format_load(load))
}
