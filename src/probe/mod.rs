use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

mod cpu_name;
mod hostname;
mod load;

pub use cpu_name::read_model_name;
pub use load::measure;

const CPU_INFO_PATH: &str = "/proc/cpuinfo";
const CPU_STAT_PATH: &str = "/proc/stat";
const SAMPLING_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open {}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read system information")]
    Io(#[from] io::Error),
    #[error("`{0}` not found")]
    FieldNotFound(&'static str),
    #[error("malformed cpu statistics line {0:?}")]
    MalformedStat(String),
    #[error("cpu counters did not advance during the sampling window")]
    NoProgress,
    #[error("cpu counters went backwards between samples")]
    CountersWentBackwards,
    #[error("failed to get hostname")]
    Hostname(#[from] nix::Error),
}

/// The OS data sources behind the three diagnostic endpoints.
///
/// Nothing is cached here: every call goes back to the source, so two
/// requests never share a buffer.
#[derive(Debug, Clone)]
pub struct Probes {
    cpu_info: PathBuf,
    cpu_stat: PathBuf,
    window: Duration,
}

impl Default for Probes {
    fn default() -> Self {
        Probes::new(CPU_INFO_PATH, CPU_STAT_PATH, SAMPLING_WINDOW)
    }
}

impl Probes {
    pub fn new(cpu_info: impl Into<PathBuf>, cpu_stat: impl Into<PathBuf>, window: Duration) -> Self {
        Probes {
            cpu_info: cpu_info.into(),
            cpu_stat: cpu_stat.into(),
            window,
        }
    }

    pub fn hostname(&self) -> Result<String, Error> {
        hostname::read()
    }

    pub fn cpu_name(&self) -> Result<String, Error> {
        let file = open(&self.cpu_info)?;
        read_model_name(BufReader::new(file))
    }

    /// Blocks the calling thread for the whole sampling window.
    pub fn load(&self) -> Result<String, Error> {
        measure(|| open(&self.cpu_stat).map(BufReader::new), self.window)
    }
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })
}
