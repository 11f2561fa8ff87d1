use std::fmt::Display;

use crate::{
    error::Error,
    probe::{self, Probes},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Hostname,
    CpuName,
    Load,
}

impl Route {
    /// Exact match only, `/hostname/` or `/hostname?x` are not found.
    pub fn from_path(path: &str) -> Result<Route, Error> {
        match path {
            "/hostname" => Ok(Route::Hostname),
            "/cpu-name" => Ok(Route::CpuName),
            "/load" => Ok(Route::Load),
            _ => Err(Error::NotFound(path.to_owned())),
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Hostname => "/hostname",
            Route::CpuName => "/cpu-name",
            Route::Load => "/load",
        }
    }

    pub fn serve(self, probes: &Probes) -> Result<String, probe::Error> {
        match self {
            Route::Hostname => probes.hostname(),
            Route::CpuName => probes.cpu_name(),
            Route::Load => probes.load(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
