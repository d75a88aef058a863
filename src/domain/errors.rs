use std::fmt;

// Probe failure, tagged with the phase that aborted the invocation.
// Each variant carries the store's message unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    Connect(String),
    Write(String),
    Read(String),
}

impl ProbeError {
    pub fn phase(&self) -> &'static str {
        match self {
            ProbeError::Connect(_) => "connect",
            ProbeError::Write(_) => "write",
            ProbeError::Read(_) => "read",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProbeError::Connect(message)
            | ProbeError::Write(message)
            | ProbeError::Read(message) => message,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
