//! Host wire over stdout.

use std::io::{self, Write};

use hostbridge_core::{HostCall, HostFailure};

/// Code reported when stdout rejects a write.
const WRITE_FAILED: i32 = -1;

/// Host call primitive writing one envelope per line to a writer.
///
/// The shell uses stdout, so the host on the other end of the pipe reads a
/// newline-delimited stream of envelopes.
#[derive(Debug)]
pub struct LineHost<W> {
    out: W,
}

impl LineHost<io::Stdout> {
    /// Host writing to stdout.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> LineHost<W> {
    /// Host writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> HostCall for LineHost<W> {
    fn query(&mut self, request: &str) -> Result<(), HostFailure> {
        writeln!(self.out, "{request}")
            .and_then(|()| self.out.flush())
            .map_err(|e| HostFailure::new(WRITE_FAILED, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_request() {
        let mut host = LineHost::new(Vec::new());

        host.query(r#"{"name":"js_loaded","data":""}"#).expect("write");
        host.query(r#"{"name":"translate","data":"Back"}"#).expect("write");

        let text = String::from_utf8(host.get_ref().clone()).expect("utf8");
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(r#"{"name":"js_loaded""#));
    }
}
