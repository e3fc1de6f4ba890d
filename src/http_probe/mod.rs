pub mod probe;
pub mod result;
pub mod target;

pub mod prelude {
    pub use super::probe::{ProbeOptions, probe_target};
    pub use super::result::Observation;
    pub use super::target::Target;
}

use std::fmt::Write;

/// Render an error and its chain of sources on a single line, so it can be
/// used as the `reason` of a log row.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_report_flattens_source_chain() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(report(&err), "outer: connection refused");
    }
}
