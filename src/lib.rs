//! Severity tally and top-error summary for plain-text log files.

use log::info;
use std::{io::BufRead, path::Path};

mod classify;
mod input;
mod level;
mod report;

pub use classify::{classify, Classification, UNKNOWN_ERROR};
pub use input::{open_log, AnalyzeError, LossyLines};
pub use level::Level;
pub use report::{ReportAggregator, TOP_ERRORS};

/// Classify every line of `reader` and collect the results.
/// Any read failure aborts the whole scan, so no partial aggregate is returned.
pub fn analyze_reader(reader: impl BufRead) -> Result<ReportAggregator, AnalyzeError> {
    let mut report = ReportAggregator::new();
    let mut scanned = 0usize;
    for line in LossyLines::new(reader) {
        report.record(classify(&line?));
        scanned += 1;
    }
    info!("scanned {} lines, {} matched a level", scanned, report.total());
    Ok(report)
}

/// Open the log file at `path` and analyze it. The file is closed before this returns.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<ReportAggregator, AnalyzeError> {
    analyze_reader(open_log(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        env, fs,
        io::{self, BufReader, Cursor, Read},
        process,
    };

    struct BrokenDisk;

    impl Read for BrokenDisk {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device went away"))
        }
    }

    #[test]
    fn test_total_equals_matched_lines() {
        let input = "2024-01-01 ERROR: disk full\n\
                     INFO server started\n\
                     random noise\n\
                     WARNING: ERROR in the middle\n\
                     \n\
                     DEBUG verbose\n";
        let matched = input.lines().filter(|line| classify(line) != Classification::NoMatch).count();
        let report = analyze_reader(Cursor::new(input)).unwrap();
        assert_eq!(report.total(), matched as u64);
        assert_eq!(report.count(Level::Error), 2);
        assert_eq!(report.count(Level::Warning), 0);
    }

    #[test]
    fn test_empty_input() {
        let report = analyze_reader(Cursor::new("")).unwrap();
        assert_eq!(report.total(), 0);
        let rendered = report.render();
        assert!(rendered.contains("Total log entries: 0\n"));
        assert!(!rendered.contains("Most frequent errors:"));
    }

    #[test]
    fn test_analyze_file() {
        let path = env::temp_dir().join(format!("logreport-test-{}.log", process::id()));
        fs::write(&path, b"ERROR: disk full\r\nERROR - disk full\r\nINFO \xffboot\r\n").unwrap();
        let report = analyze_file(&path);
        fs::remove_file(&path).unwrap();
        let report = report.unwrap();
        assert_eq!(report.count(Level::Info), 1);
        assert_eq!(report.top_errors(TOP_ERRORS), vec![("disk full", 2)]);
    }

    #[test]
    fn test_analyze_missing_file() {
        assert!(matches!(analyze_file("no-such-dir/missing.log"), Err(AnalyzeError::FileNotFound(_))));
    }

    #[test]
    fn test_read_failure_aborts_scan() {
        let reader = BufReader::new(Cursor::new("ERROR: first\nINFO second\n").chain(BrokenDisk));
        let error = analyze_reader(reader).unwrap_err();
        assert!(matches!(error, AnalyzeError::Io { line: 3, .. }));
        assert_eq!(error.to_string(), "failed to read line 3: device went away");
    }
}
