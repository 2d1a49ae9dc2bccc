//! Juman++ subprocess adapter.
//!
//! The analyzer keeps one `jumanpp` process alive and speaks its line
//! protocol: one sentence per input line, one morpheme per output line,
//! `EOS` after each sentence. Alternative analyses (lines starting with
//! `@ `) are ignored.
//!
//! Juman++ escapes spaces and double quotes in its output (`\␣`, `\"`).
//! Such lines, like any line that does not carry the eleven standard
//! fields, are reported as [`AnalyzerError::Format`].

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::engine::MorphologicalAnalyzer;
use crate::error::{AnalyzerError, Result, WakachiError};

const END_OF_SENTENCE: &str = "EOS";
const ALTERNATIVE_PREFIX: &str = "@ ";
const MIN_FIELDS: usize = 11;
const NUMERIC_FIELDS: [usize; 4] = [4, 6, 8, 10];

struct JumanppProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Morphological analyzer backed by a long-running `jumanpp` process.
pub struct JumanppAnalyzer {
    command: String,
    process: Mutex<JumanppProcess>,
}

impl JumanppAnalyzer {
    /// Start `command` and connect to its standard streams.
    pub fn spawn(command: &str) -> Result<Self> {
        let mut child = Command::new(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => WakachiError::unavailable_engine(format!(
                    "Juman++ executable '{command}' was not found"
                )),
                _ => WakachiError::Io(e),
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| WakachiError::engine("Juman++ stdin is not available"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| WakachiError::engine("Juman++ stdout is not available"))?;

        debug!("spawned '{}' (pid {})", command, child.id());

        Ok(Self {
            command: command.to_string(),
            process: Mutex::new(JumanppProcess {
                child,
                stdin,
                stdout: BufReader::new(stdout),
            }),
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn communicate(&self, text: &str) -> std::result::Result<Vec<String>, AnalyzerError> {
        let mut process = self.process.lock();

        writeln!(process.stdin, "{text}")
            .and_then(|_| process.stdin.flush())
            .map_err(|e| AnalyzerError::Engine(format!("failed to write to juman++: {e}")))?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = process
                .stdout
                .read_line(&mut line)
                .map_err(|e| AnalyzerError::Engine(format!("failed to read from juman++: {e}")))?;
            if read == 0 {
                return Err(AnalyzerError::Engine(
                    "juman++ terminated before end of sentence".to_string(),
                ));
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line == END_OF_SENTENCE {
                break;
            }
            lines.push(line.to_string());
        }

        Ok(lines)
    }
}

impl MorphologicalAnalyzer for JumanppAnalyzer {
    fn analyze(&self, text: &str) -> std::result::Result<Vec<String>, AnalyzerError> {
        if text.contains(['\n', '\r']) {
            return Err(AnalyzerError::Format(
                "input must not contain line breaks".to_string(),
            ));
        }
        let lines = self.communicate(text)?;
        parse_output(lines.iter().map(String::as_str))
    }

    fn name(&self) -> &'static str {
        "jumanpp"
    }
}

impl Drop for JumanppAnalyzer {
    fn drop(&mut self) {
        let process = self.process.get_mut();
        if let Err(e) = process.child.kill() {
            warn!("failed to stop juman++: {e}");
        }
        let _ = process.child.wait();
    }
}

/// Collect morpheme surfaces from the lines of one sentence.
pub(crate) fn parse_output<'a, I>(lines: I) -> std::result::Result<Vec<String>, AnalyzerError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut surfaces = Vec::new();
    for line in lines {
        if line.starts_with(ALTERNATIVE_PREFIX) || line.is_empty() {
            continue;
        }
        surfaces.push(parse_line(line)?);
    }
    Ok(surfaces)
}

fn parse_line(line: &str) -> std::result::Result<String, AnalyzerError> {
    if line.starts_with('\\') {
        return Err(AnalyzerError::Format(format!(
            "escaped surface in juman++ output: {line}"
        )));
    }

    let fields: Vec<&str> = line.splitn(MIN_FIELDS + 1, ' ').collect();
    if fields.len() < MIN_FIELDS {
        return Err(AnalyzerError::Format(format!(
            "expected {MIN_FIELDS} fields in juman++ output: {line}"
        )));
    }
    if NUMERIC_FIELDS
        .iter()
        .any(|&index| fields[index].parse::<u32>().is_err())
    {
        return Err(AnalyzerError::Format(format!(
            "malformed juman++ output: {line}"
        )));
    }

    Ok(fields[0].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output() {
        let lines = [
            "外国 がいこく 外国 名詞 6 普通名詞 1 * 0 * 0 \"代表表記:外国/がいこく カテゴリ:場所-その他\"",
            "人 じん 人 接尾辞 14 名詞性名詞接尾辞 2 * 0 * 0 \"代表表記:人/じん\"",
            "@ 人 ひと 人 名詞 6 普通名詞 1 * 0 * 0 \"代表表記:人/ひと\"",
            "参政 さんせい 参政 名詞 6 サ変名詞 2 * 0 * 0 NIL",
        ];
        let surfaces = parse_output(lines).unwrap();
        assert_eq!(surfaces, vec!["外国", "人", "参政"]);
    }

    #[test]
    fn test_escaped_space_is_format_error() {
        let lines = ["\\␣ \\␣ \\␣ 特殊 1 空白 6 * 0 * 0 NIL"];
        assert!(matches!(parse_output(lines), Err(AnalyzerError::Format(_))));
    }

    #[test]
    fn test_short_line_is_format_error() {
        assert!(matches!(
            parse_output(["外国 がいこく 外国"]),
            Err(AnalyzerError::Format(_))
        ));
        assert!(matches!(
            parse_output(["外国 がいこく 外国 名詞 x 普通名詞 1 * 0 * 0"]),
            Err(AnalyzerError::Format(_))
        ));
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let result = JumanppAnalyzer::spawn("wakachi-no-such-jumanpp");
        assert!(matches!(result, Err(WakachiError::UnavailableEngine(_))));
    }
}
