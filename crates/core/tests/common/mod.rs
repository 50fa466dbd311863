//! Fluent builder for annotated core logs.

use pipeview_core::{Config, Converter};

/// Width the fetch sequence number is padded to, keeping the separator column fixed.
pub const FSEQ_WIDTH: usize = 4;

/// Base PC of the synthetic program.
const PC_BASE: u64 = 0x8000_0000;

/// Prefixes `body` with a padded fetch sequence number and the `"; "` separator.
pub fn annotated(fseq: u64, body: &str) -> String {
    format!("{fseq:>FSEQ_WIDTH$}; {body}")
}

/// Expected output text of a fetch line.
pub fn fetch_text(fseq: u64, ts: u64, disasm: &str) -> String {
    format!("O3PipeView:fetch:{ts}:0x{:08x}:0:{fseq}:{disasm}", PC_BASE + fseq * 4)
}

/// Builds a core log one stage printout at a time.
#[derive(Debug, Default, Clone)]
pub struct TraceBuilder {
    lines: Vec<String>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn fetch(mut self, fseq: u64, ts: u64, disasm: &str) -> Self {
        self.lines.push(annotated(fseq, &fetch_text(fseq, ts, disasm)));
        self
    }

    pub fn decode(mut self, fseq: u64, ts: u64) -> Self {
        self.lines.push(annotated(fseq, &format!("O3PipeView:decode:{ts}")));
        self
    }

    pub fn issue(mut self, fseq: u64, ts: u64) -> Self {
        self.lines.push(annotated(fseq, &format!("O3PipeView:issue:{ts}")));
        self
    }

    pub fn complete(mut self, fseq: u64, ts: u64) -> Self {
        self.lines.push(annotated(fseq, &format!("O3PipeView:complete:{ts}")));
        self
    }

    pub fn retire(mut self, fseq: u64, ts: u64) -> Self {
        self.lines.push(annotated(fseq, &format!("O3PipeView:retire:{ts}:store: 0")));
        self
    }

    pub fn store_comp(mut self, fseq: u64, ts: u64) -> Self {
        self.lines.push(annotated(fseq, &format!("store-comp: {ts}")));
        self
    }

    /// Logs a full in-order lifetime: fetch, decode, issue, complete, retire at `ts..ts+4`.
    pub fn instruction(self, fseq: u64, ts: u64, disasm: &str) -> Self {
        self.fetch(fseq, ts, disasm)
            .decode(fseq, ts + 1)
            .issue(fseq, ts + 2)
            .complete(fseq, ts + 3)
            .retire(fseq, ts + 4)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Expected seven-line record of an instruction logged with [`TraceBuilder::instruction`].
pub fn full_record(fseq: u64, ts: u64, disasm: &str) -> Vec<String> {
    vec![
        fetch_text(fseq, ts, disasm),
        format!("O3PipeView:decode:{}", ts + 1),
        "O3PipeView:rename: 0".to_string(),
        "O3PipeView:dispatch: 0".to_string(),
        format!("O3PipeView:issue:{}", ts + 2),
        format!("O3PipeView:complete:{}", ts + 3),
        format!("O3PipeView:retire:{}:store: 0", ts + 4),
    ]
}

/// Expected record of an instruction squashed before decode.
pub fn undecoded_squashed_record(fseq: u64, ts: u64, disasm: &str) -> Vec<String> {
    vec![
        fetch_text(fseq, ts, disasm),
        "O3PipeView:decode: 0".to_string(),
        "O3PipeView:rename: 0".to_string(),
        "O3PipeView:dispatch: 0".to_string(),
        "O3PipeView:issue: 0".to_string(),
        "O3PipeView:complete: 0".to_string(),
        "O3PipeView:retire: 0:store: 0".to_string(),
    ]
}

/// Runs the default converter and returns the output lines.
pub fn convert(text: &str) -> Vec<String> {
    convert_with(Config::default(), text)
}

/// Runs a converter with `config` and returns the output lines.
pub fn convert_with(config: Config, text: &str) -> Vec<String> {
    Converter::new(config)
        .run_to_string(text)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Fetch sequence number named in an emitted fetch line.
pub fn record_fseq(fetch_line: &str) -> u64 {
    fetch_line.split(':').nth(5).unwrap().parse().unwrap()
}
