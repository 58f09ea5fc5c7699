use std::{
    fs,
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use indexmap::IndexMap;

use super::error::ReportError;
use super::util::format_seconds;

/// Metric holding the end-to-end time of a run.
pub const TOTAL_METRIC: &str = "TOTAL";

/// Metrics compared, in report order.
pub const METRICS: [&str; 6] = [
    "WCC",
    "SCC",
    "Triangle Count",
    "Clustering Coefficient",
    "Diameter",
    TOTAL_METRIC,
];

/// Named timings in seconds, as measured for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolTimings {
    name: String,
    times: IndexMap<String, f64>,
}

impl ToolTimings {
    pub fn new<S: Into<String>>(name: S, times: IndexMap<String, f64>) -> ToolTimings {
        ToolTimings {
            name: name.into(),
            times,
        }
    }

    /// Timings measured with Neo4j on the wiki-Vote dataset.
    pub fn neo4j_baseline() -> ToolTimings {
        let times = [
            ("WCC", 2.5),
            ("SCC", 2.8),
            ("Triangle Count", 4.0),
            ("Clustering Coefficient", 3.0),
            ("Diameter", 6.0),
            (TOTAL_METRIC, 15.41),
        ]
        .into_iter()
        .map(|(metric, time)| (metric.to_string(), time))
        .collect();

        ToolTimings::new("Neo4j", times)
    }

    /// Parses a headerless two-column table of `metric,seconds` rows.
    /// Blank lines are skipped and a repeated metric keeps its last value.
    pub fn from_csv<S, R>(name: S, reader: R) -> Result<ToolTimings, ReportError>
    where
        S: Into<String>,
        R: Read,
    {
        let mut times = IndexMap::new();

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let malformed = |content: &str| ReportError::MalformedTiming {
                line: idx + 1,
                content: content.to_string(),
            };

            let line = line.map_err(|_| malformed(""))?;
            if line.trim().is_empty() {
                continue;
            }

            let fields = line.split(',').map(unquote).collect::<Vec<&str>>();
            let (metric, time) = match fields.as_slice() {
                [metric, time] => (*metric, *time),
                _ => return Err(malformed(&line)),
            };

            let time = time.parse::<f64>().map_err(|_| malformed(&line))?;
            times.insert(metric.to_string(), time);
        }

        Ok(ToolTimings::new(name, times))
    }

    /// Reads timings from the file at `path`. See [from_csv](Self::from_csv).
    pub fn load<S, P>(name: S, path: P) -> Result<ToolTimings, ReportError>
    where
        S: Into<String>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| ReportError::TimingsNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_csv(name, file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the time recorded for `metric`, or 0 when it was not measured.
    pub fn get(&self, metric: &str) -> f64 {
        self.times.get(metric).copied().unwrap_or(0.0)
    }
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

/// One metric measured by both tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub metric: String,
    pub baseline: f64,
    pub counterpart: f64,
    /// Name of the faster tool, `None` when the counterpart has no time for this metric.
    pub faster: Option<String>,
    /// Relative difference in percent of the baseline time, `None` when the baseline is zero.
    pub difference: Option<f64>,
}

impl ComparisonRow {
    fn new(metric: &str, baseline: &ToolTimings, counterpart: &ToolTimings) -> ComparisonRow {
        let (b, c) = (baseline.get(metric), counterpart.get(metric));

        let (faster, difference) = if c > 0.0 {
            let faster = if b < c { baseline.name() } else { counterpart.name() };
            let difference = (b != 0.0).then(|| ((c - b) / b * 100.0).abs());
            (Some(faster.to_string()), difference)
        } else {
            (None, Some(0.0))
        };

        ComparisonRow {
            metric: metric.to_string(),
            baseline: b,
            counterpart: c,
            faster,
            difference,
        }
    }

    fn cells(&self) -> [String; 5] {
        [
            self.metric.clone(),
            format_seconds(self.baseline),
            format_seconds(self.counterpart),
            self.faster.clone().unwrap_or_else(|| "N/A".to_string()),
            self.difference
                .map(|d| format!("{:.1}%", d))
                .unwrap_or_else(|| "N/A".to_string()),
        ]
    }
}

/// Overall result, derived from the total times of both tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    pub baseline_total: f64,
    pub counterpart_total: f64,
    /// How many times faster the baseline ran. Below 1 means the counterpart won.
    pub speedup: f64,
}

impl Analysis {
    pub fn baseline_won(&self) -> bool {
        self.speedup > 1.0
    }
}

/// Timings of two tools paired metric by metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    baseline: String,
    counterpart: String,
    rows: Vec<ComparisonRow>,
    analysis: Option<Analysis>,
}

impl Comparison {
    pub fn new(baseline: &ToolTimings, counterpart: &ToolTimings, metrics: &[&str]) -> Comparison {
        let rows = metrics
            .iter()
            .map(|m| ComparisonRow::new(m, baseline, counterpart))
            .collect();

        let (baseline_total, counterpart_total) =
            (baseline.get(TOTAL_METRIC), counterpart.get(TOTAL_METRIC));
        let analysis = (counterpart_total > 0.0 && baseline_total > 0.0).then(|| Analysis {
            baseline_total,
            counterpart_total,
            speedup: counterpart_total / baseline_total,
        });

        Comparison {
            baseline: baseline.name().to_string(),
            counterpart: counterpart.name().to_string(),
            rows,
            analysis,
        }
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn counterpart(&self) -> &str {
        &self.counterpart
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// `None` unless both tools recorded a total time.
    pub fn analysis(&self) -> Option<Analysis> {
        self.analysis
    }

    pub fn headers(&self) -> [String; 5] {
        [
            "Metric".to_string(),
            format!("{} Time (s)", self.baseline),
            format!("{} Time (s)", self.counterpart),
            "Faster Tool".to_string(),
            "% Difference".to_string(),
        ]
    }

    /// Renders the comparison as a console table.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(self.headers().to_vec());

        for row in &self.rows {
            table.add_row(row.cells().to_vec());
        }

        table
    }

    /// Writes the comparison as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);

        let records = std::iter::once(self.headers()).chain(self.rows.iter().map(|r| r.cells()));
        for record in records {
            let line = record
                .iter()
                .map(|field| csv_field(field))
                .collect::<Vec<String>>()
                .join(",");
            writeln!(writer, "{}", line)?;
        }

        writer.flush()
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let path = path.as_ref();
        let failure = |source: io::Error| ReportError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::create(path).map_err(failure)?;
        self.write_csv(file).map_err(failure)
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
