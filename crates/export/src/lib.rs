//! Export helpers for draw commands and interval classifications.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod scene {
    use std::io::{self, Write};

    use rail_chart::DrawCommand;
    use serde::Serialize;

    #[derive(Serialize)]
    struct CommandDump<'a> {
        chart: &'a str,
        width: f64,
        height: f64,
        commands: &'a [DrawCommand],
    }

    /// Write the command list as pretty JSON, tagged with the chart it was drawn for.
    pub fn write_json(
        writer: &mut dyn Write,
        chart: &str,
        size: (f64, f64),
        commands: &[DrawCommand],
    ) -> io::Result<()> {
        let dump = CommandDump {
            chart,
            width: size.0,
            height: size.1,
            commands,
        };
        serde_json::to_writer_pretty(&mut *writer, &dump)?;
        writeln!(writer)
    }
}

pub mod intervals {
    use std::io::{self, Write};

    use csv::WriterBuilder;
    use rail_intervals::{Bucket, IntervalBounds};
    use serde::Serialize;

    const HEADER: [&str; 3] = ["value", "bucket", "bucket_index"];

    #[derive(Serialize)]
    struct Row {
        value: f64,
        bucket: Bucket,
        bucket_index: usize,
    }

    /// Write one CSV row per value with its bucket, preceded by a `# bounds` comment line.
    pub fn write_csv(
        writer: &mut dyn Write,
        bounds: &IntervalBounds,
        values: &[f64],
    ) -> io::Result<()> {
        let [min, q1, q2, max] = bounds.0;
        writeln!(writer, "# bounds {min},{q1},{q2},{max}")?;
        let mut rows = WriterBuilder::new().has_headers(false).from_writer(writer);
        rows.write_record(HEADER)?;
        for &value in values {
            let bucket = bounds.classify(value);
            rows.serialize(Row {
                value,
                bucket,
                bucket_index: bucket.index(),
            })?;
        }
        rows.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_chart::{Color, DrawCommand, Point, Shape, Style};
    use rail_intervals::IntervalBounds;

    #[test]
    fn intervals_csv_lists_buckets() {
        let mut out = Vec::new();
        let bounds = IntervalBounds([1.0, 2.0, 3.0, 4.0]);
        intervals::write_csv(&mut out, &bounds, &[1.5, 2.0, 4.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "# bounds 1,2,3,4\nvalue,bucket,bucket_index\n1.5,low,0\n2.0,medium,1\n4.0,high,2\n"
        );
    }

    #[test]
    fn scene_json_tags_commands() {
        let commands = vec![
            DrawCommand::append(
                "g",
                "curve",
                Shape::Line {
                    from: Point::ORIGIN,
                    to: Point::new(2.0, 3.0),
                },
                Style::stroke(Color::rgb(255, 0, 0), 2.0),
            ),
            DrawCommand::remove("g", "guideline"),
        ];
        let mut out = Vec::new();
        scene::write_json(&mut out, "speed-space", (100.0, 50.0), &commands).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["chart"], "speed-space");
        assert_eq!(value["commands"][0]["op"], "append");
        assert_eq!(value["commands"][0]["element"]["shape"]["kind"], "line");
        assert_eq!(value["commands"][0]["element"]["style"]["stroke"], "#ff0000");
        assert_eq!(value["commands"][1]["op"], "remove");
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        {
            let mut writer = writer_for_path(&path).unwrap();
            writer.write_all(b"{}").unwrap();
        }
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
