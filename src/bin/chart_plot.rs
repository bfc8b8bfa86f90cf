use clap::{Parser, ValueEnum};
use plotters::coord::Shift;
use plotters::prelude::*;
use rail_charts::chart::{
    self as rail_chart, AxisKeys, Chart, DrawCommand, DrawSurface, Label, Layer, Scene, Style,
    extent,
};
use rail_charts::config::{ChartConfig, find_chart, load_chart_configs};
use rail_charts::dataset::{self, Record};
use rail_charts::export::{self, scene as export_scene};
use rail_charts::intervals::{Bucket, distributed_intervals_from_values};
use rail_charts::render::{draw_scene, select_font_family};
use rail_charts::store::{ChartViewAction, StatePort, chart_view_store};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a simulation chart (speed-space, space-time) from CSV"
)]
struct Cli {
    /// CSV of simulation records (one column per field)
    #[arg(long)]
    input: PathBuf,
    /// Chart manifest (YAML list, TOML file or directory of TOML files)
    #[arg(long, default_value = "configs/charts.yaml")]
    config: PathBuf,
    /// Chart name within the manifest
    #[arg(long, default_value = "speed-space")]
    chart: String,
    /// Output image; `.svg` renders SVG, anything else PNG
    #[arg(long, default_value = "artifacts/chart.png")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = Kind::Curve)]
    kind: Kind,
    /// Swap axes relative to the manifest
    #[arg(long, default_value_t = false)]
    rotate: bool,
    /// Label drawn at the last record
    #[arg(long)]
    label: Option<String>,
    /// Colour record markers by thirds of this field
    #[arg(long)]
    classify: Option<String>,
    /// Also dump the draw commands as JSON ('-' for stdout)
    #[arg(long)]
    commands: Option<PathBuf>,
}

/// What is drawn for the dataset.
#[derive(Copy, Clone, ValueEnum, Debug)]
enum Kind {
    /// Path through the two keyed fields
    Curve,
    /// Band between the `value0` and `value1` fields
    Area,
}

const DATA_GROUP: &str = "data";
const OVERLAY_GROUP: &str = "overlay";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let charts = load_chart_configs(&cli.config)?;
    let config = find_chart(&charts, &cli.chart)
        .ok_or_else(|| anyhow::anyhow!("chart '{}' not found in {}", cli.chart, cli.config.display()))?
        .clone();
    let records = dataset::load_records(&cli.input)?;
    if records.is_empty() {
        return Err(anyhow::anyhow!("No records in {}", cli.input.display()));
    }

    let mut view = chart_view_store();
    if config.rotate != cli.rotate {
        view.dispatch(ChartViewAction::ToggleRotation);
    }
    let rotate = view.get_state().rotate;
    tracing::info!(chart = %config.name, records = records.len(), rotate, "rendering chart");

    let keys = config.axis_keys();
    let (x_domain, y_domain) = domains(&records, keys, rotate, cli.kind)?;
    let chart = config.chart(x_domain, y_domain);
    let commands = build_commands(&config, &chart, &records, rotate, &cli)?;

    if let Some(path) = &cli.commands {
        let mut writer = export::writer_for_path(path)?;
        export_scene::write_json(&mut *writer, &config.name, (chart.width, chart.height), &commands)?;
        writer.flush()?;
    }

    let mut scene = Scene::new();
    scene.execute_all(commands);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let size = (config.width, config.height);
    let is_svg = cli
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if is_svg {
        let root = SVGBackend::new(&cli.output, size).into_drawing_area();
        plot(&root, &config, keys, rotate, x_domain, y_domain, &scene)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(&cli.output, size).into_drawing_area();
        plot(&root, &config, keys, rotate, x_domain, y_domain, &scene)?;
        root.present()?;
    }
    Ok(())
}

fn domains(
    records: &[Record],
    keys: AxisKeys<'_>,
    rotate: bool,
    kind: Kind,
) -> anyhow::Result<((f64, f64), (f64, f64))> {
    let range_of = |fields: &[&str]| {
        extent(
            records
                .iter()
                .flat_map(|r| fields.iter().filter_map(move |f| r.get(*f).copied())),
        )
        .ok_or_else(|| anyhow::anyhow!("No numeric values for {}", fields.join("/")))
    };
    let (x_fields, y_fields): (Vec<&str>, Vec<&str>) = match (kind, rotate) {
        (Kind::Curve, _) => (vec![keys.x_key(rotate)], vec![keys.y_key(rotate)]),
        (Kind::Area, false) => (vec![keys.first], vec!["value0", "value1"]),
        (Kind::Area, true) => (vec!["value0", "value1"], vec![keys.first]),
    };
    Ok((
        pad(range_of(x_fields.as_slice())?),
        pad(range_of(y_fields.as_slice())?),
    ))
}

/// Give a collapsed range some extent so the scale stays invertible.
fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn build_commands(
    config: &ChartConfig,
    chart: &Chart,
    records: &[Record],
    rotate: bool,
    cli: &Cli,
) -> anyhow::Result<Vec<DrawCommand>> {
    let curve = config.interpolation()?;
    let layer = Layer::new(DATA_GROUP, config.axis_keys())
        .class(&config.name)
        .rotated(rotate);

    let mut commands = Vec::new();
    match cli.kind {
        Kind::Curve => commands.push(rail_chart::draw_curve(
            chart,
            &layer,
            records,
            curve,
            Style::stroke(config.colors.curve, 2.0),
        )),
        Kind::Area => commands.push(rail_chart::draw_area(
            chart,
            &layer,
            records,
            curve,
            Style::fill(config.colors.area),
        )),
    }

    if let Some(field) = &cli.classify {
        let values = dataset::column(records, field);
        let bounds = distributed_intervals_from_values(&values)
            .ok_or_else(|| anyhow::anyhow!("No values for classification field '{field}'"))?;
        tracing::debug!(field = %field, bounds = ?bounds.0, "classification bounds");
        for record in records {
            let Some(value) = record.get(field) else {
                continue;
            };
            commands.push(rail_chart::draw_marker(
                chart,
                &layer,
                record,
                bucket_color(bounds.classify(*value)),
            ));
        }
    }

    if let (Some(text), Some(last)) = (&cli.label, records.last()) {
        let label = Label {
            text: text.as_str(),
            direction: is_ascending(records, config.axis_keys().first),
            marker: false,
            color: config.colors.label,
        };
        commands.extend(rail_chart::draw_text(chart, &layer, last, &label));
    }

    commands.extend(rail_chart::draw_guidelines(chart, OVERLAY_GROUP));
    Ok(commands)
}

fn is_ascending(records: &[Record], key: &str) -> bool {
    match (
        records.first().and_then(|r| r.get(key)),
        records.last().and_then(|r| r.get(key)),
    ) {
        (Some(first), Some(last)) => last >= first,
        _ => true,
    }
}

fn bucket_color(bucket: Bucket) -> rail_chart::Color {
    match bucket {
        Bucket::Low => rail_chart::Color::rgb(0x2c, 0xa0, 0x2c),
        Bucket::Medium => rail_chart::Color::rgb(0xff, 0x7f, 0x0e),
        Bucket::High => rail_chart::Color::rgb(0xd6, 0x27, 0x28),
    }
}

fn plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    keys: AxisKeys<'_>,
    rotate: bool,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    scene: &Scene,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let label_font = FontDesc::new(select_font_family(), 16.0, FontStyle::Normal);
    let margin = config.margin;

    let mut mesh = ChartBuilder::on(root)
        .margin_top(margin.top as u32)
        .margin_right(margin.right as u32)
        .x_label_area_size(margin.bottom as u32)
        .y_label_area_size(margin.left as u32)
        .build_cartesian_2d(x_domain.0..x_domain.1, y_domain.0..y_domain.1)?;
    mesh.configure_mesh()
        .x_desc(keys.x_key(rotate))
        .y_desc(keys.y_key(rotate))
        .label_style(label_font)
        .x_labels(8)
        .y_labels(6)
        .draw()?;

    let plot_area = mesh.plotting_area().strip_coord_spec();
    draw_scene(&plot_area, scene)?;
    Ok(())
}
