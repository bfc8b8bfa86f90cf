use std::collections::BTreeMap;

use rail_charts::chart::{
    AxisKeys, Chart, Curve, DrawCommand, DrawSurface, Layer, Point, Scene, Shape, Style,
    draw_curve, draw_guidelines, draw_rect,
};

fn record(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn appended(command: &DrawCommand) -> &Shape {
    match command {
        DrawCommand::Append { element, .. } => &element.shape,
        DrawCommand::Remove { .. } => panic!("expected an appended element"),
    }
}

#[test]
fn curve_keeps_input_order_with_position_on_x() {
    let chart = Chart::new(500.0, 200.0, (0.0, 1000.0), (0.0, 100.0));
    let data = [
        record(&[("position", 0.0), ("speed", 0.0)]),
        record(&[("position", 500.0), ("speed", 50.0)]),
        record(&[("position", 1000.0), ("speed", 100.0)]),
    ];
    let layer = Layer::new("speed-space", AxisKeys::new("position", "speed"));
    let command = draw_curve(&chart, &layer, &data, Curve::Linear, Style::default());
    let Shape::Path { vertices, .. } = appended(&command) else {
        panic!("expected a path");
    };
    assert_eq!(vertices.len(), 3);
    let xs: Vec<f64> = vertices.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 250.0, 500.0]);
    let ys: Vec<f64> = vertices.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![200.0, 100.0, 0.0]);
}

#[test]
fn rectangles_have_non_negative_extents_in_both_layouts() {
    let chart = Chart::new(400.0, 300.0, (0.0, 4000.0), (0.0, 3600.0));
    let blocks = [
        record(&[
            ("position_start", 1000.0),
            ("position_end", 2000.0),
            ("time_start", 600.0),
            ("time_end", 1200.0),
        ]),
        record(&[
            ("position_start", 2000.0),
            ("position_end", 1000.0),
            ("time_start", 1200.0),
            ("time_end", 600.0),
        ]),
    ];
    for rotate in [false, true] {
        let layer = Layer::new("occupancy", AxisKeys::new("position", "time")).rotated(rotate);
        for block in &blocks {
            match appended(&draw_rect(&chart, &layer, block, Style::default())) {
                Shape::Rect { width, height, .. } => {
                    assert!(*width >= 0.0 && *height >= 0.0, "rotate={rotate}");
                }
                other => panic!("expected a rect, got {other:?}"),
            }
        }
    }
}

#[test]
fn scene_retains_data_and_replaces_guidelines() {
    let chart = Chart::new(300.0, 150.0, (0.0, 10.0), (0.0, 10.0));
    let data = [
        record(&[("time", 0.0), ("position", 0.0)]),
        record(&[("time", 10.0), ("position", 10.0)]),
    ];
    let layer = Layer::new("data", AxisKeys::new("time", "position")).class("train-1");

    let mut scene = Scene::new();
    scene.execute(draw_curve(&chart, &layer, &data, Curve::StepAfter, Style::default()));
    for _ in 0..3 {
        scene.execute_all(draw_guidelines(&chart, "overlay"));
    }

    assert_eq!(scene.groups().len(), 2);
    assert_eq!(scene.len(), 3);
    let curve = &scene.group("data").unwrap().elements[0];
    assert!(curve.has_class("train-1"));
    assert_eq!(
        scene.group("overlay").unwrap().elements[0].shape,
        Shape::Line {
            from: Point::ORIGIN,
            to: Point::new(0.0, 150.0)
        }
    );
}
