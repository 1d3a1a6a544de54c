// Route plotting with plotters

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::models::{Library, LocationId, PlanOutcome};

/// Draws every library, the start and the planned route to a PNG file.
/// Longitude is plotted on x, latitude on y.
pub fn visualize_route(
    output_path: &Path,
    outcome: &PlanOutcome,
    libraries: &HashMap<LocationId, Library>,
    start: &Library,
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = libraries
        .values()
        .map(|library| library.coordinates.as_xy())
        .collect();
    let (min_x, max_x, min_y, max_y) = determine_bounds(&points, start.coordinates.as_xy());

    let root = BitMapBackend::new(output_path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Card route: {} ({} stops, {} unmet)",
                outcome.status,
                outcome.route.len(),
                outcome.unmet.len()
            ),
            ("sans-serif", 20).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(min_x..max_x, min_y..max_y)?;

    chart.configure_mesh().draw()?;

    // Libraries not on the route
    let idle_style = BLACK.mix(0.3).filled();
    chart
        .draw_series(
            libraries
                .values()
                .filter(|library| !outcome.route.contains(&library.id))
                .map(|library| Circle::new(library.coordinates.as_xy(), 4, idle_style)),
        )?
        .label("Library")
        .legend(move |(x, y)| Circle::new((x, y), 4, idle_style));

    let path_points: Vec<(f64, f64)> = std::iter::once(start.coordinates.as_xy())
        .chain(
            outcome
                .route
                .stops()
                .iter()
                .filter_map(|stop| libraries.get(&stop.library))
                .map(|library| library.coordinates.as_xy()),
        )
        .collect();

    chart
        .draw_series(LineSeries::new(path_points.clone(), RED.mix(0.7).stroke_width(2)))?
        .label(format!("Route (distance {:.4})", outcome.route.total_distance()))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.7).stroke_width(2))
        });

    let visited_style = GREEN.filled();
    chart
        .draw_series(
            path_points
                .iter()
                .skip(1)
                .map(|point| Circle::new(*point, 7, visited_style)),
        )?
        .label("Visited")
        .legend(move |(x, y)| Circle::new((x, y), 7, visited_style));

    // Stop numbers next to each visited library
    for (i, point) in path_points.iter().enumerate().skip(1) {
        chart.draw_series(std::iter::once(Text::new(
            format!("{}", i),
            *point,
            ("sans-serif", 14).into_font(),
        )))?;
    }

    chart
        .draw_series(std::iter::once(Circle::new(
            start.coordinates.as_xy(),
            10,
            ShapeStyle::from(&BLUE).filled(),
        )))?
        .label(format!("Start ({})", start.name))
        .legend(|(x, y)| Circle::new((x, y), 10, ShapeStyle::from(&BLUE).filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Chart boundaries covering all points plus 10% padding
pub fn determine_bounds(points: &[(f64, f64)], start: (f64, f64)) -> (f64, f64, f64, f64) {
    let (mut min_x, mut min_y) = start;
    let (mut max_x, mut max_y) = start;

    for &(x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    // Keep a visible range when all points coincide
    let padding_x = ((max_x - min_x) * 0.1).max(0.01);
    let padding_y = ((max_y - min_y) * 0.1).max(0.01);

    (
        min_x - padding_x,
        max_x + padding_x,
        min_y - padding_y,
        max_y + padding_y,
    )
}
