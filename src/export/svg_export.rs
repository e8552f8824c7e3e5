use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::simulator::clock::HORIZON;
use crate::simulator::Sample;

const WITHOUT_ANH_COLOR: RGBColor = RGBColor(0x88, 0x84, 0xd8);
const WITH_ANH_COLOR: RGBColor = RGBColor(0x82, 0xca, 0x9d);

pub fn write_svg(path: &Path, history: &[Sample]) -> Result<()> {
    let root = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    draw_chart(&root, history)?;
    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "SVG chart exported");
    Ok(())
}

fn draw_chart<DB>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    history: &[Sample],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(area)
        .caption("Blood Loss Simulation", ("sans-serif", 28))
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0.0..HORIZON, 0.0..2.5)?;

    chart
        .configure_mesh()
        .x_desc("Time (hours)")
        .y_desc("RBC Volume (L)")
        .x_label_formatter(&|v| format!("{:.1}", v))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            history.iter().map(|s| (s.time, s.without_anh)),
            &WITHOUT_ANH_COLOR,
        ))?
        .label("Without ANH")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &WITHOUT_ANH_COLOR));

    chart
        .draw_series(LineSeries::new(
            history.iter().map(|s| (s.time, s.with_anh)),
            &WITH_ANH_COLOR,
        ))?
        .label("With ANH")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &WITH_ANH_COLOR));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
