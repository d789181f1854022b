use contracts::projections::p900_price_history::dto::PriceHistorySeries;
use leptos::prelude::*;

use crate::shared::components::table::number_format::format_cost;
use crate::shared::date_utils::format_month;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;

/// Plot area scaling of the two series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    points: usize,
    min: f64,
    max: f64,
}

impl ChartScale {
    pub fn new(points: usize, bounds: (f64, f64)) -> Self {
        let (mut min, mut max) = bounds;
        // flat series: give it some height
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0_f64.max(min.abs() * 0.1);
            max += 1.0_f64.max(max.abs() * 0.1);
        }
        Self { points, min, max }
    }

    pub fn x(&self, index: usize) -> f64 {
        let plot = WIDTH - PAD_LEFT - PAD_RIGHT;
        if self.points <= 1 {
            return PAD_LEFT + plot / 2.0;
        }
        PAD_LEFT + plot * index as f64 / (self.points - 1) as f64
    }

    pub fn y(&self, value: f64) -> f64 {
        let plot = HEIGHT - PAD_TOP - PAD_BOTTOM;
        PAD_TOP + plot * (self.max - value) / (self.max - self.min)
    }

    /// Polyline segments; a month without data breaks the line
    pub fn segments(&self, values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (i, value) in values.iter().enumerate() {
            match value {
                Some(v) => current.push((self.x(i), self.y(*v))),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

fn points_attr(segment: &[(f64, f64)]) -> String {
    segment
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn series_view(scale: ChartScale, values: &[Option<f64>], class: &'static str) -> impl IntoView {
    let segments = scale.segments(values);
    view! {
        <g class=class>
            {segments
                .into_iter()
                .map(|segment| {
                    let dots = segment
                        .iter()
                        .map(|(x, y)| view! { <circle cx=*x cy=*y r="3" /> })
                        .collect_view();
                    view! {
                        <polyline points=points_attr(&segment) fill="none" />
                        {dots}
                    }
                })
                .collect_view()}
        </g>
    }
}

/// Линейный график двух рядов по месяцам (SVG)
#[component]
pub fn PriceChart(series: PriceHistorySeries) -> impl IntoView {
    let Some(bounds) = series.value_bounds() else {
        return view! {}.into_any();
    };
    let scale = ChartScale::new(series.len(), bounds);
    let label_every = (series.len() / 8).max(1);

    let labels = series
        .months
        .iter()
        .enumerate()
        .filter(|(i, _)| i % label_every == 0)
        .map(|(i, month)| {
            view! {
                <text class="chart__label" x=scale.x(i) y=HEIGHT - 8.0 text-anchor="middle">
                    {format_month(month)}
                </text>
            }
        })
        .collect_view();

    view! {
        <svg class="chart" viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) role="img">
            <text class="chart__label" x="4" y=scale.y(bounds.1) + 4.0>{format_cost(bounds.1)}</text>
            <text class="chart__label" x="4" y=scale.y(bounds.0) + 4.0>{format_cost(bounds.0)}</text>
            <line class="chart__axis" x1=PAD_LEFT y1=HEIGHT - PAD_BOTTOM x2=WIDTH - PAD_RIGHT y2=HEIGHT - PAD_BOTTOM />
            {series_view(scale, &series.almacen, "chart__series chart__series--almacen")}
            {series_view(scale, &series.orden_compra, "chart__series chart__series--oc")}
            {labels}
        </svg>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_break_on_missing_months() {
        let scale = ChartScale::new(4, (1.0, 3.0));
        let segments = scale.segments(&[Some(1.0), None, Some(2.0), Some(3.0)]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_scale_maps_bounds_to_plot_edges() {
        let scale = ChartScale::new(3, (10.0, 20.0));
        assert_eq!(scale.y(20.0), PAD_TOP);
        assert_eq!(scale.y(10.0), HEIGHT - PAD_BOTTOM);
        assert_eq!(scale.x(0), PAD_LEFT);
        assert_eq!(scale.x(2), WIDTH - PAD_RIGHT);
    }

    #[test]
    fn test_flat_series_has_height() {
        let scale = ChartScale::new(1, (5.0, 5.0));
        let y = scale.y(5.0);
        assert!(y > PAD_TOP && y < HEIGHT - PAD_BOTTOM);
    }
}
