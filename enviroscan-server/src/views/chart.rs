use crate::views::format::format_number;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 260.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 28.0;
const MARGIN_BOTTOM: f64 = 32.0;
const LINE_COLOR: &str = "rgba(75,192,192,1)";

/// Renders the PM2.5 trend as an inline SVG line chart with points labelled
/// `1..=n`. Non-finite samples leave a gap in the line.
pub fn render_trend_chart(samples: &[f64]) -> String {
    let mut svg = format!(
        r#"<svg class="trend" viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="PM2.5 trend">"#
    );
    svg.push_str(&format!(
        r#"<text x="{MARGIN_LEFT}" y="16" font-size="12" fill="{LINE_COLOR}">PM2.5 (µg/m³)</text>"#
    ));

    let Some((low, high)) = value_range(samples) else {
        svg.push_str(&format!(
            r##"<text x="{}" y="{}" font-size="14" text-anchor="middle" fill="#6b7280">Waiting for data</text>"##,
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        svg.push_str("</svg>");
        return svg;
    };

    let plot_bottom = HEIGHT - MARGIN_BOTTOM;
    svg.push_str(&format!(
        r##"<line x1="{MARGIN_LEFT}" y1="{plot_bottom}" x2="{}" y2="{plot_bottom}" stroke="#d1d5db"/>"##,
        WIDTH - MARGIN_RIGHT
    ));
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" font-size="11" text-anchor="end" fill="#6b7280">{}</text>"##,
        MARGIN_LEFT - 6.0,
        MARGIN_TOP + 4.0,
        format_number(high)
    ));
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" font-size="11" text-anchor="end" fill="#6b7280">{}</text>"##,
        MARGIN_LEFT - 6.0,
        plot_bottom,
        format_number(low)
    ));

    let points: Vec<Option<(f64, f64)>> = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            sample
                .is_finite()
                .then(|| (x_position(index, samples.len()), y_position(*sample, low, high)))
        })
        .collect();

    for segment in points.split(Option::is_none) {
        let coordinates: Vec<String> = segment
            .iter()
            .flatten()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect();

        if coordinates.len() > 1 {
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="2" points="{}"/>"#,
                coordinates.join(" ")
            ));
        }
    }

    for (index, point) in points.iter().enumerate() {
        let x = x_position(index, samples.len());
        if let Some((x, y)) = point {
            svg.push_str(&format!(
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{LINE_COLOR}"/>"#
            ));
        }
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{}" font-size="11" text-anchor="middle" fill="#6b7280">{}</text>"##,
            plot_bottom + 16.0,
            index + 1
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn value_range(samples: &[f64]) -> Option<(f64, f64)> {
    let (low, high) = samples
        .iter()
        .copied()
        .filter(|sample| sample.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), sample| {
            (low.min(sample), high.max(sample))
        });

    if low > high {
        None
    } else if low == high {
        Some((low - 1.0, high + 1.0))
    } else {
        Some((low, high))
    }
}

fn x_position(index: usize, count: usize) -> f64 {
    let span = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

    if count < 2 {
        MARGIN_LEFT + span / 2.0
    } else {
        MARGIN_LEFT + span * index as f64 / (count - 1) as f64
    }
}

fn y_position(value: f64, low: f64, high: f64) -> f64 {
    let span = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    MARGIN_TOP + span * (high - value) / (high - low)
}
