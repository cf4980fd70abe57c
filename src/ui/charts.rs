use eframe::egui::{Color32, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{risk_color, ColorMap};
use crate::data::model::RiskCategory;
use crate::data::summary::{HistBin, Summary};
use crate::data::pipeline::DashboardView;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Distribution histograms
// ---------------------------------------------------------------------------

pub fn age_histogram(ui: &mut Ui, view: &DashboardView) {
    histogram_plot(ui, "age_hist", "Age", &view.age_hist, Color32::from_rgb(0x4f, 0x8d, 0xd1));
}

pub fn income_histogram(ui: &mut Ui, view: &DashboardView) {
    histogram_plot(
        ui,
        "income_hist",
        "Income",
        &view.income_hist,
        Color32::from_rgb(0x6a, 0x5d, 0xc9),
    );
}

fn histogram_plot(ui: &mut Ui, id: &str, x_label: &str, bins: &[HistBin], color: Color32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.0}-{:.0}", b.lo, b.hi))
                .fill(color)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Average loan amount by employment status
// ---------------------------------------------------------------------------

pub fn loan_by_employment(ui: &mut Ui, summary: &Summary) {
    let labels: Vec<String> = summary
        .avg_loan_by_employment
        .iter()
        .map(|(status, _)| status.clone())
        .collect();
    let colors = ColorMap::new(labels.iter().map(String::as_str));

    let bars: Vec<Bar> = summary
        .avg_loan_by_employment
        .iter()
        .enumerate()
        .map(|(i, (status, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.6)
                .name(status)
                .fill(colors.color_for(status))
        })
        .collect();

    let axis_labels = labels.clone();
    Plot::new("loan_by_employment")
        .height(CHART_HEIGHT)
        .y_axis_label("Average Loan Amount")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 0.01 || i < 0.0 {
                return String::new();
            }
            axis_labels
                .get(i as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Default rate by credit score
// ---------------------------------------------------------------------------

pub fn default_rate_line(ui: &mut Ui, summary: &Summary) {
    let points: PlotPoints = summary
        .default_rate_by_score
        .iter()
        .map(|&(score, rate)| [score as f64, rate])
        .collect();

    Plot::new("default_rate")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Credit Score")
        .y_axis_label("Default Rate")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Default rate")
                    .color(Color32::from_rgb(0xd6, 0x4a, 0x4a))
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Risk category pie
// ---------------------------------------------------------------------------

/// Proportion of applicants per risk category, drawn as a pie with a legend.
pub fn risk_pie(ui: &mut Ui, risk_counts: &[(RiskCategory, usize)]) {
    let total: usize = risk_counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        ui.label("No applicants in the current selection.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(CHART_HEIGHT), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) / 2.0 - 4.0;

        // Start at 12 o'clock and sweep clockwise. Slices are subdivided into
        // quarter-turn fans so every emitted polygon stays convex.
        let mut angle = -std::f32::consts::FRAC_PI_2;
        for &(risk, count) in risk_counts {
            let mut remaining = count as f32 / total as f32 * std::f32::consts::TAU;
            while remaining > 0.0 {
                let sweep = remaining.min(std::f32::consts::FRAC_PI_2);
                let steps = ((sweep / 0.05).ceil() as usize).max(1);

                let mut points = Vec::with_capacity(steps + 2);
                points.push(center);
                for s in 0..=steps {
                    let a = angle + sweep * s as f32 / steps as f32;
                    points.push(center + Vec2::new(a.cos(), a.sin()) * radius);
                }
                painter.add(Shape::convex_polygon(points, risk_color(risk), Stroke::NONE));

                angle += sweep;
                remaining -= sweep;
            }
        }

        // Legend: swatch, label, count, percentage.
        ui.add_space(12.0);
        ui.vertical(|ui: &mut Ui| {
            for &(risk, count) in risk_counts {
                let pct = 100.0 * count as f64 / total as f64;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, painter) = ui.allocate_painter(Vec2::splat(12.0), Sense::hover());
                    painter.rect_filled(swatch.rect, 2.0, risk_color(risk));
                    ui.label(format!("{}: {count} ({pct:.1}%)", risk.label()));
                });
            }
        });
    });
}
