use egui_plot::{HLine, Legend, Line, Plot, PlotPoints, Points};
use vr_results::TrajectoryRecord;
use vr_sim::Mode;

#[derive(Default)]
pub struct PlotView {
    show_transitions: bool,
}

impl PlotView {
    pub fn show(&mut self, ui: &mut egui::Ui, records: &[TrajectoryRecord], band: (f64, f64)) {
        if records.is_empty() {
            ui.label("No trajectory yet. Press Rerun.");
            return;
        }

        ui.checkbox(&mut self.show_transitions, "Mark mode transitions");

        let points: PlotPoints = vr_app::extract_voltage_series(records).into();
        let voltage = Line::new(points).name("V(t)");

        let transitions = if self.show_transitions {
            vr_app::mode_transitions(records)
        } else {
            Vec::new()
        };

        Plot::new("voltage_plot")
            .legend(Legend::default())
            .x_axis_label("Time (s)")
            .y_axis_label("Voltage (V)")
            .show(ui, |plot_ui| {
                plot_ui.line(voltage);
                plot_ui.hline(
                    HLine::new(band.0)
                        .name("V_min")
                        .color(egui::Color32::from_rgb(70, 130, 220)),
                );
                plot_ui.hline(
                    HLine::new(band.1)
                        .name("V_max")
                        .color(egui::Color32::from_rgb(220, 80, 60)),
                );
                for mode in Mode::ALL {
                    let marks: Vec<[f64; 2]> = transitions
                        .iter()
                        .filter(|t| t.to == mode)
                        .map(|t| [t.time_s, t.voltage_v])
                        .collect();
                    if !marks.is_empty() {
                        plot_ui.points(Points::new(marks).radius(3.0).name(format!("-> {}", mode)));
                    }
                }
            });
    }
}
