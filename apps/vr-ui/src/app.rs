use crate::views::PlotView;
use std::path::PathBuf;
use vr_app::{RunOverrides, RunRequest, RunSummary, run_service, scenario_service};
use vr_project::Scenario;
use vr_results::TrajectoryRecord;

pub struct RegulatorApp {
    scenario: Scenario,
    scenario_path: Option<PathBuf>,
    dt_s: f64,
    t_end_s: f64,
    fixed_seed: bool,
    seed: u64,
    records: Vec<TrajectoryRecord>,
    band: (f64, f64),
    summary: Option<RunSummary>,
    last_run_s: Option<f64>,
    error: Option<String>,
    plot_view: PlotView,
}

impl RegulatorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, scenario_path: Option<PathBuf>) -> Self {
        let (scenario, error) = match &scenario_path {
            Some(path) => match scenario_service::load_scenario(path) {
                Ok(s) => (s, None),
                Err(e) => (
                    vr_project::default_scenario(),
                    Some(format!("Failed to load {}: {}", path.display(), e)),
                ),
            },
            None => (vr_project::default_scenario(), None),
        };

        let reg = scenario.regulator;
        let mut app = Self {
            scenario,
            scenario_path,
            dt_s: reg.dt,
            t_end_s: reg.t_end,
            fixed_seed: false,
            seed: 42,
            records: Vec::new(),
            band: (reg.v_min, reg.v_max),
            summary: None,
            last_run_s: None,
            error,
            plot_view: PlotView::default(),
        };
        if app.error.is_none() {
            app.rerun();
        }
        app
    }

    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            dt_s: Some(self.dt_s),
            t_end_s: Some(self.t_end_s),
            seed: self.fixed_seed.then_some(self.seed),
        }
    }

    fn rerun(&mut self) {
        let request = RunRequest {
            scenario: &self.scenario,
            overrides: self.overrides(),
        };
        match run_service::run_scenario(&request) {
            Ok(response) => {
                self.records = response.records();
                self.band = (
                    response.manifest.parameters.v_min,
                    response.manifest.parameters.v_max,
                );
                self.summary = vr_app::get_run_summary(&self.records).ok();
                self.last_run_s = Some(response.timing.total_time_s);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "run failed");
                self.error = Some(e.to_string());
            }
        }
    }

    fn reset_grid(&mut self) {
        self.dt_s = self.scenario.regulator.dt;
        self.t_end_s = self.scenario.regulator.t_end;
    }

    fn show_summary(&self, ui: &mut egui::Ui) {
        let Some(summary) = &self.summary else {
            return;
        };
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("{} steps", summary.record_count));
            ui.separator();
            ui.label(format!(
                "V {:.2} .. {:.2}",
                summary.voltage_range.0, summary.voltage_range.1
            ));
            ui.separator();
            ui.label(format!(
                "final {:.3} V ({})",
                summary.final_voltage, summary.final_mode
            ));
            ui.separator();
            ui.label(format!(
                "Normal {:.1}%, excursions {}",
                100.0 * summary.in_band_fraction(),
                summary.excursions
            ));
            if let Some(t) = self.last_run_s {
                ui.separator();
                ui.label(format!("{:.3}s", t));
            }
        });
    }
}

impl eframe::App for RegulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = match &self.scenario_path {
                    Some(path) => format!("{} ({})", self.scenario.name, path.display()),
                    None => self.scenario.name.clone(),
                };
                ui.strong(title);
                ui.separator();

                if ui.button("Rerun").clicked() {
                    self.rerun();
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.dt_s)
                        .speed(0.001)
                        .range(1e-4..=10.0)
                        .prefix("dt "),
                );
                ui.add(
                    egui::DragValue::new(&mut self.t_end_s)
                        .speed(0.5)
                        .range(0.01..=10_000.0)
                        .prefix("t_end "),
                );
                if ui.button("Reset").clicked() {
                    self.reset_grid();
                }

                ui.separator();
                ui.checkbox(&mut self.fixed_seed, "Fixed seed");
                ui.add_enabled(
                    self.fixed_seed,
                    egui::DragValue::new(&mut self.seed).prefix("seed "),
                );
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            } else {
                self.show_summary(ui);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot_view.show(ui, &self.records, self.band);
        });
    }
}
