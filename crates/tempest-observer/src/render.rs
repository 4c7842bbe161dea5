//! HTML rendering of dashboard projections via `minijinja`.
//!
//! The page template is compiled into the binary and rendered with HTML
//! auto-escaping (selected by the `.html` template name), so device serial
//! numbers taken off the network can never inject markup. Numbers are
//! formatted here, before they reach the template; no store access and no
//! unit conversion happens in this module.

use minijinja::{context, Environment};
use serde::Serialize;
use tempest_types::{
    DashboardProjection, PrecipitationProjection, Projected, RapidWindProjection,
    StandardProjection,
};

/// Seconds between automatic page reloads.
pub const REFRESH_SECONDS: u32 = 10;

/// Name the dashboard template is registered under.
const DASHBOARD_TEMPLATE_NAME: &str = "dashboard.html";

const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Renders the dashboard page.
///
/// Wraps a `minijinja` [`Environment`] whose loader serves the embedded
/// page template. The template is parsed on first use and cached by the
/// environment.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    env: Environment<'static>,
}

impl DashboardRenderer {
    /// Create a renderer serving the embedded dashboard template.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok((name == DASHBOARD_TEMPLATE_NAME).then(|| DASHBOARD_TEMPLATE.to_owned()))
        });
        Self { env }
    }

    /// Render the full dashboard page.
    ///
    /// # Errors
    ///
    /// Returns the `minijinja` error if the template fails to parse or
    /// render.
    pub fn render(&self, dashboard: &DashboardProjection) -> Result<String, minijinja::Error> {
        let sections = [
            standard_section(&dashboard.obs_st),
            rapid_wind_section(&dashboard.rapid_wind),
            precipitation_section(&dashboard.evt_precip),
        ];
        self.env.get_template(DASHBOARD_TEMPLATE_NAME)?.render(context! {
            refresh_seconds => REFRESH_SECONDS,
            sections => sections,
        })
    }
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Template context
// ---------------------------------------------------------------------------

/// One card on the page.
#[derive(Debug, Serialize)]
struct SectionView {
    title: &'static str,
    /// `ready`, `empty`, or `fault`; doubles as the card's CSS class.
    status: &'static str,
    message: String,
    device: String,
    time_label: &'static str,
    time: String,
    readings: Vec<ReadingView>,
}

#[derive(Debug, Serialize)]
struct ReadingView {
    label: &'static str,
    value: String,
}

impl SectionView {
    fn empty(title: &'static str, placeholder: &str) -> Self {
        Self {
            title,
            status: "empty",
            message: placeholder.to_owned(),
            device: String::new(),
            time_label: "",
            time: String::new(),
            readings: Vec::new(),
        }
    }

    fn fault(title: &'static str, error: &str) -> Self {
        Self {
            title,
            status: "fault",
            message: format!("Latest reading could not be displayed: {error}"),
            device: String::new(),
            time_label: "",
            time: String::new(),
            readings: Vec::new(),
        }
    }

    fn ready(
        title: &'static str,
        device: &str,
        time_label: &'static str,
        time: &str,
        readings: Vec<ReadingView>,
    ) -> Self {
        Self {
            title,
            status: "ready",
            message: String::new(),
            device: device.to_owned(),
            time_label,
            time: time.to_owned(),
            readings,
        }
    }
}

const fn reading(label: &'static str, value: String) -> ReadingView {
    ReadingView { label, value }
}

fn standard_section(slot: &Projected<StandardProjection>) -> SectionView {
    const TITLE: &str = "Standard Observation";
    match slot {
        Projected::Absent => SectionView::empty(TITLE, "No observation data yet."),
        Projected::Fault(fault) => SectionView::fault(TITLE, &fault.error),
        Projected::Ready(obs) => SectionView::ready(
            TITLE,
            &obs.serial_number,
            "Time",
            &obs.time,
            vec![
                reading("Temperature", format!("{:.1} °F", obs.temperature)),
                reading("Humidity", format!("{:.0} %", obs.humidity)),
                reading(
                    "Wind Avg",
                    format!("{:.1} mph from {:.0}°", obs.wind_avg, obs.wind_dir),
                ),
                reading("Wind Gust", format!("{:.1} mph", obs.wind_gust)),
                reading("Rain", format!("{:.2} in", obs.rain)),
                reading("Pressure", format!("{:.2} inHg", obs.pressure)),
            ],
        ),
    }
}

fn rapid_wind_section(slot: &Projected<RapidWindProjection>) -> SectionView {
    const TITLE: &str = "Rapid Wind";
    match slot {
        Projected::Absent => SectionView::empty(TITLE, "No rapid wind data yet."),
        Projected::Fault(fault) => SectionView::fault(TITLE, &fault.error),
        Projected::Ready(wind) => SectionView::ready(
            TITLE,
            &wind.serial_number,
            "Time",
            &wind.time,
            vec![
                reading("Speed", format!("{:.1} mph", wind.speed)),
                reading("Direction", format!("{:.0}°", wind.direction)),
            ],
        ),
    }
}

fn precipitation_section(slot: &Projected<PrecipitationProjection>) -> SectionView {
    const TITLE: &str = "Rain Event";
    match slot {
        Projected::Absent => SectionView::empty(TITLE, "No rain event yet."),
        Projected::Fault(fault) => SectionView::fault(TITLE, &fault.error),
        Projected::Ready(evt) => SectionView::ready(
            TITLE,
            &evt.serial_number,
            "Rain started at",
            &evt.time,
            Vec::new(),
        ),
    }
}
