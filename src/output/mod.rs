use crate::error::{Error, Result};
use crate::planner::{PlanOutcome, TravelOption};
use askama::Template;
use chrono::Utc;

#[derive(Template)]
#[template(path = "travel_planner.html")]
struct TravelPlannerPage {
    source: String,
    destination: String,
    form_enabled: bool,
    banner: Option<BannerView>,
    raw_text: Option<String>,
    options: Vec<OptionView>,
    model_label: String,
    generated_at: String,
}

#[allow(dead_code)] // fields used by Askama template
struct BannerView {
    class: &'static str,
    message: String,
}

#[allow(dead_code)] // fields used by Askama template
struct OptionView {
    mode: String,
    cost: String,
    duration: String,
}

/// What goes under the form.
#[derive(Debug)]
pub enum PageBody {
    /// Nothing submitted yet.
    Empty,
    /// The session cannot plan at all; the form stays inert.
    Unavailable(String),
    Warning(String),
    Failed(String),
    Plan(PlanOutcome),
}

/// Values echoed back into the form inputs.
#[derive(Debug, Default, Clone)]
pub struct FormValues {
    pub source: String,
    pub destination: String,
}

pub fn render_page(form: &FormValues, body: PageBody, model_label: &str) -> Result<String> {
    let mut page = TravelPlannerPage {
        source: form.source.clone(),
        destination: form.destination.clone(),
        form_enabled: true,
        banner: None,
        raw_text: None,
        options: Vec::new(),
        model_label: model_label.to_string(),
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
    };

    match body {
        PageBody::Empty => {}
        PageBody::Unavailable(message) => {
            page.form_enabled = false;
            page.banner = Some(error_banner(message));
        }
        PageBody::Warning(message) => page.banner = Some(warning_banner(message)),
        PageBody::Failed(message) => {
            page.banner = Some(error_banner(format!("An error occurred: {message}")))
        }
        PageBody::Plan(PlanOutcome::Raw { text }) => {
            page.banner = Some(warning_banner("Displaying output:".into()));
            page.raw_text = Some(text);
        }
        PageBody::Plan(PlanOutcome::Options { options }) => {
            page.options = options.iter().map(option_to_view).collect();
        }
    }

    page.render()
        .map_err(|e| Error::template(format!("render travel planner page: {e}")))
}

fn error_banner(message: String) -> BannerView {
    BannerView {
        class: "banner-error",
        message,
    }
}

fn warning_banner(message: String) -> BannerView {
    BannerView {
        class: "banner-warning",
        message,
    }
}

fn option_to_view(o: &TravelOption) -> OptionView {
    OptionView {
        mode: o.travel_mode.clone(),
        cost: format_cost(&o.estimated_cost),
        duration: format_duration(&o.duration),
    }
}

/// Bare amounts are USD; anything already carrying a symbol or words is left alone.
fn format_cost(cost: &str) -> String {
    if cost.starts_with(|c: char| c.is_ascii_digit()) {
        format!("${cost}")
    } else {
        cost.to_string()
    }
}

/// Unitless durations are hours.
fn format_duration(duration: &str) -> String {
    if !duration.is_empty() && !duration.chars().any(char::is_alphabetic) {
        format!("{duration} hours")
    } else {
        duration.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_gets_dollar_only_when_bare() {
        assert_eq!(format_cost("25"), "$25");
        assert_eq!(format_cost("25-40"), "$25-40");
        assert_eq!(format_cost("$25"), "$25");
        assert_eq!(format_cost("₹2000"), "₹2000");
        assert_eq!(format_cost("about 30 USD"), "about 30 USD");
    }

    #[test]
    fn duration_gets_hours_only_when_unitless() {
        assert_eq!(format_duration("3"), "3 hours");
        assert_eq!(format_duration("2.5-3"), "2.5-3 hours");
        assert_eq!(format_duration("45 minutes"), "45 minutes");
        assert_eq!(format_duration(""), "");
    }
}
