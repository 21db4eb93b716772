//! # Spoken Report Rendering
//!
//! This module turns condition reports and tide estimates into text for a
//! voice assistant. Output is plain sentences with embedded SSML
//! (`<break>`, `<emphasis>`, `<speak>`) for pacing.
//!
//! Rendering is pure string construction. The only nondeterminism is the
//! choice of farewell, which comes from a caller-supplied RNG so tests can
//! seed it.

use crate::conditions::ConditionReport;
use crate::tide_data::TideEstimate;
use crate::Measurement;
use rand::Rng;

/// Placeholder spoken in place of a missing reading
pub const MISSING_TEXT: &str = "missing";

/// Pause between the swell sentences
const BREAK: &str = r#"<break time=".5s"/>"#;

/// Sign-offs for a spot check
pub const SPOT_CHECK_FAREWELLS: [&str; 6] = [
    "Now get out there and have fun!",
    r#"<emphasis level="moderate">Now go have fun you kook!</emphasis>"#,
    "Hope you have a good time out there!",
    "Good luck and have fun!",
    "Go get 'em you kook.",
    "Now go splash around in the ocean you big kook.",
];

/// Sign-offs for a log entry with a poor rating
const CONSOLATIONS: [&str; 2] = [
    "Sounds rough. Did you at least maybe see some fish?",
    "Sounds tough. At least it was good exercise right?",
];

/// Ratings that count as a good session
const GOOD_RATINGS: [&str; 3] = ["fair", "good", "great"];

/// Abbreviations the speech engine reads badly, fixed after formatting
const SPOKEN_REPLACEMENTS: &[(&str, &str)] = &[(" kts", " knots")];

/// Round half away from zero to one decimal place. Never yields `-0.0`.
fn round_tenths(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn spoken(measurement: Option<&Measurement>) -> String {
    match measurement {
        Some(m) => m.to_string(),
        None => MISSING_TEXT.to_string(),
    }
}

/// Replace abbreviation artifacts with their spoken form.
pub fn normalize(text: &str) -> String {
    SPOKEN_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Wind, swell and wind-wave sentences for a condition report.
///
/// # Example
/// ```
/// use surf_report::conditions::ConditionReport;
/// use surf_report::renderer::render_conditions;
///
/// let text = render_conditions(&ConditionReport::new("46012"));
/// assert!(text.starts_with("The wind is coming from missing"));
/// ```
pub fn render_conditions(report: &ConditionReport) -> String {
    let text = format!(
        "The wind is coming from {} with speed {} and gusts up to {}. \
         The main swell is from {} and is {} at {}. {BREAK}\
         Secondary swell is from {} and is {} at {}. {BREAK}\
         Wave steepness is {}. ",
        spoken(report.wind_direction.as_ref()),
        spoken(report.wind_speed.as_ref()),
        spoken(report.wind_gust.as_ref()),
        spoken(report.swell_direction.as_ref()),
        spoken(report.swell_height.as_ref()),
        spoken(report.swell_period.as_ref()),
        spoken(report.wind_wave_direction.as_ref()),
        spoken(report.wind_wave_height.as_ref()),
        spoken(report.wind_wave_period.as_ref()),
        spoken(report.wave_steepness.as_ref()),
    );
    normalize(&text)
}

/// Tide height and trend, both rounded to a tenth of a foot.
///
/// The direction follows the rounded rate, so a rate that rounds to zero is
/// spoken as slack water going out.
pub fn render_tide(tide: &TideEstimate) -> String {
    let spoken = TideEstimate {
        height: round_tenths(tide.height),
        rate_of_change: round_tenths(tide.rate_of_change),
    };
    format!(
        "The tide is currently {:.1} feet and is {} at {:.1} feet per hour. ",
        spoken.height,
        spoken.direction(),
        spoken.rate_of_change.abs(),
    )
}

/// Full spot check: tide, conditions and a random farewell.
pub fn render_spot_report<R: Rng + ?Sized>(
    spot_name: &str,
    conditions: &ConditionReport,
    tide: &TideEstimate,
    rng: &mut R,
) -> String {
    format!(
        "Here's your report for {spot_name}. {} {} {}",
        render_tide(tide),
        render_conditions(conditions),
        pick(&SPOT_CHECK_FAREWELLS, rng),
    )
}

/// Sign-off for a freshly logged session.
pub fn log_entry_farewell<R: Rng + ?Sized>(rating: &str, notes: &str, rng: &mut R) -> String {
    if notes.contains(" fun ") {
        return "Glad you got to have some fun.".to_string();
    }
    if GOOD_RATINGS.contains(&rating) {
        return "Sounds like you had a good time!".to_string();
    }
    pick(&CONSOLATIONS, rng).to_string()
}

/// Confirmation spoken after a log entry is stored.
pub fn render_log_confirmation<R: Rng + ?Sized>(
    spot_name: &str,
    rating: &str,
    notes: &str,
    rng: &mut R,
) -> String {
    format!(
        "<speak>I've logged the entry for {spot_name}. {}</speak>",
        log_entry_farewell(rating, notes, rng)
    )
}
