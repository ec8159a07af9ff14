//! Thai land-unit conversion and display formatting
//!
//! 1 rai = 4 ngan = 400 square wa = 1600 m²

pub const SQM_PER_RAI: f64 = 1600.0;
pub const SQM_PER_NGAN: f64 = 400.0;
pub const SQM_PER_WA: f64 = 4.0;

/// An area split into whole rai, whole ngan and fractional square wa
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThaiArea {
    pub rai: u64,
    pub ngan: u64,
    pub wa: f64,
}

impl ThaiArea {
    /// Decompose square meters into rai / ngan / wa.
    ///
    /// Negative, NaN and infinite inputs all decompose to zero.
    pub fn from_sqm(area_sqm: f64) -> Self {
        let sqm = sanitize(area_sqm);

        let rai = (sqm / SQM_PER_RAI).floor();
        let after_rai = sqm % SQM_PER_RAI;
        let ngan = (after_rai / SQM_PER_NGAN).floor();
        let after_ngan = after_rai % SQM_PER_NGAN;

        Self {
            rai: rai as u64,
            ngan: ngan as u64,
            wa: after_ngan / SQM_PER_WA,
        }
    }
}

impl std::fmt::Display for ThaiArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ไร่ {} งาน {:.2} ตร.ว.", self.rai, self.ngan, self.wa)
    }
}

/// Render square meters as `"<rai> ไร่ <ngan> งาน <wa> ตร.ว."`
pub fn format_as_thai_units(area_sqm: f64) -> String {
    ThaiArea::from_sqm(area_sqm).to_string()
}

/// Area in rai with two decimals, for advisory prompt text
pub fn to_rai(area_sqm: f64) -> String {
    format!("{:.2}", sanitize(area_sqm) / SQM_PER_RAI)
}

/// Whole litres with comma thousands separators, e.g. `12,365`
pub fn format_liters(liters: f64) -> String {
    let whole = sanitize(liters).round() as u64;
    let digits = whole.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
