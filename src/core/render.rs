use crate::domain::model::EstimateResult;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_THOUSANDS_SEPARATOR: char = '.';
const FOOTNOTE: &str = "Include 1 vizită anuală și raport scurt";

/// 以千分位分隔整數，例如 `5786` → `5.786`
pub fn format_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub headline: String,
    pub details: String,
    pub footnote: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        writeln!(f, "{}", self.details)?;
        write!(f, "{}", self.footnote)
    }
}

/// 面積的顯示方式與頁面相同：1e21 以上或 1e-6 以下改用指數表示（`1e+21`）
fn format_area(area: f64) -> String {
    if (1e-6..1e21).contains(&area) {
        return area.to_string();
    }

    let scientific = format!("{:e}", area);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
        _ => scientific,
    }
}

pub fn render_summary(result: &EstimateResult, separator: char) -> Summary {
    let area = if result.area_square_meters > 0.0 {
        format!("{} mp", format_area(result.area_square_meters))
    } else {
        "Suprafață standard".to_string()
    };

    let mut details = format!("{} • {}", result.building_type.label(), area);
    if result.include_instrumentation {
        details.push_str(" • Cu instrumentare");
    }

    Summary {
        headline: format!("~ {} lei/an + TVA", format_thousands(result.total_fee, separator)),
        details,
        footnote: FOOTNOTE.to_string(),
    }
}
