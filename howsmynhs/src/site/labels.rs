//! Display helpers for trust names, URLs and headline numbers.

/// Words dropped from chart legends.
const FILLER_WORDS: [&str; 7] = [
    "Trust",
    "Foundation",
    "NHS",
    "University",
    "Hospital",
    "Hospitals",
    "Of",
];

/// Short legend label for a trust: the name without filler words.
///
/// ```
/// use howsmynhs::labels::short_label;
///
/// assert_eq!(short_label("Bedford Hospital NHS Trust"), "Bedford");
/// ```
#[must_use]
pub fn short_label(name: &str) -> String {
    name.split(' ')
        .filter(|w| !w.is_empty() && !FILLER_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// URL-safe form of a trust name: lowercase, spaces to `-`, commas removed.
#[must_use]
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(' ')
        .collect::<Vec<_>>()
        .join("-")
        .replace(',', "")
}

/// Site-relative URL of a trust page.
#[must_use]
pub fn page_url(name: &str) -> String {
    format!("hospitals/{}.html", slug(name))
}

/// File name of one of a trust's figures, e.g. `bedford-hospital-nhs-trust-beds.svg`.
#[must_use]
pub fn figure_name(name: &str, kind: &str, ext: &str) -> String {
    format!("{}-{kind}.{ext}", slug(name)).replace(',', "")
}

/// Headline form of a count.
///
/// Values above 100 are rounded to the nearest hundred (ties to even) and
/// printed with thousands separators; anything else is printed as is.
#[must_use]
pub fn format_number(num: f64) -> String {
    if num > 100.0 {
        #[allow(clippy::cast_possible_truncation)]
        let hundreds = (num / 100.0).round_ties_even() as i64;
        group_thousands(hundreds * 100)
    } else {
        num.to_string()
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_figures_share_the_slug() {
        let name = "Guy's And St Thomas', NHS Foundation Trust";
        assert_eq!(slug(name), "guy's-and-st-thomas'-nhs-foundation-trust");
        assert_eq!(
            page_url(name),
            "hospitals/guy's-and-st-thomas'-nhs-foundation-trust.html"
        );
        assert_eq!(
            figure_name("Bedford Hospital NHS Trust", "waiting", "svg"),
            "bedford-hospital-nhs-trust-waiting.svg"
        );
    }

    #[test]
    fn short_label_drops_filler() {
        assert_eq!(
            short_label("University Hospital Of South Manchester NHS Foundation Trust"),
            "South Manchester"
        );
        assert_eq!(short_label("England"), "England");
    }

    #[test]
    fn numbers_round_to_hundreds_above_one_hundred() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(149.0), "100");
        assert_eq!(format_number(250.0), "200");
        assert_eq!(format_number(1_234_567.0), "1,234,600");
        assert_eq!(format_number(-5000.0), "-5000");
    }
}
