use std::fmt::Display;

use hundate::{Duration, ExtractionDetails, FrequencyMatch, RuleHit, SpannedInterval};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub use ansi::Palette;

fn side<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "…".to_string(), ToString::to_string)
}

/// One line per interval: bounds, character span and matched text.
pub fn print_intervals<T: Display>(intervals: &[SpannedInterval<T>], palette: &Palette) {
    if intervals.is_empty() {
        println!("{}", palette.dim("no match"));
        return;
    }
    for (idx, interval) in intervals.iter().enumerate() {
        println!(
            "{} {} {} {}  {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(side(&interval.start_date), ansi::GREEN)),
            palette.dim("→"),
            palette.bold(palette.paint(side(&interval.end_date), ansi::GREEN)),
            palette.paint(format!("{}..{}", interval.span.start, interval.span.end), ansi::YELLOW),
            palette.dim(format!("{:?}", interval.span.text)),
        );
    }
}

/// Full trace of a `text2datetime_verbose` run.
pub fn print_details(details: &ExtractionDetails, palette: &Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", details.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Active rules ━━━", ansi::GRAY));
    if details.active_rules.is_empty() {
        println!("  {}", palette.dim("none (no bucket or key phrase matched)"));
    } else {
        println!("  {}", palette.paint(details.active_rules.join(", "), ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Segments ━━━", ansi::GRAY));
    if details.segments.is_empty() {
        println!("  {}", palette.dim("No segment produced a match"));
    }
    for segment in &details.segments {
        println!(
            "  {} {} {}",
            palette.paint(segment.form, ansi::BLUE),
            palette.dim(format!("{:?}", segment.text)),
            if segment.kept { palette.paint("✓", ansi::GREEN) } else { palette.dim("✗ dropped") }
        );
        print_hits("start", segment.start_hits.as_deref(), palette);
        print_hits("end", segment.end_hits.as_deref(), palette);
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    print_intervals(&details.intervals, palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", details.elapsed), ansi::GREEN));
    println!();
}

fn print_hits(label: &str, hits: Option<&[RuleHit]>, palette: &Palette) {
    let Some(hits) = hits else {
        println!("    {} {}", palette.dim(format!("{label}:")), palette.dim("open"));
        return;
    };
    for hit in hits {
        let fragments: Vec<String> = hit
            .fragments
            .iter()
            .map(|f| match f.value {
                Some(value) => format!("{:?}({value})", f.kind),
                None => format!("{:?}", f.kind),
            })
            .collect();
        println!(
            "    {} {} {} {}",
            palette.dim(format!("{label}:")),
            palette.paint(hit.rule, ansi::CYAN),
            palette.dim(format!("{:?}", hit.text)),
            fragments.join(" "),
        );
    }
}

pub fn print_duration(duration: Option<&Duration>, palette: &Palette) {
    match duration {
        Some(d) => println!(
            "{} {}  {}",
            palette.bold(palette.paint(format!("{} min", d.minutes), ansi::GREEN)),
            palette.dim(format!("({} {:?})", d.value, d.unit)),
            palette.paint(format!("preferred: {:?}", d.preferred_unit), ansi::BLUE),
        ),
        None => println!("{}", palette.dim("no match")),
    }
}

pub fn print_frequency(found: Option<&FrequencyMatch>, palette: &Palette) {
    match found {
        Some(m) => println!(
            "{}  {}",
            palette.bold(palette.paint(format!("{:?}", m.frequency), ansi::GREEN)),
            palette.paint(format!("{}..{}", m.start, m.end), ansi::YELLOW),
        ),
        None => println!("{}", palette.dim("no match")),
    }
}
