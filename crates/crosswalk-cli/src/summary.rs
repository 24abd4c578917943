use console::Style;
use crosswalk_core::analysis::{AnalysisConfig, StripeAnalysis};
use crosswalk_core::geometry::OrientedBox;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            error: Style::new().red().bold(),
        }
    }
}

pub fn print_config_summary(config: &AnalysisConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Stripe Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!("  {}", s.header.apply_to("Settings"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Scan axis"),
        s.method.apply_to(config.axis)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(format!(
            "{} ({})",
            config.frequency_threshold, config.threshold_basis
        ))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Separation"),
        s.value.apply_to(format!("{} px", config.min_separation))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!("\u{00b1}{} px", config.window_radius))
    );
    println!();
}

pub fn print_region_report(index: Option<usize>, region: &OrientedBox, analysis: &StripeAnalysis) {
    let s = Styles::new();

    print_region_header(&s, index, region);
    println!(
        "    {:<14}{}",
        s.label.apply_to("Rectified"),
        s.value.apply_to(format!(
            "{}x{}",
            analysis.rectified.columns(),
            analysis.rectified.rows()
        ))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Cutoff"),
        s.value.apply_to(format!("{:.4} cycles/sample", analysis.effective_threshold))
    );

    let report = &analysis.report;
    if report.is_empty() {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Peaks"),
            s.disabled.apply_to("none")
        );
        println!();
        return;
    }

    println!(
        "    {:<14}{}",
        s.label.apply_to("Peaks"),
        s.value.apply_to(report.len())
    );
    match report.average_period {
        Some(period) => println!(
            "    {:<14}{}",
            s.label.apply_to("Period"),
            s.value.apply_to(format!("{period:.1} px"))
        ),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to("Period"),
            s.disabled.apply_to("single peak")
        ),
    }
    for (i, peak) in report.peaks.iter().enumerate() {
        println!(
            "      {}. {:<10}{}",
            s.label.apply_to(i + 1),
            s.value.apply_to(format!("@{}", peak.index)),
            s.method.apply_to(format!("{:.3}", peak.amplitude))
        );
    }
    println!();
}

pub fn print_region_error(index: Option<usize>, region: &OrientedBox, message: &str) {
    let s = Styles::new();

    print_region_header(&s, index, region);
    println!(
        "    {:<14}{}",
        s.label.apply_to("Error"),
        s.error.apply_to(message)
    );
    println!();
}

fn print_region_header(s: &Styles, index: Option<usize>, region: &OrientedBox) {
    let name = match index {
        Some(i) => format!("Box {}", i + 1),
        None => "Box".to_string(),
    };
    println!(
        "  {} {}",
        s.header.apply_to(name),
        s.label.apply_to(format!(
            "({:.1}, {:.1}) {:.0}x{:.0} @ {:.1}\u{00b0}",
            region.center_x,
            region.center_y,
            region.width,
            region.height,
            region.rotation_degrees()
        ))
    );
}
