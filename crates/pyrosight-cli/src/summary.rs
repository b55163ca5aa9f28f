use console::Style;
use pyrosight_core::aim::GimbalCommand;
use pyrosight_core::config::PyroConfig;
use pyrosight_core::pipeline::FrameReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    target: Style,
    hold: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            target: Style::new().green(),
            hold: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(config: &PyroConfig, frame_count: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("PyroSight"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frame_count)
    );
    println!();

    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(format!("{:.1} \u{b0}C", config.detection.temperature_threshold))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(format!("{} px", config.detection.min_area_pixels))
    );
    println!();

    println!("  {}", s.header.apply_to("Grouping"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Plane"),
        s.value.apply_to(format!("{:.2} m", config.projection.plane_distance))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Distance"),
        s.value.apply_to(format!("{:.2} m", config.grouping.max_grouping_distance))
    );
    println!();

    println!("  {}", s.header.apply_to("Aiming"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("FOV"),
        s.value.apply_to(format!(
            "{:.1}\u{b0} x {:.1}\u{b0}",
            config.camera.hfov_degrees, config.camera.vfov_degrees
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Nozzle"),
        s.value.apply_to(format!(
            "az {:+.2}\u{b0}, pitch {:+.2}\u{b0}",
            config.gimbal.nozzle_offset.azimuth_degrees, config.gimbal.nozzle_offset.pitch_degrees
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Polarity"),
        s.value.apply_to(config.gimbal.pitch_polarity)
    );
    println!();
}

/// Human-readable block for one processed frame.
pub fn format_frame_report(report: &FrameReport, name: &str) -> String {
    let s = Styles::new();
    let mut lines = vec![format!(
        "{} {}  ({} hotspots, {} targets)",
        s.label.apply_to(format!("#{}", report.frame_index)),
        s.path.apply_to(name),
        report.hotspots.len(),
        report.targets.len()
    )];

    for (rank, target) in report.targets.iter().enumerate() {
        lines.push(format!(
            "    T{:<3}({:>7.2}, {:>7.2})  severity {:>10.0}  hotspots {:?}",
            rank + 1,
            target.aim_pixel_point.x,
            target.aim_pixel_point.y,
            target.severity,
            target.member_hotspot_ids
        ));
    }

    match report.command {
        Some(GimbalCommand::Actuate(angles)) => {
            lines.push(format!("    {}", s.target.apply_to(format!("Command -> {angles}"))));
        }
        Some(GimbalCommand::Hold(angles)) => {
            lines.push(format!("    {}", s.hold.apply_to(format!("Holding {angles}"))));
        }
        None => lines.push(format!("    {}", s.hold.apply_to("No spray targets"))),
    }

    lines.join("\n")
}
