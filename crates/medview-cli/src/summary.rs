use console::Style;
use medview_core::overlay::OverlayGroup;
use medview_core::session::ViewerSession;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    kind: Style,
    empty: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            kind: Style::new().green(),
            empty: Style::new().dim().yellow(),
        }
    }
}

pub fn print_session_summary(session: &ViewerSession) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Session Summary"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    let transform = session.transform();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Slice"),
        s.value.apply_to(format!(
            "{}/{}",
            session.current_slice() + 1,
            session.slice_count()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.0}%", transform.scale * 100.0))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Rotation"),
        s.value.apply_to(format!("{}\u{b0}", transform.rotation_deg))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(session.window_level())
    );
    let cal = session.calibration();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Spacing"),
        s.value
            .apply_to(format!("{:.4} x {:.4} mm", cal.spacing_x, cal.spacing_y))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Annotations"),
        s.value
            .apply_to(session.overlays().group_len(OverlayGroup::Annotation))
    );
    println!();

    println!("  {}", s.header.apply_to("Measurements"));
    let records = session.records();
    if records.is_empty() {
        println!("    {}", s.empty.apply_to("none"));
    }
    for record in records {
        println!(
            "    {}{}",
            s.kind.apply_to(format!("{:<12}", record.kind)),
            s.value.apply_to(record.label_text()),
        );
    }
    println!();
}
