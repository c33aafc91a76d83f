use std::path::Path;

use console::Style;
use smudge_core::compare::CompareReport;
use smudge_core::config::{DatasetConfig, DegradeParams};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
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
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_degrade_summary(config: &DatasetConfig, seed: u64, title: &str) {
    let s = Styles::new();

    print_title(&s, title);
    print_roots(&s, config, seed);
    print_degrade_section(&s, &config.degrade);
}

pub fn print_generate_summary(config: &DatasetConfig, source: &Path, seed: u64) {
    let s = Styles::new();

    print_title(&s, "Dataset Generation");
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(source.display())
    );
    print_roots(&s, config, seed);

    // Extraction
    println!("  {}", s.header.apply_to("Extraction"));
    if config.extract.every_frame {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Rate"),
            s.value.apply_to("every frame")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Rate"),
            s.value.apply_to(format!("{} fps", config.extract.fps))
        );
    }
    println!();

    print_degrade_section(&s, &config.degrade);
}

pub fn print_compare_summary(report: &CompareReport, worst: usize) {
    let s = Styles::new();

    print_title(&s, "Fidelity Report");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Pairs"),
        s.value.apply_to(report.pairs.len())
    );
    if report.skipped > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.disabled.apply_to(report.skipped)
        );
    }

    match (report.mean_psnr(), report.mean_ssim()) {
        (Some(psnr), Some(ssim)) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Mean PSNR"),
                s.value.apply_to(format_psnr(psnr))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Mean SSIM"),
                s.value.apply_to(format!("{ssim:.4}"))
            );
        }
        _ => {
            println!("  {}", s.disabled.apply_to("No valid pairs to score"));
        }
    }
    println!();

    if worst > 0 && !report.pairs.is_empty() {
        let mut pairs: Vec<_> = report.pairs.iter().collect();
        pairs.sort_by(|a, b| a.psnr.total_cmp(&b.psnr));

        println!("  {}", s.header.apply_to("Worst Pairs"));
        for pair in pairs.iter().take(worst) {
            println!(
                "    {}  {}  {}",
                s.value.apply_to(format!("{:<32}", pair.rel_path.display())),
                s.method.apply_to(format!("{:>9}", format_psnr(pair.psnr))),
                s.method.apply_to(format!("{:>7.4}", pair.ssim))
            );
        }
        println!();
    }
}

fn print_roots(s: &Styles, config: &DatasetConfig, seed: u64) {
    println!(
        "  {:<14}{}",
        s.label.apply_to("Target"),
        s.path.apply_to(config.target_root.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input_root.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Categories"),
        s.value.apply_to(config.categories.join(", "))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Seed"),
        s.value.apply_to(seed)
    );
    println!();
}

fn print_degrade_section(s: &Styles, params: &DegradeParams) {
    println!("  {}", s.header.apply_to("Degradation"));
    match params.mode {
        Some(mode) => println!(
            "    {:<12}{}",
            s.label.apply_to("Mode"),
            s.method.apply_to(mode)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Mode"),
            s.method.apply_to("random per item")
        ),
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Sigma"),
        s.value.apply_to(params.sigma)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Quality"),
        s.value.apply_to(params.quality)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Brightness"),
        s.value.apply_to(params.brightness)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Contrast"),
        s.value.apply_to(params.contrast)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Patches"),
        s.value.apply_to(params.patch_count)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Patch Size"),
        s.value.apply_to(params.patch_size)
    );
    println!();
}

fn format_psnr(psnr: f64) -> String {
    if psnr.is_finite() {
        format!("{psnr:.2} dB")
    } else {
        "inf".to_string()
    }
}
