use colored::*;
use terminal_size::{Width, Height, terminal_size};

fn rule() -> String {
    let (width, _) = terminal_size().unwrap_or((Width(80), Height(24)));
    "─".repeat(width.0 as usize)
}

pub fn print_sleuth_header(model: &str, base_url: &str) {
    let line = rule();
    println!("{}", line.black().bold());

    // Logo + Name
    let logo = "🔍";
    let name = "Sleuth".yellow().bold();
    let version = format!("v{}", env!("CARGO_PKG_VERSION")).black().bold();

    println!("  {} {} {}", logo, name, version);

    // Model + Backend Info
    let info = format!("  {}  •  {}", model, base_url).cyan();
    println!("{}", info);

    println!("{}", line.black().bold());
}

pub fn print_report(report: &str, complete: bool) {
    let line = "=".repeat(50);
    println!("\n{}", line);
    println!("📋 {}", "RESEARCH REPORT".bold());
    println!("{}", line);
    if complete {
        println!("{}", report);
    } else {
        println!("{}", report.yellow());
    }
}

pub fn print_step(msg: &str) {
    println!("  {} {}", "•".green(), msg);
}

pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠️ ".yellow().bold(), msg.yellow());
}

pub fn print_error(msg: &str) {
    println!("  {} {}", "❌".red().bold(), msg.red());
}

pub fn print_thinking(msg: &str) {
    println!("  {} {}...", "∴".magenta(), msg);
}
