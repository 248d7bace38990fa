use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::terminal::colors;
use colored::*;
use knock_common::logging::PRINT_TARGET;
use knock_common::services::MANUAL_CONFIRMATION;
use knock_core::report::OpenPort;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

static DECORATED: AtomicBool = AtomicBool::new(false);

/// Decides once whether stdout gets colours, separators and the banner.
pub fn initialize() {
    let decorated: bool = console::Term::stdout().is_term();
    DECORATED.store(decorated, Ordering::Relaxed);
    if !decorated {
        colored::control::set_override(false);
    }
}

pub fn is_decorated() -> bool {
    DECORATED.load(Ordering::Relaxed)
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

const BANNER: &str = r#"
            _                     _
           | | ___ __   ___   ___| | __
           | |/ / '_ \ / _ \ / __| |/ /
           |   <| | | | (_) | (__|   <
           |_|\_\_| |_|\___/ \___|_|\_\
"#;

pub fn banner(no_banner: bool) {
    if no_banner || !is_decorated() {
        return;
    }

    let text_content: String = format!("⟦ KNOCK v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.color(colors::PRIMARY).bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .color(colors::SEPARATOR);

    print(&format!("{}", BANNER.color(colors::PRIMARY)));
    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str) {
    if !is_decorated() {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    if !is_decorated() {
        return;
    }
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn centerln(msg: &str) {
    if !is_decorated() {
        return;
    }
    let width: usize = console::measure_text_width(msg);
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

/// `port<TAB>service`, coloured only when stdout is a terminal.
pub fn open_port(open_port: &OpenPort) {
    let service_color: Color = if open_port.service == MANUAL_CONFIRMATION {
        colors::UNCONFIRMED_SERVICE
    } else {
        colors::SERVICE
    };
    print(&format!(
        "{}\t{}",
        open_port.port.to_string().color(colors::PORT).bold(),
        open_port.service.color(service_color)
    ));
}

pub fn ip(ip: IpAddr) -> ColoredString {
    match ip {
        IpAddr::V4(v4) => v4.to_string().color(colors::IPV4_ADDR),
        IpAddr::V6(v6) => v6.to_string().color(colors::IPV6_ADDR),
    }
}

pub fn count(n: usize) -> ColoredString {
    n.to_string().color(colors::ACCENT).bold()
}

const NO_RESULTS: &str = r#"
         _   _  ___     ___  ____  _____ _   _
        | \ | |/ _ \   / _ \|  _ \| ____| \ | |
        |  \| | | | | | | | | |_) |  _| |  \| |
        | |\  | |_| | | |_| |  __/| |___| |\  |
        |_| \_|\___/   \___/|_|   |_____|_| \_|
"#;

pub fn no_results() {
    if !is_decorated() {
        return;
    }
    print(&format!("{}", NO_RESULTS.red().bold()));
}
