use mcpanel_notify::NotificationMessage;
use mcpanel_notify::QueueSnapshot;
use mcpanel_notify::Severity;
use mcpanel_protocol::models::Instance;
use mcpanel_protocol::models::SystemInfo;
use mcpanel_protocol::models::User;
use owo_colors::OwoColorize;
use owo_colors::Style;

use crate::lang;

const MEMORY_UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Formats a KiB amount with the largest unit that keeps it above 1.
pub fn memory_unit_from_kib(kib: u64) -> String {
    if kib == 0 {
        return "0 KiB".to_string();
    }
    let mut value = kib as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < MEMORY_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.3} {}", MEMORY_UNITS[unit])
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Primary => Style::new().blue().bold(),
        Severity::Secondary => Style::new().dimmed(),
        Severity::Success => Style::new().green().bold(),
        Severity::Danger => Style::new().red().bold(),
        Severity::Warning => Style::new().yellow().bold(),
        Severity::Info => Style::new().cyan(),
        Severity::Light => Style::new().white(),
        Severity::Dark => Style::new().black(),
    }
}

pub fn stderr_supports_color() -> bool {
    supports_color::on_cached(supports_color::Stream::Stderr).is_some()
}

/// One line for a notification: `[severity] localised text`.
pub fn notification_line(message: &NotificationMessage, color: bool) -> String {
    let tag = format!("[{}]", message.severity);
    let tag = if color {
        tag.style(severity_style(message.severity)).to_string()
    } else {
        tag
    };
    format!("{tag} {}", lang::translate(&message.text))
}

/// The visible notification followed by whatever is still queued.
pub fn notification_lines(snapshot: &QueueSnapshot, color: bool) -> Vec<String> {
    snapshot
        .current
        .iter()
        .map(|shown| &shown.message)
        .chain(snapshot.backlog.iter())
        .map(|message| notification_line(message, color))
        .collect()
}

pub fn user_summary(user: &User) -> String {
    format!(
        "{} ({}), permissions: {}",
        user.name, user.username, user.permissions
    )
}

pub fn instance_details(instance: &Instance) -> Vec<String> {
    let config = &instance.config;
    let mut lines = vec![
        format!("name:        {}", instance.name),
        format!("type:        {}", instance.mod_type),
        format!("version:     {}", instance.version),
        format!("java:        {}", config.java),
        format!("max ram:     {} MiB", config.max_ram),
        format!("server file: {}", config.server_file),
    ];
    if !config.jvm_args.is_empty() {
        lines.push(format!("jvm args:    {}", config.jvm_args.join(" ")));
    }
    if !config.args.is_empty() {
        lines.push(format!("args:        {}", config.args.join(" ")));
    }
    lines
}

pub fn system_info_lines(info: &SystemInfo) -> Vec<String> {
    vec![
        format!("host:   {} ({} {})", info.hostname, info.os, info.arch),
        format!("cpus:   {} @ {} MHz", info.cpus, info.cpu_clock),
        format!(
            "load:   {:.2} {:.2} {:.2}",
            info.load_1, info.load_5, info.load_15
        ),
        format!(
            "memory: {} used / {} total ({} available)",
            memory_unit_from_kib(info.mem_used),
            memory_unit_from_kib(info.mem_total),
            memory_unit_from_kib(info.mem_avail)
        ),
        format!(
            "swap:   {} free / {} total",
            memory_unit_from_kib(info.swap_free),
            memory_unit_from_kib(info.swap_total)
        ),
    ]
}
