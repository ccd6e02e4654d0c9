use colored::{ColoredString, Colorize};

use crate::config::settings::PlayerSettings;
use crate::domain::{Player, WinEvent};
use crate::services::StatsReport;
use crate::stats::{Totals, TrendPoint};

/// Player name in the player's dashboard colour
pub fn player_label(names: &PlayerSettings, player: Player) -> ColoredString {
    let name = names.name(player);
    match player {
        Player::A => name.cyan().bold(),
        Player::B => name.magenta().bold(),
    }
}

pub fn format_totals(names: &PlayerSettings, totals: Totals) -> String {
    format!(
        "{}: {}  |  {}: {}",
        player_label(names, Player::A),
        totals.a,
        player_label(names, Player::B),
        totals.b
    )
}

pub fn print_recorded(names: &PlayerSettings, event: &WinEvent, totals: Totals) {
    println!(
        "{} {} ({:+}) at {}",
        "Recorded".green(),
        player_label(names, event.player),
        event.delta.value(),
        event.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("{}", format_totals(names, totals));
}

pub fn print_report(names: &PlayerSettings, report: &StatsReport) {
    println!("{}", report.headline.text.bold());
    println!("{}", format_totals(names, report.totals));
    println!(
        "Win rate: {} {:.1}%  {} {:.1}%  (total games: {})",
        player_label(names, Player::A),
        report.win_rate.a,
        player_label(names, Player::B),
        report.win_rate.b,
        report.win_rate.total_games
    );
    if let Some(lead) = report.leader {
        println!("{} is leading by {}!", player_label(names, lead.player), lead.margin);
    }

    println!();
    println!("{}", format!("Daily breakdown (last {} days)", report.window_days).bold());
    if report.daily_wins.is_empty() {
        println!("  {}", "No games recorded yet.".dimmed());
    }
    for day in &report.daily_wins {
        println!("  {}  {}", day.date, format_totals(names, day.totals));
    }

    println!();
    println!("{}", "Recent games".bold());
    for game in &report.recent_games {
        println!(
            "  {}  {}  {}",
            game.created_at.format("%b %e %H:%M"),
            player_label(names, game.player),
            game.label
        );
    }
}

pub fn print_trend(names: &PlayerSettings, trend: &[TrendPoint]) {
    if trend.is_empty() {
        println!("{}", "No data available yet.".dimmed());
        return;
    }
    for point in trend {
        println!(
            "{}  {}",
            point.timestamp.format("%Y-%m-%d %H:%M:%S"),
            format_totals(names, point.totals())
        );
    }
}
