//! Boardroom report rendering

use clarity_domain::aggregation::AggregatedResult;
use clarity_domain::session::Session;
use std::fmt::Write;

/// Render the ranked report for a session
pub fn render(session: &Session, results: &[AggregatedResult]) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "+============================================================+");
    let _ = writeln!(out, "|           Vector Clarity - Boardroom Report                |");
    let _ = writeln!(out, "+============================================================+");
    let _ = writeln!(out);
    let _ = writeln!(out, "Session: {}", session.name);
    if !session.vision.is_empty() {
        let _ = writeln!(out, "Vision:  {}", session.vision);
    }
    let _ = writeln!(out);

    if results.is_empty() {
        let _ = writeln!(out, "No initiatives to report on.");
        return out;
    }

    let _ = writeln!(
        out,
        "  #  {:<28} {:>5}  {:>5}  {:>4} {:>4} {:>4} {:>4}",
        "Initiative", "Score", "Votes", "Imp", "Fea", "Urg", "Ali"
    );
    for (rank, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<28} {:>5}  {:>5}  {:>4.1} {:>4.1} {:>4.1} {:>4.1}",
            rank + 1,
            clip(&result.name, 28),
            result.vector_score,
            result.vote_count,
            result.avg_importance,
            result.avg_feasibility,
            result.avg_urgency,
            result.avg_alignment,
        );
    }

    let _ = writeln!(out);
    let top = &results[0];
    let _ = writeln!(out, "Top initiative: {} ({})", top.name, top.vector_score);
    let _ = writeln!(out, "Average vector score: {}/100", average_vector(results));

    out
}

/// Mean vector score across all initiatives, rounded
fn average_vector(results: &[AggregatedResult]) -> u32 {
    if results.is_empty() {
        return 0;
    }
    let sum: u32 = results.iter().map(|r| r.vector_score).sum();
    (sum as f64 / results.len() as f64).round() as u32
}

fn clip(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut clipped: String = name.chars().take(max - 1).collect();
        clipped.push('…');
        clipped
    }
}
