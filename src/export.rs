//! Export adapter: draw a computed layout as SVG and write the match sheet as CSV.

use crate::logic::{Layout, LayoutNode};
use crate::models::{Bracket, Match, Side, TeamId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;

const FONT_SIZE: f64 = 14.0;
const TEXT_PADDING: f64 = 10.0;

fn team_label(names: &HashMap<TeamId, String>, team_id: Option<TeamId>) -> String {
    match team_id {
        Some(id) => names.get(&id).cloned().unwrap_or_else(|| format!("Team {}", id)),
        None => "TBD".to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_slot(svg: &mut String, node: &LayoutNode, m: &Match, side: Side, names: &HashMap<TeamId, String>) {
    let team_id = m.slot(side);
    let is_winner = team_id.is_some() && m.winner_team_id == team_id;
    let score = match side {
        Side::Home => m.home_score,
        Side::Away => m.away_score,
    };
    let y = node.slot_y(side) + FONT_SIZE / 3.0;
    let weight = if is_winner { "bold" } else { "normal" };
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" font-weight="{}">{}</text>"#,
        node.x + TEXT_PADDING,
        y,
        weight,
        escape_xml(&team_label(names, team_id)),
    );
    if let Some(score) = score {
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-weight="{}">{}</text>"#,
            node.right() - TEXT_PADDING,
            y,
            weight,
            score,
        );
    }
}

/// Render the bracket as a standalone SVG document.
pub fn render_svg(bracket: &Bracket, layout: &Layout, names: &HashMap<TeamId, String>) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.1}" height="{h:.1}" viewBox="0 0 {w:.1} {h:.1}" font-family="sans-serif" font-size="{fs}">"#,
        w = layout.width,
        h = layout.height,
        fs = FONT_SIZE,
    );
    for c in &layout.connectors {
        let points: Vec<String> = c
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect();
        let _ = writeln!(
            svg,
            r##"  <polyline points="{}" fill="none" stroke="#888" stroke-width="2"/>"##,
            points.join(" "),
        );
    }
    for node in &layout.nodes {
        let Some(m) = bracket.get(node.match_id) else {
            continue;
        };
        let fill = if m.is_decided() { "#eef6ee" } else { "#ffffff" };
        let _ = writeln!(
            svg,
            r##"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="{}" stroke="#333"/>"##,
            node.x, node.y, node.width, node.height, fill,
        );
        let _ = writeln!(
            svg,
            r##"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#ccc"/>"##,
            node.x,
            node.center_y(),
            node.right(),
            node.center_y(),
        );
        write_slot(&mut svg, node, m, Side::Home, names);
        write_slot(&mut svg, node, m, Side::Away, names);
    }
    svg.push_str("</svg>\n");
    svg
}

#[derive(Serialize)]
struct MatchRow<'a> {
    round: &'a str,
    match_number: u32,
    home: String,
    away: String,
    home_score: Option<u32>,
    away_score: Option<u32>,
    winner: String,
}

/// Write one CSV row per match, in round order.
pub fn write_matches_csv<W: Write>(
    bracket: &Bracket,
    names: &HashMap<TeamId, String>,
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for round in bracket.rounds() {
        let label = bracket.round_label(round.round_number);
        for m in round.matches {
            let winner = match m.winner_team_id {
                Some(id) => team_label(names, Some(id)),
                None => String::new(),
            };
            wtr.serialize(MatchRow {
                round: &label,
                match_number: m.match_number,
                home: team_label(names, m.home_team_id),
                away: team_label(names, m.away_team_id),
                home_score: m.home_score,
                away_score: m.away_score,
                winner,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
