// Rendering of the registry state, as text or JSON.

use std::io::Write;

use serde_json::json;
use serde_json::Value as JSValue;

use crate::menu::*;

pub fn write_listing<W: Write>(out: &mut W, listing: Listing<'_>) -> MenuResult<()> {
    writeln!(out, "Candidates:").context(WritingOutputSnafu {})?;
    for entry in listing {
        writeln!(out, "  {}) {} (votes: {})", entry.index, entry.name, entry.votes)
            .context(WritingOutputSnafu {})?;
    }
    Ok(())
}

pub fn write_results<W: Write>(out: &mut W, report: &ResultsReport) -> MenuResult<()> {
    writeln!(out, "Results:").context(WritingOutputSnafu {})?;
    for r in report.results.iter() {
        writeln!(out, "  {}: {} votes ({:.2}%)", r.name, r.votes, r.percentage)
            .context(WritingOutputSnafu {})?;
    }

    // Everybody ties at 0, which is not worth announcing.
    if report.no_votes_cast() {
        writeln!(out, "No votes cast yet.").context(WritingOutputSnafu {})?;
        return Ok(());
    }

    writeln!(out, "Winner(s):").context(WritingOutputSnafu {})?;
    for w in report.winners.iter() {
        writeln!(out, "  {}", w.name).context(WritingOutputSnafu {})?;
    }
    Ok(())
}

pub fn results_to_json(report: &ResultsReport) -> JSValue {
    let results: Vec<JSValue> = report
        .results
        .iter()
        .map(|r| {
            json!({
                "index": r.index,
                "name": r.name,
                "votes": r.votes,
                "percentage": format!("{:.2}", r.percentage)
            })
        })
        .collect();
    let winners: Vec<&str> = report.winners.iter().map(|w| w.name.as_str()).collect();
    json!({
        "total": report.total,
        "noVotesCast": report.no_votes_cast(),
        "results": results,
        "winners": winners
    })
}
