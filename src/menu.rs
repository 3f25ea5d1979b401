use log::{debug, info};

use snafu::{prelude::*, Snafu};
use vote_registry::*;

use std::io::{BufRead, Write};

use crate::args::Args;
use crate::menu::config_reader::*;
use crate::menu::display::*;

pub mod config_reader;
mod display;

#[derive(Debug, Snafu)]
pub enum MenuError {
    #[snafu(display("Error reading the input"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("Error writing the output"))]
    WritingOutput { source: std::io::Error },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error rendering the results"))]
    RenderingJson { source: serde_json::Error },
    #[snafu(display("Candidate {name:?} could not be registered: {source}"))]
    PreRegistering {
        source: RegistryError,
        name: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type MenuResult<T> = Result<T, MenuError>;

const MENU: &str = "\n--- Interactive Voting System ---\n\
1) Add candidate\n\
2) List candidates\n\
3) Cast vote\n\
4) Show results\n\
5) Reset election\n\
0) Exit\n";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum MenuOption {
    AddCandidate,
    ListCandidates,
    CastVote,
    ShowResults,
    ResetElection,
    Exit,
}

impl MenuOption {
    /// Only the leading number of the line matters. Lines without one are not an option.
    fn parse(line: &str) -> Option<MenuOption> {
        match leading_int(line)? {
            1 => Some(MenuOption::AddCandidate),
            2 => Some(MenuOption::ListCandidates),
            3 => Some(MenuOption::CastVote),
            4 => Some(MenuOption::ShowResults),
            5 => Some(MenuOption::ResetElection),
            0 => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Reads the integer at the start of the line: leading whitespace, an optional sign and
/// as many digits as possible. Whatever follows is ignored. Saturates on overflow.
fn leading_int(line: &str) -> Option<i64> {
    let s = line.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: Vec<i64> = digits
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| (b - b'0') as i64)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.iter().fold(0i64, |acc, d| {
        if negative {
            acc.saturating_mul(10).saturating_sub(*d)
        } else {
            acc.saturating_mul(10).saturating_add(*d)
        }
    });
    Some(value)
}

/// One interactive session: a registry driven by lines read from `input`.
pub struct Session<R, W> {
    registry: Registry,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(registry: Registry, input: R, output: W, json: bool) -> Session<R, W> {
        Session {
            registry,
            input,
            output,
            json,
        }
    }

    /// Runs the menu until the exit option or the end of the input.
    pub fn run(&mut self) -> MenuResult<()> {
        loop {
            self.prompt(MENU)?;
            self.prompt("Select option: ")?;
            let line = match self.read_line()? {
                Some(l) => l,
                None => {
                    info!("End of input, stopping");
                    return Ok(());
                }
            };
            let option = MenuOption::parse(&line);
            debug!("run: line: {:?} option: {:?}", line, option);
            match option {
                Some(MenuOption::AddCandidate) => self.add_candidate()?,
                Some(MenuOption::ListCandidates) => self.list_candidates()?,
                Some(MenuOption::CastVote) => self.cast_vote()?,
                Some(MenuOption::ShowResults) => self.show_results()?,
                Some(MenuOption::ResetElection) => self.reset_election()?,
                Some(MenuOption::Exit) => {
                    self.say("Exiting.")?;
                    return Ok(());
                }
                None => self.say("Invalid option.")?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Registry, W) {
        (self.registry, self.output)
    }

    fn add_candidate(&mut self) -> MenuResult<()> {
        // The capacity is checked before asking for a name.
        if self.registry.is_full() {
            let e = RegistryError::RegistryFull {
                capacity: self.registry.rules().capacity,
            };
            return self.say(&e.to_string());
        }
        self.prompt("Enter candidate name: ")?;
        let line = match self.read_line()? {
            Some(l) => l,
            None => return Ok(()),
        };
        match self.registry.add_candidate(&line) {
            Ok(index) => {
                let name = self
                    .registry
                    .candidate(index)
                    .map(|c| c.name.to_string())
                    .unwrap_or_default();
                self.say(&format!("Candidate added: {}", name))
            }
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn list_candidates(&mut self) -> MenuResult<()> {
        match self.registry.list_candidates() {
            Ok(listing) => write_listing(&mut self.output, listing),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn cast_vote(&mut self) -> MenuResult<()> {
        if self.registry.is_empty() {
            return self.say("No candidates to vote for. Add candidates first.");
        }
        self.list_candidates()?;
        self.prompt("Enter candidate number to vote for (or 0 to cancel): ")?;
        let line = match self.read_line()? {
            Some(l) => l,
            None => return Ok(()),
        };
        // Anything that is not a number cancels the vote.
        let choice = leading_int(&line).unwrap_or(0);
        match self.registry.cast_vote(choice) {
            Ok(VoteOutcome::Cast { name, .. }) => self.say(&format!("Vote cast for {}", name)),
            Ok(VoteOutcome::Cancelled) => self.say("Vote cancelled."),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn show_results(&mut self) -> MenuResult<()> {
        let report = match self.registry.compute_results() {
            Ok(r) => r,
            Err(e) => return self.say(&e.to_string()),
        };
        if self.json {
            let js = results_to_json(&report);
            let pretty = serde_json::to_string_pretty(&js).context(RenderingJsonSnafu {})?;
            self.say(&pretty)
        } else {
            write_results(&mut self.output, &report)
        }
    }

    fn reset_election(&mut self) -> MenuResult<()> {
        self.registry.reset_election();
        self.say("Election reset. All candidates removed.")
    }

    /// None at the end of the input.
    fn read_line(&mut self) -> MenuResult<Option<String>> {
        let mut buf: Vec<u8> = Vec::new();
        let n = self
            .input
            .read_until(b'\n', &mut buf)
            .context(ReadingInputSnafu {})?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn prompt(&mut self, text: &str) -> MenuResult<()> {
        write!(self.output, "{}", text).context(WritingOutputSnafu {})?;
        self.output.flush().context(WritingOutputSnafu {})
    }

    fn say(&mut self, text: &str) -> MenuResult<()> {
        writeln!(self.output, "{}", text).context(WritingOutputSnafu {})
    }
}

/// Builds the registry described by the arguments and runs the menu on it.
pub fn run_session<R: BufRead, W: Write>(args: &Args, input: R, output: W) -> MenuResult<()> {
    let settings = load_settings(args)?;
    info!("settings: {:?}", settings);
    let registry = settings.build_registry()?;
    Session::new(registry, input, output, args.json).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script_on(registry: Registry, script: &str, json: bool) -> (Registry, String) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut session = Session::new(registry, Cursor::new(script.as_bytes()), Vec::new(), json);
        session.run().unwrap();
        let (registry, out) = session.into_parts();
        (registry, String::from_utf8(out).unwrap())
    }

    fn run_script(script: &str) -> (Registry, String) {
        run_script_on(Registry::default(), script, false)
    }

    #[test]
    fn leading_int_is_permissive() {
        assert_eq!(leading_int("3\n"), Some(3));
        assert_eq!(leading_int("  12abc"), Some(12));
        assert_eq!(leading_int("-4"), Some(-4));
        assert_eq!(leading_int("+7 "), Some(7));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(leading_int("-99999999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn menu_options() {
        assert_eq!(MenuOption::parse("1\n"), Some(MenuOption::AddCandidate));
        assert_eq!(MenuOption::parse(" 4"), Some(MenuOption::ShowResults));
        assert_eq!(MenuOption::parse("0"), Some(MenuOption::Exit));
        assert_eq!(MenuOption::parse("6"), None);
        assert_eq!(MenuOption::parse("-1"), None);
        assert_eq!(MenuOption::parse("x"), None);
        assert_eq!(MenuOption::parse("\n"), None);
    }

    #[test]
    fn full_election() {
        let (registry, out) = run_script("1\nAlice\n1\nBob\n3\n1\n3\n1\n3\n2\n4\n0\n");
        assert_eq!(registry.len(), 2);
        assert!(out.contains("Candidate added: Alice\n"));
        assert!(out.contains("Candidate added: Bob\n"));
        assert!(out.contains("  1) Alice (votes: 0)\n"));
        assert!(out.contains("Vote cast for Bob\n"));
        assert!(out.contains(
            "Results:\n  Alice: 2 votes (66.67%)\n  Bob: 1 votes (33.33%)\nWinner(s):\n  Alice\n"
        ));
        assert!(out.ends_with("Exiting.\n"));
    }

    #[test]
    fn end_of_input_stops_quietly() {
        let (_, out) = run_script("2\n");
        assert!(out.contains("No candidates registered.\n"));
        assert!(!out.contains("Exiting."));
        assert!(out.ends_with("Select option: "));
    }

    #[test]
    fn end_of_input_in_prompt() {
        let (registry, out) = run_script("1\n");
        assert!(registry.is_empty());
        assert!(out.ends_with("Enter candidate name: \n--- Interactive Voting System ---\n1) Add candidate\n2) List candidates\n3) Cast vote\n4) Show results\n5) Reset election\n0) Exit\nSelect option: "));
    }

    #[test]
    fn invalid_options_redisplay_the_menu() {
        let (_, out) = run_script("9\nhello\n\n0\n");
        assert_eq!(out.matches("Invalid option.\n").count(), 3);
        assert_eq!(out.matches("--- Interactive Voting System ---").count(), 4);
    }

    #[test]
    fn empty_name_rejected() {
        let (registry, out) = run_script("1\n\n0\n");
        assert!(registry.is_empty());
        assert!(out.contains("Name cannot be empty.\n"));
    }

    #[test]
    fn full_registry_does_not_prompt() {
        let rules = RegistryRules {
            capacity: 1,
            ..RegistryRules::DEFAULT_RULES
        };
        let (registry, out) = run_script_on(Registry::new(&rules), "1\nA\n1\n0\n", false);
        assert_eq!(registry.len(), 1);
        assert!(out.contains("Maximum number of candidates reached (1).\n"));
        assert_eq!(out.matches("Enter candidate name: ").count(), 1);
    }

    #[test]
    fn vote_without_candidates() {
        let (_, out) = run_script("3\n0\n");
        assert!(out.contains("No candidates to vote for. Add candidates first.\n"));
        assert!(!out.contains("Enter candidate number"));
    }

    #[test]
    fn vote_cancel_and_invalid() {
        let (registry, out) = run_script("1\nA\n3\n0\n3\nnope\n3\n5\n3\n-1\n0\n");
        assert_eq!(out.matches("Vote cancelled.\n").count(), 2);
        assert_eq!(out.matches("Invalid candidate number.\n").count(), 2);
        assert_eq!(registry.candidate(1).map(|c| c.votes), Some(0));
    }

    #[test]
    fn results_without_votes() {
        let (_, out) = run_script("1\nA\n1\nB\n4\n0\n");
        assert!(out.contains("  A: 0 votes (0.00%)\n  B: 0 votes (0.00%)\nNo votes cast yet.\n"));
        assert!(!out.contains("Winner(s):"));
    }

    #[test]
    fn results_tie() {
        let (_, out) = run_script("1\nA\n1\nA\n1\nA\n3\n1\n3\n2\n3\n3\n4\n0\n");
        assert_eq!(out.matches("  A: 1 votes (33.33%)\n").count(), 3);
        assert!(out.contains("Winner(s):\n  A\n  A\n  A\n"));
    }

    #[test]
    fn reset() {
        let (registry, out) = run_script("1\nA\n3\n1\n5\n4\n5\n0\n");
        assert!(registry.is_empty());
        assert_eq!(
            out.matches("Election reset. All candidates removed.\n").count(),
            2
        );
        assert!(out.contains("Election reset. All candidates removed.\n\n--- Interactive Voting System ---\n1) Add candidate\n2) List candidates\n3) Cast vote\n4) Show results\n5) Reset election\n0) Exit\nSelect option: No candidates registered.\n"));
    }

    #[test]
    fn results_as_json() {
        let (_, out) = run_script_on(
            Registry::default(),
            "1\nAlice\n1\nBob\n3\n2\n4\n0\n",
            true,
        );
        let start = out.find("{\n").unwrap();
        let end = out.rfind("}\n").unwrap();
        let js: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();
        assert_eq!(js["total"], 1);
        assert_eq!(js["noVotesCast"], false);
        assert_eq!(js["results"][1]["name"], "Bob");
        assert_eq!(js["results"][1]["percentage"], "100.00");
        assert_eq!(js["winners"], serde_json::json!(["Bob"]));
    }

    #[test]
    fn crlf_input() {
        let (registry, out) = run_script("1\r\nAlice\r\n3\r\n1\r\n0\r\n");
        assert_eq!(
            registry.candidate(1).map(|c| (c.name.to_string(), c.votes)),
            Some(("Alice".to_string(), 1))
        );
        assert!(out.contains("Vote cast for Alice\n"));
    }
}
