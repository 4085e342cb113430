//! Interactive ballot walkthrough
//!
//! Stdin-driven counterpart of the voting screen: one initiative at a
//! time, four scores, explicit confirmation before anything is committed.

use anyhow::Result;
use clarity_application::ports::progress::BallotProgress;
use clarity_application::ports::vote_store::VoteStorePort;
use clarity_application::RunBallotUseCase;
use clarity_domain::ballot::{Ballot, TransitionResult};
use clarity_domain::session::{Initiative, Member, Session};
use clarity_domain::vote::Score;
use std::io::{self, Write};

/// Progress observer that prints walkthrough milestones
pub struct ConsolePulse;

impl BallotProgress for ConsolePulse {
    fn on_initiative_presented(&self, _index: usize, _total: usize, _initiative: &Initiative) {}

    fn on_vote_recorded(&self, _initiative_id: &str, abstained: bool) {
        if abstained {
            println!("  - abstained, prior vote cleared");
        } else {
            println!("  * vote recorded");
        }
    }

    fn on_ballot_finished(&self, _member_id: &str) {
        println!();
        println!("Voting complete. The boardroom report reflects your input.");
    }
}

/// One parsed line of participant input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Four freshly entered dimension scores
    Scores(Score),
    /// Keep the buffered scores as they are
    Keep,
    Abstain,
    Back,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Keep,
        "a" | "abstain" => Input::Abstain,
        "b" | "back" => Input::Back,
        "q" | "quit" => Input::Quit,
        _ => parse_scores(trimmed),
    }
}

fn parse_scores(line: &str) -> Input {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Input::Invalid(format!(
            "expected 4 scores (importance feasibility urgency alignment), got {}",
            parts.len()
        ));
    }

    let mut values = [0u8; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        match part.parse::<u8>() {
            Ok(value) => *slot = value,
            Err(_) => return Input::Invalid(format!("'{part}' is not a number")),
        }
    }

    match Score::new(values[0], values[1], values[2], values[3]) {
        Ok(scores) => Input::Scores(scores),
        Err(e) => Input::Invalid(e.to_string()),
    }
}

/// Drive the participant through every initiative in the session
pub async fn run<S: VoteStorePort>(
    ballots: &RunBallotUseCase<S>,
    session: &Session,
    member: &Member,
    allowed: bool,
    locked: bool,
) -> Result<()> {
    if !allowed {
        let reason = if locked {
            "the session is read-only"
        } else {
            "observers cannot vote"
        };
        println!("Note: {reason}. You can browse the initiatives, but nothing will be recorded.");
    }

    let mut ballot = ballots
        .start(session.initiatives.clone(), &member.id, allowed)
        .await;

    while !ballot.is_finished() {
        let Some(initiative) = ballot.current_initiative() else {
            break;
        };
        let (index, total) = ballot.progress();

        println!();
        println!("Initiative {} of {}: {}", index + 1, total, initiative.name);
        if let Some(description) = &initiative.description {
            println!("  {description}");
        }
        let buffer = ballot.buffered_scores();
        println!(
            "  current scores: importance {} | feasibility {} | urgency {} | alignment {}",
            buffer.importance, buffer.feasibility, buffer.urgency, buffer.alignment
        );
        print!("  [4 scores 1-5 | enter = submit as-is | a = abstain | b = back | q = quit] > ");
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            // EOF behaves like quit
            return Ok(());
        };

        match parse_input(&line) {
            Input::Quit => return Ok(()),
            Input::Back => {
                if let Err(e) = ballots.back(&mut ballot) {
                    println!("  {e}");
                }
            }
            Input::Abstain => {
                let transition = ballots.request_abstain(&mut ballot)?;
                resolve_confirmation(ballots, &mut ballot, transition, true).await?;
            }
            Input::Keep => {
                let transition = ballots.request_commit(&mut ballot)?;
                resolve_confirmation(ballots, &mut ballot, transition, false).await?;
            }
            Input::Scores(scores) => {
                ballots.submit_scores(&mut ballot, scores)?;
                let transition = ballots.request_commit(&mut ballot)?;
                resolve_confirmation(ballots, &mut ballot, transition, false).await?;
            }
            Input::Invalid(reason) => println!("  {reason}"),
        }
    }

    Ok(())
}

/// Ask for the explicit confirmation the ballot requires before a commit
async fn resolve_confirmation<S: VoteStorePort>(
    ballots: &RunBallotUseCase<S>,
    ballot: &mut Ballot,
    transition: TransitionResult,
    abstaining: bool,
) -> Result<()> {
    // Non-voting participants advance without confirmation
    let TransitionResult::AwaitingConfirmation { .. } = transition else {
        return Ok(());
    };

    let question = if abstaining {
        "  Abstain and clear any prior vote? [y/N] > "
    } else {
        "  Submit these scores? [y/N] > "
    };
    print!("{question}");
    io::stdout().flush()?;

    let confirmed = matches!(
        read_line()?.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    );

    if confirmed {
        ballots.confirm(ballot).await?;
    } else {
        ballots.cancel_confirm(ballot)?;
        println!("  cancelled");
    }
    Ok(())
}

/// Read one line from stdin; None on EOF
fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 { Ok(None) } else { Ok(Some(line)) }
}
