//! Shortest re-spelling of a token sequence as an A* search.
//!
//! A [`SearchNode`] is a position in the token sequence together with the
//! octave and note length that are active in the output at that point.
//! Advancing past a token costs the length of its text from that context;
//! changing octave or length in place costs the length of the change command.
//! The cheapest path to the end of the sequence is the shortest output.
//!
//! Volume and tempo have exactly one spelling each, so they are not part of
//! the node. Their cost depends only on earlier volume and tempo tokens and
//! is computed once up front.

use crate::duration::{all_spellings_for_ticks, relative_spelling, DurationSpec};
use crate::error::OptimizeError;
use crate::pitch::valid_octaves;
use crate::profile::FormatProfile;
use crate::render::{duration_text, note_text, octave_text, rest_text, RenderState};
use crate::search::{astar, SearchPath, SearchProblem};
use crate::token::{NoteEvent, RestEvent, Token};

/// Search state: next token to spell plus the active octave and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchNode {
    pub cursor: usize,
    pub octave: i32,
    pub duration: DurationSpec,
}

impl SearchNode {
    pub fn start(profile: &FormatProfile) -> Self {
        Self {
            cursor: 0,
            octave: profile.default_state.octave,
            duration: profile.default_state.duration,
        }
    }

    fn advance(self) -> Self {
        Self {
            cursor: self.cursor + 1,
            ..self
        }
    }
}

/// Result of [`optimize_with_stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimized {
    pub tokens: Vec<Token>,
    /// Length of the text the tokens render to.
    pub cost: usize,
    /// Search nodes expanded.
    pub expanded: usize,
}

/// The re-spelling graph over one token sequence.
struct Respelling<'a> {
    tokens: &'a [Token],
    profile: &'a FormatProfile,
    /// Exact cost of each volume, tempo, tie and voice token.
    fixed_costs: Vec<Option<usize>>,
    /// `remaining[i]`: lower bound on the cost of `tokens[i..]`.
    remaining: Vec<usize>,
}

impl<'a> Respelling<'a> {
    fn new(tokens: &'a [Token], profile: &'a FormatProfile) -> Self {
        let fixed_costs = fixed_costs(tokens, profile);
        let mut remaining = vec![0; tokens.len() + 1];
        for i in (0..tokens.len()).rev() {
            // Notes and rests always spell at least one character.
            remaining[i] = remaining[i + 1] + fixed_costs[i].unwrap_or(1);
        }
        Self {
            tokens,
            profile,
            fixed_costs,
            remaining,
        }
    }

    /// Edges that respell the active length so `ticks` can be written.
    ///
    /// Every exact spelling is offered, as is every spelling with trailing
    /// dots removed so that the note itself can add them back.
    fn length_changes(
        &self,
        node: SearchNode,
        ticks: u32,
        out: &mut Vec<(SearchNode, usize)>,
    ) {
        for spelling in all_spellings_for_ticks(ticks, self.profile) {
            let candidates = std::iter::once(spelling).chain(spelling.stripped_prefixes());
            for duration in candidates {
                if duration == node.duration {
                    continue;
                }
                out.push((
                    SearchNode { duration, ..node },
                    duration_text(duration, node.duration).len(),
                ));
            }
        }
    }

    fn note_neighbors(
        &self,
        node: SearchNode,
        note: &NoteEvent,
        out: &mut Vec<(SearchNode, usize)>,
    ) {
        for octave in valid_octaves(note.pitch) {
            if octave == node.octave {
                let text = note_text(note.pitch, note.ticks, octave, node.duration, self.profile);
                out.push((node.advance(), text.len()));
                if note.ticks != node.duration.ticks(self.profile) {
                    self.length_changes(node, note.ticks, out);
                }
            } else {
                out.push((
                    SearchNode { octave, ..node },
                    octave_text(octave, node.octave, self.profile).len(),
                ));
            }
        }
    }

    fn rest_neighbors(
        &self,
        node: SearchNode,
        rest: &RestEvent,
        out: &mut Vec<(SearchNode, usize)>,
    ) {
        let same_length = rest.ticks == node.duration.ticks(self.profile);
        let dots_only = self.profile.no_literal_dotted_rests
            && relative_spelling(rest.ticks, node.duration, self.profile).ends_with('.');
        if same_length || !dots_only {
            let text = rest_text(rest.ticks, node.duration, self.profile);
            out.push((node.advance(), text.len()));
        }
        if !same_length {
            self.length_changes(node, rest.ticks, out);
        }
    }
}

impl SearchProblem for Respelling<'_> {
    type Node = SearchNode;

    fn start(&self) -> SearchNode {
        SearchNode::start(self.profile)
    }

    fn is_goal(&self, node: &SearchNode) -> bool {
        node.cursor == self.tokens.len()
    }

    fn neighbors(&self, node: &SearchNode, out: &mut Vec<(SearchNode, usize)>) {
        let node = *node;
        let Some(token) = self.tokens.get(node.cursor) else {
            return;
        };
        let fixed = self.fixed_costs[node.cursor].unwrap_or(0);
        match token {
            Token::Note(note) => self.note_neighbors(node, note, out),
            Token::Rest(rest) => self.rest_neighbors(node, rest, out),
            Token::Volume { .. } | Token::Tempo { .. } | Token::Tie => {
                out.push((node.advance(), fixed));
            }
            Token::NextVoice => {
                let next = if self.profile.voices_share_state {
                    node.advance()
                } else {
                    SearchNode {
                        cursor: node.cursor + 1,
                        ..SearchNode::start(self.profile)
                    }
                };
                out.push((next, fixed));
            }
            Token::Duration { .. } | Token::Octave { .. } => {
                out.push((node.advance(), fixed));
            }
        }
    }

    fn heuristic(&self, node: &SearchNode) -> usize {
        self.remaining[node.cursor]
    }
}

/// Text length of every token whose spelling does not depend on the search.
///
/// Notes and rests get `None`.
fn fixed_costs(tokens: &[Token], profile: &FormatProfile) -> Vec<Option<usize>> {
    let mut state = RenderState::initial(profile);
    tokens
        .iter()
        .map(|token| match token {
            Token::Note(_) | Token::Rest(_) => None,
            // Pruned before the search; skipped for free if present.
            Token::Duration { .. } | Token::Octave { .. } => Some(0),
            Token::Volume { .. } | Token::Tempo { .. } | Token::Tie | Token::NextVoice => {
                Some(state.render(token, profile).len())
            }
        })
        .collect()
}

/// Make note volumes explicit on the output dialect.
///
/// Notes remember the volume they were read with. When that volume renders
/// differently from the volume in force on the output side, as happens after
/// a change of dialect, a `Volume` token is inserted before the note.
pub fn materialize_volumes(tokens: &[Token], profile: &FormatProfile) -> Vec<Token> {
    let max = profile.max_volume;
    let default = profile.default_state.volume.render(max);
    let mut current = default;
    let mut out = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Volume { volume, .. } => current = volume.render(max),
            Token::NextVoice if !profile.voices_share_state => current = default,
            Token::Note(note) => {
                let rendered = note.volume.render(max);
                if rendered != current {
                    out.push(Token::Volume {
                        volume: note.volume,
                        time: note.time,
                    });
                    current = rendered;
                }
            }
            _ => {}
        }
        out.push(token.clone());
    }
    out
}

/// Remove volume and tempo changes that render as nothing.
///
/// A change to the value already in force has no text, so keeping it would
/// only give the search a different graph than the one it sees when
/// re-reading its own output.
pub fn drop_redundant_changes(tokens: &[Token], profile: &FormatProfile) -> Vec<Token> {
    let mut state = RenderState::initial(profile);
    tokens
        .iter()
        .filter(|token| {
            let text = state.render(token, profile);
            !matches!(token, Token::Volume { .. } | Token::Tempo { .. }) || !text.is_empty()
        })
        .cloned()
        .collect()
}

/// Cheapest path through the re-spelling graph of `tokens`.
///
/// `tokens` must not contain `Duration` or `Octave` tokens.
pub fn find_path(
    tokens: &[Token],
    profile: &FormatProfile,
) -> Result<SearchPath<SearchNode>, OptimizeError> {
    let problem = Respelling::new(tokens, profile);
    astar(&problem).map_err(|exhausted| OptimizeError::NoPath {
        tokens: tokens.len(),
        expanded: exhausted.expanded,
    })
}

/// Shortest spelling of `tokens` on `profile`, with search statistics.
pub fn optimize_with_stats(
    tokens: &[Token],
    profile: &FormatProfile,
) -> Result<Optimized, OptimizeError> {
    let pruned: Vec<Token> = tokens
        .iter()
        .filter(|t| !matches!(t, Token::Duration { .. } | Token::Octave { .. }))
        .cloned()
        .collect();
    let tokens = drop_redundant_changes(&materialize_volumes(&pruned, profile), profile);
    let path = find_path(&tokens, profile)?;

    let mut optimized = Vec::with_capacity(path.nodes.len());
    for pair in path.nodes.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if from.cursor != to.cursor {
            optimized.push(tokens[from.cursor].clone());
        } else {
            let time = tokens
                .get(to.cursor)
                .and_then(Token::time)
                .unwrap_or_default();
            if from.duration != to.duration {
                optimized.push(Token::Duration {
                    duration: to.duration,
                    time,
                });
            } else if from.octave != to.octave {
                optimized.push(Token::Octave {
                    octave: to.octave,
                    time,
                });
            } else {
                return Err(OptimizeError::UnexpectedTransition {
                    cursor: from.cursor,
                });
            }
        }
    }

    log::debug!(
        "optimized {} tokens into {} ({} characters, {} nodes expanded)",
        tokens.len(),
        optimized.len(),
        path.total_cost,
        path.expanded
    );

    Ok(Optimized {
        tokens: optimized,
        cost: path.total_cost,
        expanded: path.expanded,
    })
}

/// Shortest spelling of `tokens` on `profile`.
///
/// The result contains the input tokens in order, plus any explicit
/// volume, length and octave changes that make the rendered text shortest.
pub fn optimize(tokens: &[Token], profile: &FormatProfile) -> Result<Vec<Token>, OptimizeError> {
    optimize_with_stats(tokens, profile).map(|optimized| optimized.tokens)
}

#[cfg(test)]
mod tests;
