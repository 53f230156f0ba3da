//! Main parser pipeline.
//!
//! Raw line to [`Command`] in four stages: tokenize, identify the verb
//! by eliminating candidates that contradict the input's prepositions
//! and quantifier keywords, fit a syntax template, and resolve each
//! object slot against the verb's scope. A surviving ambiguity parks
//! the parse; the next line is first read as an answer to it.

use parlor_foundation::{Direction, Ix, Role, TurnAbort, VerbId, VerbResult};
use parlor_world::World;

use crate::command::{Command, ResolvedObject};
use crate::lexicon;
use crate::phrase::{self, PhraseMatch};
use crate::resolve::{self, Resolution};
use crate::tokenizer::tokenize;
use crate::verb::{Scope, VerbRecord, VerbRegistry};

/// A parked parse awaiting the player's answer to "Do you mean ...?".
#[derive(Clone, Debug)]
pub struct PendingDisambig {
    /// The surviving candidates, in prompt order.
    pub candidates: Vec<Ix>,
    /// Verb being parsed.
    pub verb: VerbId,
    /// Template that fired.
    pub template: usize,
    /// Which slot is ambiguous.
    pub role: Role,
    /// The counterpart slot, if it already resolved.
    pub other: Option<ResolvedObject>,
    /// The counterpart slot's words, if it has not resolved yet.
    pub other_words: Vec<String>,
}

/// The natural-language parser: verb registry plus per-session state.
#[derive(Debug, Default)]
pub struct Parser {
    registry: VerbRegistry,
    pending: Option<PendingDisambig>,
    /// Referent of "it": the last direct object that resolved.
    last_it: Option<Ix>,
}

impl Parser {
    /// Creates a parser over a verb registry.
    #[must_use]
    pub fn new(registry: VerbRegistry) -> Self {
        Self {
            registry,
            pending: None,
            last_it: None,
        }
    }

    /// The verb registry.
    #[must_use]
    pub fn registry(&self) -> &VerbRegistry {
        &self.registry
    }

    /// Whether a disambiguation question is outstanding.
    #[must_use]
    pub fn awaiting_answer(&self) -> bool {
        self.pending.is_some()
    }

    /// Parses one line of input into a command.
    ///
    /// # Errors
    ///
    /// [`TurnAbort`] variants for everything the player should be told;
    /// engine errors only for author bugs surfaced while looking
    /// things up.
    pub fn parse(&mut self, input: &str, world: &World) -> VerbResult<Command> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            self.pending = None;
            return Err(TurnAbort::NoMatch {
                prompt: "I beg your pardon?".to_string(),
            }
            .into());
        }

        if let Some(pending) = self.pending.take() {
            match self.try_answer(&tokens, pending, world)? {
                Some(command) => return Ok(command),
                None => {} // fell through to a fresh parse
            }
        }

        // A bare direction is shorthand for going that way.
        if tokens.len() == 1
            && let Some(direction) = Direction::parse(&tokens[0])
            && let Some(go) = self.registry.by_word("go")
        {
            return Ok(Command {
                verb: go.id,
                template: 0,
                dobj: Some(ResolvedObject::Direction(direction)),
                iobj: None,
            });
        }

        let survivors = self.identify_verbs(&tokens, world)?;

        // First-fit over (verb, template) pairs: the first surviving
        // candidate with a template that fits the tokens wins.
        let mut best: Option<TurnAbort> = None;
        for id in survivors {
            let record = self.registry.record(id).clone();
            match phrase::match_templates(&tokens, &record, world) {
                Ok(matched) => return self.resolve_command(&record, &matched, world),
                Err(abort) => {
                    if best.is_none() {
                        best = Some(abort);
                    }
                }
            }
        }
        Err(best
            .unwrap_or(TurnAbort::Syntax {
                understood: tokens[0].clone(),
            })
            .into())
    }

    // =========================================================================
    // Verb identification
    // =========================================================================

    /// Candidate verbs for the leading token, after contradiction
    /// elimination, in registration order.
    fn identify_verbs(&self, tokens: &[String], world: &World) -> VerbResult<Vec<VerbId>> {
        let word = &tokens[0];
        let candidates = self.registry.candidates(word);
        if candidates.is_empty() {
            return Err(TurnAbort::NoVerb { word: word.clone() }.into());
        }

        let survivors: Vec<VerbId> = candidates
            .iter()
            .copied()
            .filter(|id| self.consistent(self.registry.record(*id), tokens, world))
            .collect();

        if survivors.is_empty() {
            return Err(TurnAbort::Syntax {
                understood: word.clone(),
            }
            .into());
        }
        Ok(survivors)
    }

    /// A candidate survives when the input's prepositions and keywords
    /// all belong to it, and at least one of the keywords it demands
    /// is present.
    fn consistent(&self, record: &VerbRecord, tokens: &[String], world: &World) -> bool {
        for (i, token) in tokens.iter().enumerate().skip(1) {
            if lexicon::is_preposition(token)
                && !record.preposition.iter().any(|p| p == token)
                && !template_literal(record, token)
                && !adjective_of_next(tokens, i, world)
            {
                return false;
            }
            if lexicon::is_keyword(token) && !record.keywords.iter().any(|k| k == token) {
                return false;
            }
        }
        record.keywords.is_empty()
            || record
                .keywords
                .iter()
                .any(|k| tokens.iter().any(|t| t == k))
    }

    // =========================================================================
    // Slot resolution
    // =========================================================================

    fn resolve_command(
        &mut self,
        record: &VerbRecord,
        matched: &PhraseMatch,
        world: &World,
    ) -> VerbResult<Command> {
        let mut dobj = None;
        if !matched.dobj_words.is_empty() {
            match self.resolve_slot(&matched.dobj_words, record.dscope, record.far_dobj, world)? {
                SlotOutcome::Resolved(obj) => dobj = Some(obj),
                SlotOutcome::Ambiguous(candidates) => {
                    return self.park(
                        candidates,
                        record.id,
                        matched.template,
                        Role::Dobj,
                        None,
                        matched.iobj_words.clone(),
                        world,
                    );
                }
            }
        }

        let mut iobj = None;
        if !matched.iobj_words.is_empty() {
            match self.resolve_slot(&matched.iobj_words, record.iscope, record.far_iobj, world)? {
                SlotOutcome::Resolved(obj) => iobj = Some(obj),
                SlotOutcome::Ambiguous(candidates) => {
                    return self.park(
                        candidates,
                        record.id,
                        matched.template,
                        Role::Iobj,
                        dobj,
                        Vec::new(),
                        world,
                    );
                }
            }
        }

        self.check_types(record, dobj.as_ref(), iobj.as_ref(), world)?;
        if let Some(ResolvedObject::Thing(ix)) = &dobj {
            self.last_it = Some(ix.clone());
        }
        Ok(Command {
            verb: record.id,
            template: matched.template,
            dobj,
            iobj,
        })
    }

    fn resolve_slot(
        &self,
        words: &[String],
        scope: Scope,
        far_ok: bool,
        world: &World,
    ) -> VerbResult<SlotOutcome> {
        match scope {
            Scope::Direction => {
                let stripped = lexicon::remove_articles(words);
                let word = stripped.last().map(String::as_str).unwrap_or("");
                let direction = Direction::parse(word).ok_or_else(|| TurnAbort::OutOfScope {
                    message: format!("\"{}\" isn't a direction.", words.join(" ")),
                })?;
                Ok(SlotOutcome::Resolved(ResolvedObject::Direction(direction)))
            }
            Scope::Text => Ok(SlotOutcome::Resolved(ResolvedObject::Text(
                lexicon::remove_articles(words),
            ))),
            _ => {
                let stripped = lexicon::remove_articles(words);
                if stripped.len() == 1 && stripped[0] == "it" {
                    if let Some(it) = &self.last_it
                        && world.is_thing(it)
                    {
                        return Ok(SlotOutcome::Resolved(ResolvedObject::Thing(it.clone())));
                    }
                    return Err(TurnAbort::OutOfScope {
                        message: "I don't know what \"it\" refers to.".to_string(),
                    }
                    .into());
                }
                match resolve::resolve(world, words, scope, far_ok)? {
                    Resolution::One(ix) => Ok(SlotOutcome::Resolved(ResolvedObject::Thing(ix))),
                    Resolution::Ambiguous(set) => Ok(SlotOutcome::Ambiguous(set)),
                }
            }
        }
    }

    fn check_types(
        &self,
        record: &VerbRecord,
        dobj: Option<&ResolvedObject>,
        iobj: Option<&ResolvedObject>,
        world: &World,
    ) -> VerbResult<()> {
        for (constraint, slot) in [(record.dtype, dobj), (record.itype, iobj)] {
            if let (Some(constraint), Some(ResolvedObject::Thing(ix))) = (constraint, slot) {
                let thing = world.thing(ix)?;
                if !constraint.matches(thing) {
                    return Err(TurnAbort::OutOfScope {
                        message: format!(
                            "The {} is not a {}.",
                            thing.verbose_name(),
                            constraint.noun()
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Parks the parse and raises the disambiguation question.
    #[allow(clippy::too_many_arguments)]
    fn park(
        &mut self,
        candidates: Vec<Ix>,
        verb: VerbId,
        template: usize,
        role: Role,
        other: Option<ResolvedObject>,
        other_words: Vec<String>,
        world: &World,
    ) -> VerbResult<Command> {
        let prompt = resolve::ambiguity_prompt(world, &candidates)?;
        self.pending = Some(PendingDisambig {
            candidates,
            verb,
            template,
            role,
            other,
            other_words,
        });
        Err(TurnAbort::NoMatch { prompt }.into())
    }

    // =========================================================================
    // Disambiguation answers
    // =========================================================================

    /// Reads the line as an answer to the outstanding question.
    /// Returns `Ok(None)` when the line is a fresh command instead.
    fn try_answer(
        &mut self,
        tokens: &[String],
        pending: PendingDisambig,
        world: &World,
    ) -> VerbResult<Option<Command>> {
        let stripped = lexicon::remove_articles(tokens);

        // A bare numeral picks by position in the question.
        if stripped.len() == 1
            && let Ok(n) = stripped[0].parse::<usize>()
        {
            if n >= 1 && n <= pending.candidates.len() {
                let chosen = pending.candidates[n - 1].clone();
                return self.finish_pending(chosen, pending, world).map(Some);
            }
            return Err(TurnAbort::NoMatch {
                prompt: "That wasn't one of the choices.".to_string(),
            }
            .into());
        }

        // Otherwise the words must narrow the candidate set.
        let narrowed: Vec<Ix> = pending
            .candidates
            .iter()
            .filter(|ix| {
                world.thing(ix).is_ok_and(|t| {
                    stripped
                        .iter()
                        .all(|w| t.answers_to(w) || t.has_adjective(w))
                })
            })
            .cloned()
            .collect();

        match narrowed.len() {
            1 => {
                let chosen = narrowed[0].clone();
                self.finish_pending(chosen, pending, world).map(Some)
            }
            0 if !self.registry.candidates(&tokens[0]).is_empty()
                || Direction::parse(&tokens[0]).is_some() =>
            {
                // The player moved on; treat the line as a new command.
                Ok(None)
            }
            0 => Err(TurnAbort::NoMatch {
                prompt: "That wasn't one of the choices.".to_string(),
            }
            .into()),
            _ => {
                let prompt = resolve::ambiguity_prompt(world, &narrowed)?;
                self.pending = Some(PendingDisambig {
                    candidates: narrowed,
                    ..pending
                });
                Err(TurnAbort::NoMatch { prompt }.into())
            }
        }
    }

    /// Completes the parked parse with the chosen thing.
    fn finish_pending(
        &mut self,
        chosen: Ix,
        pending: PendingDisambig,
        world: &World,
    ) -> VerbResult<Command> {
        let record = self.registry.record(pending.verb).clone();
        let chosen_obj = ResolvedObject::Thing(chosen.clone());

        let (mut dobj, mut iobj) = match pending.role {
            Role::Dobj => (Some(chosen_obj), pending.other.clone()),
            Role::Iobj => (pending.other.clone(), Some(chosen_obj)),
        };

        // The counterpart slot may still be unresolved words.
        if !pending.other_words.is_empty() {
            let (scope, far_ok) = match pending.role {
                Role::Dobj => (record.iscope, record.far_iobj),
                Role::Iobj => (record.dscope, record.far_dobj),
            };
            match self.resolve_slot(&pending.other_words, scope, far_ok, world)? {
                SlotOutcome::Resolved(obj) => match pending.role {
                    Role::Dobj => iobj = Some(obj),
                    Role::Iobj => dobj = Some(obj),
                },
                SlotOutcome::Ambiguous(candidates) => {
                    let fixed = match pending.role {
                        Role::Dobj => dobj.clone(),
                        Role::Iobj => iobj.clone(),
                    };
                    return self.park(
                        candidates,
                        pending.verb,
                        pending.template,
                        pending.role.other(),
                        fixed,
                        Vec::new(),
                        world,
                    );
                }
            }
        }

        self.check_types(&record, dobj.as_ref(), iobj.as_ref(), world)?;
        if let Some(ResolvedObject::Thing(ix)) = &dobj {
            self.last_it = Some(ix.clone());
        }
        Ok(Command {
            verb: pending.verb,
            template: pending.template,
            dobj,
            iobj,
        })
    }
}

enum SlotOutcome {
    Resolved(ResolvedObject),
    Ambiguous(Vec<Ix>),
}

fn template_literal(record: &VerbRecord, word: &str) -> bool {
    record.templates.iter().any(|template| {
        template
            .iter()
            .any(|tok| matches!(tok, crate::verb::TemplateTok::Literal(w) if w == word))
    })
}

/// A preposition that doubles as an adjective of the noun that follows
/// it does not count against a verb ("put out the OUT fire").
fn adjective_of_next(tokens: &[String], i: usize, world: &World) -> bool {
    let Some(next) = tokens.get(i + 1) else {
        return false;
    };
    world
        .noun_lookup(next)
        .iter()
        .any(|ix| world.thing(ix).is_ok_and(|t| t.has_adjective(&tokens[i])))
}
