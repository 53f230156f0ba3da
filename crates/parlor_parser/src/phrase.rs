//! Syntax template matching.
//!
//! Takes the cleaned token stream and a verb's ordered templates and
//! carves out the word ranges that belong to each object slot. The
//! literals of a template act as anchors: whatever sits between two
//! anchors belongs to the placeholder declared between them. Selection
//! is first-fit over the verb's template list.

use parlor_foundation::TurnAbort;
use parlor_world::World;

use crate::lexicon;
use crate::verb::{Scope, TemplateTok, VerbRecord};

/// A successful template match: which template fired and the word
/// ranges for each slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Index into the verb's template list.
    pub template: usize,
    /// Words captured for the direct object.
    pub dobj_words: Vec<String>,
    /// Words captured for the indirect object.
    pub iobj_words: Vec<String>,
}

/// Matches the tokens against the verb's templates, first-fit.
///
/// # Errors
///
/// [`TurnAbort::Syntax`] when no template fits; `understood` carries
/// the longest literal prefix any template matched.
pub fn match_templates(
    tokens: &[String],
    record: &VerbRecord,
    world: &World,
) -> Result<PhraseMatch, TurnAbort> {
    let mut best_understood = 0usize;
    for (index, template) in record.templates.iter().enumerate() {
        match match_one(tokens, template, record, world) {
            Outcome::Match(dobj_words, iobj_words) => {
                return Ok(PhraseMatch {
                    template: index,
                    dobj_words,
                    iobj_words,
                });
            }
            Outcome::Partial(consumed) => best_understood = best_understood.max(consumed),
        }
    }
    Err(TurnAbort::Syntax {
        understood: tokens[..best_understood].join(" "),
    })
}

enum Outcome {
    Match(Vec<String>, Vec<String>),
    /// How many input tokens the template accounted for before failing.
    Partial(usize),
}

/// Matches one template. Literals must appear in order; a literal that
/// follows another literal (or the start) must sit exactly at the
/// cursor, while a literal after a placeholder may be found further
/// along, the skipped words becoming the placeholder's range.
fn match_one(
    tokens: &[String],
    template: &[TemplateTok],
    record: &VerbRecord,
    world: &World,
) -> Outcome {
    let mut pos = 0usize;
    let mut dobj_words: Vec<String> = Vec::new();
    let mut iobj_words: Vec<String> = Vec::new();
    let mut t = 0usize;

    while t < template.len() {
        match &template[t] {
            TemplateTok::Literal(word) => {
                // The leading literal is the verb word itself, so any
                // of the verb's synonyms satisfies it.
                let matched = match tokens.get(pos) {
                    Some(tok) if tok == word => true,
                    Some(tok) if t == 0 => record.all_words().iter().any(|w| w == tok),
                    _ => false,
                };
                if matched {
                    pos += 1;
                    t += 1;
                } else {
                    return Outcome::Partial(pos);
                }
            }
            placeholder => {
                // Adjacent placeholders share one anchored range and
                // are split afterwards.
                let second = match template.get(t + 1) {
                    Some(TemplateTok::Dobj) => Some(TemplateTok::Dobj),
                    Some(TemplateTok::Iobj) => Some(TemplateTok::Iobj),
                    _ => None,
                };
                let anchor_index = t + 1 + usize::from(second.is_some());
                let range_end = match template.get(anchor_index) {
                    Some(TemplateTok::Literal(anchor)) => {
                        match tokens[pos..].iter().position(|w| w == anchor) {
                            Some(offset) => pos + offset,
                            None => return Outcome::Partial(pos),
                        }
                    }
                    Some(_) => return Outcome::Partial(pos),
                    None => tokens.len(),
                };
                if range_end == pos {
                    return Outcome::Partial(pos);
                }
                let range = tokens[pos..range_end].to_vec();
                if let Some(second_tok) = second {
                    let first_scope = slot_scope(placeholder, record);
                    let second_scope = slot_scope(&second_tok, record);
                    let Some((first_words, second_words)) =
                        split_adjacent(&range, first_scope, second_scope, world)
                    else {
                        return Outcome::Partial(pos);
                    };
                    assign(placeholder, first_words, &mut dobj_words, &mut iobj_words);
                    assign(&second_tok, second_words, &mut dobj_words, &mut iobj_words);
                    t += 2;
                } else {
                    assign(placeholder, range, &mut dobj_words, &mut iobj_words);
                    t += 1;
                }
                pos = range_end;
            }
        }
    }

    if pos == tokens.len() {
        Outcome::Match(dobj_words, iobj_words)
    } else {
        Outcome::Partial(pos)
    }
}

fn slot_scope(tok: &TemplateTok, record: &VerbRecord) -> Scope {
    match tok {
        TemplateTok::Iobj => record.iscope,
        _ => record.dscope,
    }
}

fn assign(
    tok: &TemplateTok,
    words: Vec<String>,
    dobj_words: &mut Vec<String>,
    iobj_words: &mut Vec<String>,
) {
    match tok {
        TemplateTok::Iobj => *iobj_words = words,
        _ => *dobj_words = words,
    }
}

/// Splits a shared range between two adjacent placeholders. Only the
/// unambiguous cases are supported: a direction slot takes exactly one
/// word from its own side, and a text slot cedes to the noun slot the
/// longest run of dictionary words on the noun's side.
fn split_adjacent(
    range: &[String],
    first: Scope,
    second: Scope,
    world: &World,
) -> Option<(Vec<String>, Vec<String>)> {
    let n = range.len();
    if n < 2 {
        return None;
    }
    match (first, second) {
        (Scope::Direction, _) => Some((range[..1].to_vec(), range[1..].to_vec())),
        (_, Scope::Direction) => Some((range[..n - 1].to_vec(), range[n - 1..].to_vec())),
        (Scope::Text, _) => {
            // Longest suffix of dictionary words goes to the noun slot.
            let mut split = n - 1;
            while split > 0 && noun_word(&range[split - 1], world) {
                split -= 1;
            }
            if split == 0 || !noun_word(&range[n - 1], world) {
                return None;
            }
            Some((range[..split].to_vec(), range[split..].to_vec()))
        }
        (_, Scope::Text) => {
            let mut split = 1;
            while split < n && noun_word(&range[split], world) {
                split += 1;
            }
            if split == n || !noun_word(&range[0], world) {
                return None;
            }
            Some((range[..split].to_vec(), range[split..].to_vec()))
        }
        _ => None,
    }
}

fn noun_word(word: &str, world: &World) -> bool {
    lexicon::ARTICLES.contains(&word) || !world.noun_lookup(word).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verb::VerbRecord;
    use parlor_world::{Holder, ThingKind};

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    fn empty_world() -> World {
        World::new()
    }

    #[test]
    fn bare_verb_matches_empty_slots() {
        let record = VerbRecord::new("look").with_template(&["look"]);
        let m = match_templates(&toks(&["look"]), &record, &empty_world()).unwrap();
        assert!(m.dobj_words.is_empty());
        assert!(m.iobj_words.is_empty());
    }

    #[test]
    fn anchored_slots_capture_their_ranges() {
        let record = VerbRecord::new("put")
            .with_template(&["put", "<dobj>", "in", "<iobj>"]);
        let m = match_templates(
            &toks(&["put", "the", "silver", "key", "in", "the", "box"]),
            &record,
            &empty_world(),
        )
        .unwrap();
        assert_eq!(m.dobj_words, toks(&["the", "silver", "key"]));
        assert_eq!(m.iobj_words, toks(&["the", "box"]));
    }

    #[test]
    fn first_fit_prefers_earlier_templates() {
        let record = VerbRecord::new("look")
            .with_template(&["look"])
            .with_template(&["look", "at", "<dobj>"]);
        let m = match_templates(&toks(&["look", "at", "lamp"]), &record, &empty_world())
            .unwrap();
        assert_eq!(m.template, 1);
        assert_eq!(m.dobj_words, toks(&["lamp"]));
    }

    #[test]
    fn leftover_tokens_fail_with_understood_prefix() {
        let record = VerbRecord::new("wait").with_template(&["wait"]);
        let err = match_templates(&toks(&["wait", "patiently"]), &record, &empty_world())
            .unwrap_err();
        match err {
            TurnAbort::Syntax { understood } => assert_eq!(understood, "wait"),
            other => panic!("unexpected abort: {other:?}"),
        }
    }

    #[test]
    fn empty_slot_range_is_rejected() {
        let record = VerbRecord::new("take").with_template(&["take", "<dobj>"]);
        assert!(match_templates(&toks(&["take"]), &record, &empty_world()).is_err());
    }

    #[test]
    fn text_beside_noun_splits_on_dictionary_words() {
        let mut world = World::new();
        let room = world.create_room("Hall", "A hall.");
        let sarah = world.create_thing(ThingKind::Actor, "sarah");
        world.add_thing(&Holder::Room(room), &sarah).unwrap();

        let record = VerbRecord::new("ask")
            .with_dscope(Scope::Near)
            .with_iscope(Scope::Text)
            .with_template(&["ask", "<dobj>", "<iobj>"]);
        let m = match_templates(
            &toks(&["ask", "sarah", "where", "the", "treasure", "is"]),
            &record,
            &world,
        )
        .unwrap();
        assert_eq!(m.dobj_words, toks(&["sarah"]));
        assert_eq!(m.iobj_words, toks(&["where", "the", "treasure", "is"]));
    }
}
