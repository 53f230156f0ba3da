//! Noun-phrase resolution against the world.
//!
//! A captured word range becomes a thing in three steps: build the
//! candidate set the verb's scope allows, match the head noun through
//! the noun dictionary, then filter backwards through the preceding
//! words as adjectives and synonyms. What survives is either a single
//! thing, or an ambiguity the caller turns into a question.

use parlor_foundation::{Ix, TurnAbort, VerbResult};
use parlor_world::{ContainKind, Holder, World};

use crate::lexicon;
use crate::verb::Scope;

/// Outcome of resolving a word range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one thing survived.
    One(Ix),
    /// Several equally good candidates; ask the player.
    Ambiguous(Vec<Ix>),
}

/// The candidate pool a scope draws from, with room and inventory kept
/// apart so flexible scopes can prefer one side.
struct Pool {
    room: Vec<Ix>,
    inventory: Vec<Ix>,
    dark: bool,
}

/// Resolves a captured word range within a scope.
///
/// `far_ok` admits far-away things (verbs like examine set it).
///
/// # Errors
///
/// [`TurnAbort::OutOfScope`] with a scope-appropriate message when
/// nothing matches, or when the room is dark and the scope needs
/// sight.
pub fn resolve(
    world: &World,
    words: &[String],
    scope: Scope,
    far_ok: bool,
) -> VerbResult<Resolution> {
    let words = lexicon::remove_articles(words);
    let phrase = words.join(" ");
    if words.is_empty() {
        return Err(TurnAbort::OutOfScope {
            message: "I don't see what you're referring to.".to_string(),
        }
        .into());
    }

    let pool = scope_pool(world, scope)?;
    if scope == Scope::Room && pool.dark {
        return Err(TurnAbort::OutOfScope {
            message: "It's too dark to see.".to_string(),
        }
        .into());
    }

    let in_scope = pool_order(&pool, scope);
    let head = &words[words.len() - 1];
    let adjectives = &words[..words.len() - 1];

    // Head noun through the dictionary, then backwards adjective
    // filtering over the preceding words.
    let mut candidates: Vec<Ix> = in_scope
        .iter()
        .filter(|ix| world.noun_lookup(head).contains(ix))
        .filter(|ix| {
            let Ok(thing) = world.thing(ix) else {
                return false;
            };
            (thing.answers_to(head) || thing.has_adjective(head))
                && adjectives
                    .iter()
                    .all(|a| thing.has_adjective(a) || thing.answers_to(a))
        })
        .cloned()
        .collect();

    // Flexible scopes prefer their own side when it has any match.
    if matches!(scope, Scope::Inv | Scope::InvFlex) {
        prefer(&mut candidates, &pool.inventory);
    }
    if scope == Scope::RoomFlex {
        prefer(&mut candidates, &pool.room);
    }

    if !far_ok {
        let reachable: Vec<Ix> = candidates
            .iter()
            .filter(|ix| world.thing(ix).is_ok_and(|t| !t.far_away))
            .cloned()
            .collect();
        if reachable.is_empty() && !candidates.is_empty() {
            let name = world.thing(&candidates[0])?.verbose_name();
            return Err(TurnAbort::OutOfScope {
                message: format!("The {name} is too far away."),
            }
            .into());
        }
        candidates = reachable;
    }

    // A part of a composite never shadows its whole.
    let parents: Vec<Ix> = candidates.clone();
    candidates.retain(|ix| {
        world
            .thing(ix)
            .ok()
            .and_then(|t| t.parent_obj.clone())
            .is_none_or(|parent| !parents.contains(&parent))
    });

    // Unremarkable scenery loses to anything else.
    if candidates.len() > 1 {
        let remarkable: Vec<Ix> = candidates
            .iter()
            .filter(|ix| world.thing(ix).is_ok_and(|t| !t.ignore_if_ambiguous))
            .cloned()
            .collect();
        if !remarkable.is_empty() {
            candidates = remarkable;
        }
    }

    // Stacked copies are interchangeable; take the first.
    if candidates.len() > 1 && interchangeable(world, &candidates)? {
        candidates.truncate(1);
    }

    match candidates.len() {
        0 => Err(TurnAbort::OutOfScope {
            message: missing_message(scope, &phrase, pool.dark),
        }
        .into()),
        1 => Ok(Resolution::One(candidates.remove(0))),
        _ => Ok(Resolution::Ambiguous(candidates)),
    }
}

/// Renders the disambiguation question for an ambiguous set:
/// "Do you mean the old bottle (1), or the new bottle (2)?".
pub fn ambiguity_prompt(world: &World, candidates: &[Ix]) -> VerbResult<String> {
    let mut parts: Vec<String> = Vec::with_capacity(candidates.len());
    for (i, ix) in candidates.iter().enumerate() {
        let thing = world.thing(ix)?;
        let mut part = format!("the {} ({})", thing.verbose_name(), i + 1);
        if let Some(Holder::Thing(holder)) = &thing.location {
            let holder = world.thing(holder)?;
            let prep = match holder.contain_kind {
                Some(ContainKind::On) => "on",
                Some(ContainKind::Under) => "under",
                _ => "in",
            };
            part.push_str(&format!(" ({prep} the {})", holder.verbose_name()));
        }
        parts.push(part);
    }
    let last = parts
        .pop()
        .unwrap_or_else(|| "that (1)".to_string());
    if parts.is_empty() {
        return Ok(format!("Do you mean {last}?"));
    }
    Ok(format!("Do you mean {}, or {last}?", parts.join(", ")))
}

fn scope_pool(world: &World, scope: Scope) -> VerbResult<Pool> {
    let player = world.player()?.clone();
    let room = world
        .outermost_room(&player)?
        .ok_or_else(|| TurnAbort::OutOfScope {
            message: "You aren't anywhere.".to_string(),
        })?;
    let dark = !world.resolve_darkness(&room)?;

    let inventory: Vec<Ix> = world.visible_contents(&Holder::Thing(player.clone()))?;
    let worn = world.thing(&player)?.wearing.clone();

    match scope {
        Scope::Room | Scope::Near | Scope::RoomFlex => {
            let mut room_set = if dark {
                Vec::new()
            } else {
                world.visible_contents(&Holder::Room(room))?
            };
            room_set.retain(|ix| !inventory.contains(ix));
            Ok(Pool {
                room: room_set,
                inventory,
                dark,
            })
        }
        Scope::Inv | Scope::InvFlex => {
            // Room objects stay in the pool so the caller can try an
            // implicit take; held and worn items win outright.
            let mut held = inventory;
            held.retain(|ix| !worn.contains(ix));
            held.extend(worn);
            let room_set = if dark {
                Vec::new()
            } else {
                let mut set = world.visible_contents(&Holder::Room(room))?;
                set.retain(|ix| !held.contains(ix));
                set
            };
            Ok(Pool {
                room: room_set,
                inventory: held,
                dark,
            })
        }
        Scope::Wearing => Ok(Pool {
            room: Vec::new(),
            inventory: worn,
            dark,
        }),
        Scope::Knows => {
            let mut known = world.thing(&player)?.knows_about.clone();
            known.retain(|ix| world.is_thing(ix));
            let mut seen: Vec<Ix> = Vec::new();
            for ix in known {
                let known_ix = world.thing(&ix)?.known_ix.clone();
                if !seen.contains(&known_ix) {
                    seen.push(ix);
                }
            }
            Ok(Pool {
                room: Vec::new(),
                inventory: seen,
                dark,
            })
        }
        Scope::Direction | Scope::Text => Ok(Pool {
            room: Vec::new(),
            inventory: Vec::new(),
            dark,
        }),
    }
}

/// Search order for a pool: preferred side first.
fn pool_order(pool: &Pool, scope: Scope) -> Vec<Ix> {
    let mut order = Vec::with_capacity(pool.room.len() + pool.inventory.len());
    match scope {
        Scope::Inv | Scope::InvFlex | Scope::Wearing | Scope::Knows => {
            order.extend(pool.inventory.iter().cloned());
            order.extend(pool.room.iter().cloned());
        }
        _ => {
            order.extend(pool.room.iter().cloned());
            order.extend(pool.inventory.iter().cloned());
        }
    }
    order
}

/// Keeps only the candidates on the preferred side, if any are there.
fn prefer(candidates: &mut Vec<Ix>, side: &[Ix]) {
    if candidates.iter().any(|ix| side.contains(ix)) {
        candidates.retain(|ix| side.contains(ix));
    }
}

/// True when every candidate is a copy of the same thing in the same
/// place, so any one of them will do.
fn interchangeable(world: &World, candidates: &[Ix]) -> VerbResult<bool> {
    let first = world.thing(&candidates[0])?;
    for ix in &candidates[1..] {
        let other = world.thing(ix)?;
        if other.known_ix != first.known_ix || other.location != first.location {
            return Ok(false);
        }
    }
    Ok(true)
}

fn missing_message(scope: Scope, phrase: &str, dark: bool) -> String {
    match scope {
        Scope::Room | Scope::Near | Scope::RoomFlex => {
            if dark {
                "It's too dark to see.".to_string()
            } else {
                format!("I don't see any {phrase} here.")
            }
        }
        Scope::Inv | Scope::InvFlex => format!("You don't have any {phrase}."),
        Scope::Wearing => format!("You aren't wearing any {phrase}."),
        Scope::Knows => format!("You don't know of any {phrase}."),
        Scope::Direction | Scope::Text => format!("I don't see any {phrase} here."),
    }
}

/// Whether a candidate currently sits in the room rather than in the
/// player's hands; drives the implicit take.
pub fn needs_take(world: &World, ix: &Ix) -> VerbResult<bool> {
    Ok(!world.in_inventory(ix)?)
}
