//! Conversation: ask, tell, give, show.
//!
//! Responses come from the actor's topic maps, keyed by the subject's
//! `known_ix`. Order of precedence: hermit topic pre-empts everything;
//! a greeting fires on the first exchange (or the return greeting on
//! later ones); then the specific topic or the default; the sticky
//! topic is appended to every response.

use parlor_foundation::{Ix, Result, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};
use parlor_world::{ConversationKind, Holder, Topic};

use crate::game::Game;

use super::{capitalize, dobj_ix, iobj_required, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<()> {
    i.verb(
        VerbRecord::new("ask")
            .with_template(&["ask", "<dobj>", "about", "<iobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::Actor)
            .with_iscope(Scope::Knows)
            .with_preposition(&["about"])
            .with_help("ask PERSON about THING"),
        ask_verb,
    )?;
    i.verb(
        VerbRecord::new("tell")
            .with_template(&["tell", "<dobj>", "about", "<iobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::Actor)
            .with_iscope(Scope::Knows)
            .with_preposition(&["about"])
            .with_help("tell PERSON about THING"),
        tell_verb,
    )?;
    i.verb(
        VerbRecord::new("give")
            .with_synonyms(&["hand", "offer"])
            .with_template(&["give", "<dobj>", "to", "<iobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Actor)
            .with_preposition(&["to"])
            .with_help("give THING to PERSON"),
        give_verb,
    )?;
    i.verb(
        VerbRecord::new("show")
            .with_template(&["show", "<dobj>", "to", "<iobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Actor)
            .with_preposition(&["to"])
            .with_help("show THING to PERSON"),
        show_verb,
    )?;
    Ok(())
}

fn ask_verb(game: &mut Game, command: &Command) -> VerbResult {
    let actor = dobj_ix(command)?;
    let subject = iobj_required(command)?;
    converse(game, &actor, &subject, ConversationKind::Ask)
}

fn tell_verb(game: &mut Game, command: &Command) -> VerbResult {
    let actor = dobj_ix(command)?;
    let subject = iobj_required(command)?;
    converse(game, &actor, &subject, ConversationKind::Tell)
}

fn give_verb(game: &mut Game, command: &Command) -> VerbResult {
    let item = dobj_ix(command)?;
    let actor = iobj_required(command)?;
    converse(game, &actor, &item, ConversationKind::Give)
}

fn show_verb(game: &mut Game, command: &Command) -> VerbResult {
    let item = dobj_ix(command)?;
    let actor = iobj_required(command)?;
    converse(game, &actor, &item, ConversationKind::Show)
}

/// One conversational exchange with an actor about a subject.
fn converse(
    game: &mut Game,
    actor_ix: &Ix,
    subject_ix: &Ix,
    kind: ConversationKind,
) -> VerbResult {
    game.world.make_known(actor_ix)?;
    let actor_name = name(game, actor_ix)?;
    let Some(data) = game.world.thing(actor_ix)?.actor.clone() else {
        game.events.say(format!(
            "{} doesn't respond.",
            capitalize(&actor_name)
        ));
        return Ok(());
    };

    // A hermit refuses all conversation.
    if let Some(hermit) = &data.hermit_topic {
        game.events.say(hermit.text.clone());
        return Ok(());
    }

    // Greeting: once on the first exchange, the return greeting after.
    if data.said_hi {
        if let Some(back) = &data.return_hi_topic {
            game.events.say(back.text.clone());
        }
    } else {
        if let Some(hi) = &data.hi_topic {
            game.events.say(hi.text.clone());
        }
        if let Some(state) = &mut game.world.thing_mut(actor_ix)?.actor {
            state.said_hi = true;
        }
    }

    let subject_known = game.world.thing(subject_ix)?.known_ix.clone();
    let topic: Option<Topic> = data.topics(kind).get(&subject_known).cloned();
    let matched = topic.is_some();
    match topic {
        Some(topic) => game.events.say(topic.text),
        None => match &data.default_topic {
            Some(text) => game.events.say(text.clone()),
            None => game.events.say(format!(
                "{} has nothing to say about that.",
                capitalize(&actor_name)
            )),
        },
    }

    // A welcomed gift changes hands.
    if kind == ConversationKind::Give && matched {
        game.world
            .move_to(subject_ix, &Holder::Thing(actor_ix.clone()))?;
    }

    if let Some(sticky) = &data.sticky_topic {
        game.events.say(sticky.text.clone());
    }
    Ok(())
}
