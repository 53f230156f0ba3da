//! The physical entity type.
//!
//! The source model's class hierarchy (Container, Surface, UnderSpace,
//! Liquid, LightSource, Key, Clothing, Readable, Actor, ...) is encoded
//! as a single [`Thing`] with a [`ThingKind`] tag plus capability
//! booleans. Verb scope checks consult capabilities, not the tag, so
//! authors can mix behaviors freely.

use parlor_foundation::{Direction, Ix};

use crate::topic::ActorData;

/// Tag identifying what flavor of entity a [`Thing`] was created as.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ThingKind {
    /// A plain physical object.
    Thing,
    /// Holds things inside (`contains_in`).
    Container,
    /// Holds things on top (`contains_on`).
    Surface,
    /// Holds things underneath (`contains_under`).
    UnderSpace,
    /// A liquid; lives inside at most one container at a time.
    Liquid,
    /// Can be lit and extinguished.
    LightSource,
    /// Opens a matching lock.
    Key,
    /// A lock attached to a container or door.
    Lock,
    /// Wearable.
    Clothing,
    /// Carries readable text.
    Readable,
    /// A person or creature; the player is one of these.
    Actor,
    /// One face of a travel connector, placed in a room.
    Entrance,
    /// Non-physical entity that can be known and talked about.
    Abstract,
}

/// Which side of a container new contents go.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContainKind {
    /// Inside (`set in`).
    In,
    /// On top (`set on`).
    On,
    /// Underneath (`set under`).
    Under,
}

/// Body posture of an actor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Posture {
    /// Standing (the default; required before travel).
    Standing,
    /// Sitting.
    Sitting,
    /// Lying down.
    Lying,
}

impl Posture {
    /// The participle used in messages ("sitting on the bench").
    #[must_use]
    pub fn participle(self) -> &'static str {
        match self {
            Posture::Standing => "standing",
            Posture::Sitting => "sitting",
            Posture::Lying => "lying",
        }
    }
}

/// Where a thing currently is.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Holder {
    /// Directly in a room.
    Room(Ix),
    /// In, on, or under another thing.
    Thing(Ix),
}

/// A physical in-world entity.
///
/// Fields are public; invariant-carrying state (containment, noun
/// registration) is only mutated through [`crate::World`] methods.
#[derive(Clone, Debug)]
pub struct Thing {
    /// Stable index, unique across the process.
    pub ix: Ix,
    /// Identity shared by mechanically-distinct copies; equals `ix`
    /// for originals. Dedup in `knows` scope and stacked-item
    /// disambiguation key on this.
    pub known_ix: Ix,
    /// Creation tag.
    pub kind: ThingKind,

    /// Head noun, lowercased.
    pub name: String,
    /// Alternative nouns.
    pub synonyms: Vec<String>,
    /// Ordered adjective list; position matters for `verbose_name`.
    pub adjectives: Vec<String>,
    /// One-line description used in room listings.
    pub desc: String,
    /// Description printed on examine.
    pub xdesc: String,
    /// Readable text, for things that can be read.
    pub read_text: Option<String>,

    /// Current parent; `None` means held offstage.
    pub location: Option<Holder>,
    /// Direct children, in insertion order.
    pub(crate) contains: Vec<Ix>,
    /// Transitive descendants; cache maintained in lock-step with
    /// `contains` by the world.
    pub(crate) sub_contains: Vec<Ix>,

    /// Takeable by the player.
    pub inv_item: bool,
    /// Abstract size for fit checks.
    pub size: i64,
    /// Scenery flag: dropped from resolution when other candidates
    /// remain.
    pub ignore_if_ambiguous: bool,
    /// Object is visible but physically distant; most verbs refuse it.
    pub far_away: bool,

    /// Which side of this thing holds contents, if any.
    pub contain_kind: Option<ContainKind>,
    /// Can hold a liquid.
    pub holds_liquid: bool,
    /// Has a lid that opens and closes.
    pub has_lid: bool,
    /// Open state; meaningful only with a lid (a lidless container is
    /// always open).
    pub is_open: bool,
    /// UnderSpace contents are hidden until revealed.
    pub revealed: bool,
    /// Attached lock entity.
    pub lock_obj: Option<Ix>,
    /// Locked state, for lock entities.
    pub is_locked: bool,
    /// Key that works this lock, for lock entities.
    pub key_obj: Option<Ix>,

    /// Composite root this thing is a part of.
    pub parent_obj: Option<Ix>,
    /// Composite parts attached to this thing.
    pub children: Vec<Ix>,
    /// Message printed when the player tries to take a composite part.
    pub cannot_take_msg: Option<String>,

    /// Currently lit, for light sources.
    pub is_lit: bool,
    /// Remaining turns of fuel; `None` means the source never burns
    /// out.
    pub light_turns: Option<i64>,
    /// Turn count at which a "running low" warning fires.
    pub warning_turns: i64,

    /// Liquid type name, for liquids ("wine", "water").
    pub liquid_type: Option<String>,
    /// Liquid types this liquid may be mixed into, and the result.
    pub mix_with: Vec<(String, String)>,
    /// Can be drunk.
    pub drinkable: bool,

    /// Can be worn.
    pub wearable: bool,

    /// Entrance things: the connector this face belongs to, and the
    /// direction it faces.
    pub connector: Option<Ix>,
    /// Facing direction, for entrance things.
    pub direction: Option<Direction>,

    /// Whether the player has encountered this entity.
    pub known: bool,

    /// Actor-only state: posture, worn items, knowledge, topics.
    pub position: Posture,
    /// Items currently worn (actors).
    pub wearing: Vec<Ix>,
    /// `known_ix` values this actor knows about.
    pub knows_about: Vec<Ix>,
    /// Conversation and commerce data (actors).
    pub actor: Option<ActorData>,
    /// Whether an actor surface/container can hold a standing player.
    pub can_stand_in: bool,
    /// Whether sitting inside/on this thing is possible.
    pub can_sit_in: bool,
    /// Whether lying inside/on this thing is possible.
    pub can_lie_in: bool,
}

impl Thing {
    /// Creates a thing with the given tag and head noun, applying the
    /// capability defaults for that tag.
    #[must_use]
    pub fn new(ix: Ix, kind: ThingKind, name: impl Into<String>) -> Self {
        let name = name.into().to_lowercase();
        let mut thing = Self {
            known_ix: ix.clone(),
            ix,
            kind,
            name,
            synonyms: Vec::new(),
            adjectives: Vec::new(),
            desc: String::new(),
            xdesc: String::new(),
            read_text: None,
            location: None,
            contains: Vec::new(),
            sub_contains: Vec::new(),
            inv_item: true,
            size: 10,
            ignore_if_ambiguous: false,
            far_away: false,
            contain_kind: None,
            holds_liquid: false,
            has_lid: false,
            is_open: true,
            revealed: false,
            lock_obj: None,
            is_locked: false,
            key_obj: None,
            parent_obj: None,
            children: Vec::new(),
            cannot_take_msg: None,
            is_lit: false,
            light_turns: None,
            warning_turns: 5,
            liquid_type: None,
            mix_with: Vec::new(),
            drinkable: false,
            wearable: false,
            connector: None,
            direction: None,
            known: false,
            position: Posture::Standing,
            wearing: Vec::new(),
            knows_about: Vec::new(),
            actor: None,
            can_stand_in: false,
            can_sit_in: false,
            can_lie_in: false,
        };
        thing.apply_kind_defaults();
        thing
    }

    fn apply_kind_defaults(&mut self) {
        match self.kind {
            ThingKind::Container => {
                self.contain_kind = Some(ContainKind::In);
                self.size = 50;
            }
            ThingKind::Surface => {
                self.contain_kind = Some(ContainKind::On);
                self.inv_item = false;
                self.size = 50;
            }
            ThingKind::UnderSpace => {
                self.contain_kind = Some(ContainKind::Under);
                self.inv_item = false;
                self.size = 50;
            }
            ThingKind::Liquid => {
                self.inv_item = false;
            }
            ThingKind::Clothing => {
                self.wearable = true;
            }
            ThingKind::Actor => {
                self.inv_item = false;
                self.size = 100;
            }
            ThingKind::Lock | ThingKind::Entrance => {
                self.inv_item = false;
            }
            ThingKind::Abstract => {
                self.inv_item = false;
                self.size = 0;
            }
            _ => {}
        }
    }

    /// The full noun phrase: adjectives followed by the head noun.
    #[must_use]
    pub fn verbose_name(&self) -> String {
        if self.adjectives.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.adjectives.join(" "), self.name)
        }
    }

    /// Every word that should resolve to this thing.
    pub(crate) fn noun_words(&self) -> Vec<String> {
        let mut words = vec![self.name.clone()];
        words.extend(self.synonyms.iter().cloned());
        words.extend(self.adjectives.iter().cloned());
        words
    }

    /// True if the word is one of this thing's adjectives.
    #[must_use]
    pub fn has_adjective(&self, word: &str) -> bool {
        self.adjectives.iter().any(|a| a == word)
    }

    /// True if the word is this thing's name or a synonym.
    #[must_use]
    pub fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.synonyms.iter().any(|s| s == word)
    }

    /// Direct contents, in insertion order.
    #[must_use]
    pub fn contents(&self) -> &[Ix] {
        &self.contains
    }

    /// Transitive descendants.
    #[must_use]
    pub fn sub_contents(&self) -> &[Ix] {
        &self.sub_contains
    }

    /// Whether this thing's interior is visible from outside.
    ///
    /// Closed lids hide contents entirely; under-spaces hide them
    /// until revealed.
    #[must_use]
    pub fn interior_visible(&self) -> bool {
        match self.contain_kind {
            Some(ContainKind::In) => !self.has_lid || self.is_open,
            Some(ContainKind::On) => true,
            Some(ContainKind::Under) => self.revealed,
            None => true,
        }
    }

    /// True for things the player can pick up.
    #[must_use]
    pub fn takeable(&self) -> bool {
        self.inv_item && self.parent_obj.is_none()
    }

    /// Whether this is an actor (players included).
    #[must_use]
    pub fn is_actor(&self) -> bool {
        self.kind == ThingKind::Actor
    }
}
