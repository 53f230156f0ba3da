//! The entity store and containment model.
//!
//! All entities live in one arena keyed by [`Ix`]; every
//! cross-reference is an index. The only owning tree is containment,
//! rooted at the rooms. `sub_contains` is a denormalised cache of
//! transitive descendants, recomputed for the affected ancestor chain
//! on every containment mutation so the §invariants hold at all times:
//! a thing is in its holder's `contains` iff its `location` points
//! back, and `sub_contains` always equals the transitive union.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use parlor_foundation::{Direction, EngineError, Ix, IxAllocator, Result, Value};

use crate::room::{Connector, ConnectorKind, Exit, Face, Room};
use crate::thing::{ContainKind, Holder, Posture, Thing, ThingKind};

/// The game world: entity arena, rooms, connectors, and the noun
/// dictionary.
#[derive(Clone, Debug, Default)]
pub struct World {
    alloc: IxAllocator,
    things: HashMap<Ix, Thing>,
    rooms: HashMap<Ix, Room>,
    connectors: HashMap<Ix, Connector>,
    /// word -> every thing whose name, synonyms, or adjectives
    /// contain it. Maintained by every create/copy/synonym call.
    noun_dict: HashMap<String, Vec<Ix>>,
    player: Option<Ix>,
    room_order: Vec<Ix>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a thing of the given kind, unplaced.
    pub fn create_thing(&mut self, kind: ThingKind, name: impl Into<String>) -> Ix {
        let ix = self.alloc.next("thing");
        let thing = Thing::new(ix.clone(), kind, name);
        self.register_nouns(&thing);
        self.things.insert(ix.clone(), thing);
        ix
    }

    /// Creates a room with its default scenery (floor, ceiling, four
    /// walls), all unremarkable and ignored when other candidates
    /// match.
    pub fn create_room(&mut self, name: impl Into<String>, desc: impl Into<String>) -> Ix {
        let ix = self.alloc.next("room");
        let room = Room::new(ix.clone(), name, desc);
        self.rooms.insert(ix.clone(), room);
        self.room_order.push(ix.clone());

        let mut scenery = Vec::new();
        for (noun, adjective) in [
            ("floor", None),
            ("ceiling", None),
            ("wall", Some("north")),
            ("wall", Some("south")),
            ("wall", Some("east")),
            ("wall", Some("west")),
        ] {
            let s = self.create_thing(ThingKind::Thing, noun);
            if let Some(t) = self.things.get_mut(&s) {
                t.inv_item = false;
                t.ignore_if_ambiguous = true;
                t.xdesc = format!("The {noun} is unremarkable.");
                if let Some(adj) = adjective {
                    t.adjectives.push(adj.to_string());
                }
                if noun == "floor" {
                    t.synonyms.push("ground".to_string());
                }
            }
            self.reindex_nouns(&s);
            // Raw placement: scenery has no composite parts.
            self.attach(&Holder::Room(ix.clone()), &s);
            scenery.push(s);
        }
        if let Some(r) = self.rooms.get_mut(&ix) {
            r.scenery = scenery;
        }
        self.refresh_sub_chain(&Holder::Room(ix.clone()));
        ix
    }

    /// Creates the player actor and places it in a room.
    pub fn create_player(&mut self, room: &Ix) -> Result<Ix> {
        let ix = self.create_thing(ThingKind::Actor, "self");
        if let Some(t) = self.things.get_mut(&ix) {
            t.synonyms.push("me".to_string());
            t.synonyms.push("myself".to_string());
            t.known = true;
        }
        self.reindex_nouns(&ix);
        self.player = Some(ix.clone());
        self.add_thing(&Holder::Room(room.clone()), &ix)?;
        Ok(ix)
    }

    /// Creates a mechanically-distinct copy of a thing.
    ///
    /// The copy gets a fresh `ix` but shares the original's
    /// `known_ix`, placing it in the same stack for disambiguation
    /// and `knows`-scope dedup.
    pub fn copy_thing(&mut self, src: &Ix) -> Result<Ix> {
        let template = self
            .things
            .get(src)
            .ok_or_else(|| EngineError::UnknownIx(src.clone()))?;
        let mut copy = template.clone();
        let ix = self.alloc.next("thing");
        copy.ix = ix.clone();
        copy.location = None;
        copy.contains.clear();
        copy.sub_contains.clear();
        copy.children.clear();
        self.register_nouns(&copy);
        self.things.insert(ix.clone(), copy);
        Ok(ix)
    }

    /// Creates a connector between two rooms and wires up both exit
    /// slots and both entrance things.
    ///
    /// The far side faces the opposite direction. For doors both
    /// entrances share the connector's open and lock state.
    pub fn create_connector(
        &mut self,
        kind: ConnectorKind,
        room_a: &Ix,
        dir: Direction,
        room_b: &Ix,
        name: &str,
    ) -> Result<Ix> {
        if !self.rooms.contains_key(room_a) {
            return Err(EngineError::UnknownIx(room_a.clone()));
        }
        if !self.rooms.contains_key(room_b) {
            return Err(EngineError::UnknownIx(room_b.clone()));
        }
        let ix = self.alloc.next("connector");

        let mut make_entrance = |world: &mut World, room: &Ix, facing: Direction| {
            let e = world.create_thing(ThingKind::Entrance, name);
            if let Some(t) = world.things.get_mut(&e) {
                t.connector = Some(ix.clone());
                t.direction = Some(facing);
                t.xdesc = format!("It leads {facing}.");
            }
            world.attach(&Holder::Room(room.clone()), &e);
            world.refresh_sub_chain(&Holder::Room(room.clone()));
            e
        };

        let entrance_a = make_entrance(self, room_a, dir);
        let entrance_b = make_entrance(self, room_b, dir.opposite());

        let connector = Connector {
            ix: ix.clone(),
            kind,
            side_a: Face {
                room: room_a.clone(),
                entrance: entrance_a,
                direction: dir,
            },
            side_b: Face {
                room: room_b.clone(),
                entrance: entrance_b,
                direction: dir.opposite(),
            },
            is_open: kind != ConnectorKind::Door,
            lock_obj: None,
            travel_msg: None,
        };
        self.connectors.insert(ix.clone(), connector);

        if let Some(r) = self.rooms.get_mut(room_a) {
            r.set_exit(dir, Some(Exit::Connector(ix.clone())));
        }
        if let Some(r) = self.rooms.get_mut(room_b) {
            r.set_exit(dir.opposite(), Some(Exit::Connector(ix.clone())));
        }
        Ok(ix)
    }

    /// Creates a lock entity worked by the given key.
    pub fn create_lock(&mut self, key: Option<Ix>) -> Ix {
        let ix = self.create_thing(ThingKind::Lock, "lock");
        if let Some(t) = self.things.get_mut(&ix) {
            t.is_locked = true;
            t.key_obj = key;
        }
        ix
    }

    /// Attaches a lock to a container; a locked container is closed.
    pub fn attach_lock_to(&mut self, target: &Ix, lock: &Ix) -> Result<()> {
        if !self.things.contains_key(lock) {
            return Err(EngineError::UnknownIx(lock.clone()));
        }
        let locked = self.things[lock].is_locked;
        let t = self
            .things
            .get_mut(target)
            .ok_or_else(|| EngineError::UnknownIx(target.clone()))?;
        t.lock_obj = Some(lock.clone());
        if locked {
            t.is_open = false;
        }
        Ok(())
    }

    /// Attaches a lock to a door connector; a locked door is closed.
    pub fn attach_lock_to_connector(&mut self, connector: &Ix, lock: &Ix) -> Result<()> {
        if !self.things.contains_key(lock) {
            return Err(EngineError::UnknownIx(lock.clone()));
        }
        let locked = self.things[lock].is_locked;
        let c = self
            .connectors
            .get_mut(connector)
            .ok_or_else(|| EngineError::UnknownIx(connector.clone()))?;
        c.lock_obj = Some(lock.clone());
        if locked {
            c.is_open = false;
        }
        Ok(())
    }

    /// Links a composite child to its parent; the child follows the
    /// parent everywhere and cannot be taken on its own.
    pub fn attach_part(&mut self, parent: &Ix, child: &Ix) -> Result<()> {
        if !self.things.contains_key(parent) {
            return Err(EngineError::UnknownIx(parent.clone()));
        }
        {
            let c = self
                .things
                .get_mut(child)
                .ok_or_else(|| EngineError::UnknownIx(child.clone()))?;
            c.parent_obj = Some(parent.clone());
        }
        let location = self.things[parent].location.clone();
        if let Some(p) = self.things.get_mut(parent) {
            p.children.push(child.clone());
        }
        if let Some(holder) = location {
            self.attach(&holder, child);
            self.refresh_sub_chain(&holder);
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Looks a thing up by index.
    pub fn thing(&self, ix: &Ix) -> Result<&Thing> {
        self.things
            .get(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// Mutable thing lookup.
    pub fn thing_mut(&mut self, ix: &Ix) -> Result<&mut Thing> {
        self.things
            .get_mut(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// Looks a room up by index.
    pub fn room(&self, ix: &Ix) -> Result<&Room> {
        self.rooms
            .get(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// Mutable room lookup.
    pub fn room_mut(&mut self, ix: &Ix) -> Result<&mut Room> {
        self.rooms
            .get_mut(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// Looks a connector up by index.
    pub fn connector(&self, ix: &Ix) -> Result<&Connector> {
        self.connectors
            .get(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// Mutable connector lookup.
    pub fn connector_mut(&mut self, ix: &Ix) -> Result<&mut Connector> {
        self.connectors
            .get_mut(ix)
            .ok_or_else(|| EngineError::UnknownIx(ix.clone()))
    }

    /// True if the index names a thing.
    #[must_use]
    pub fn is_thing(&self, ix: &Ix) -> bool {
        self.things.contains_key(ix)
    }

    /// The player's index.
    pub fn player(&self) -> Result<&Ix> {
        self.player
            .as_ref()
            .ok_or_else(|| EngineError::VerbDefinition("no player has been created".to_string()))
    }

    /// Rooms in creation order.
    #[must_use]
    pub fn rooms_in_order(&self) -> &[Ix] {
        &self.room_order
    }

    /// Things that a word can refer to (name, synonym, or adjective).
    #[must_use]
    pub fn noun_lookup(&self, word: &str) -> &[Ix] {
        self.noun_dict.get(word).map_or(&[], Vec::as_slice)
    }

    /// Registers an extra synonym and updates the noun dictionary.
    pub fn add_synonym(&mut self, ix: &Ix, word: &str) -> Result<()> {
        self.thing_mut(ix)?.synonyms.push(word.to_lowercase());
        self.reindex_nouns(ix);
        Ok(())
    }

    /// Registers an extra adjective and updates the noun dictionary.
    pub fn add_adjective(&mut self, ix: &Ix, word: &str) -> Result<()> {
        self.thing_mut(ix)?.adjectives.push(word.to_lowercase());
        self.reindex_nouns(ix);
        Ok(())
    }

    fn register_nouns(&mut self, thing: &Thing) {
        for word in thing.noun_words() {
            let entry = self.noun_dict.entry(word).or_default();
            if !entry.contains(&thing.ix) {
                entry.push(thing.ix.clone());
            }
        }
    }

    fn reindex_nouns(&mut self, ix: &Ix) {
        for entry in self.noun_dict.values_mut() {
            entry.retain(|i| i != ix);
        }
        self.noun_dict.retain(|_, v| !v.is_empty());
        if let Some(thing) = self.things.get(ix) {
            let words = thing.noun_words();
            for word in words {
                let entry = self.noun_dict.entry(word).or_default();
                if !entry.contains(ix) {
                    entry.push(ix.clone());
                }
            }
        }
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Direct contents of a holder.
    pub fn contents_list(&self, holder: &Holder) -> Result<Vec<Ix>> {
        match holder {
            Holder::Room(r) => Ok(self.room(r)?.contains.clone()),
            Holder::Thing(t) => Ok(self.thing(t)?.contains.clone()),
        }
    }

    /// Nested contents of a holder, one level down and deeper.
    /// Excludes the direct row; see [`World::all_contents_list`] for
    /// the full set.
    pub fn sub_contents_list(&self, holder: &Holder) -> Result<Vec<Ix>> {
        match holder {
            Holder::Room(r) => Ok(self.room(r)?.sub_contains.clone()),
            Holder::Thing(t) => Ok(self.thing(t)?.sub_contains.clone()),
        }
    }

    /// Direct and nested contents of a holder, direct row first.
    pub fn all_contents_list(&self, holder: &Holder) -> Result<Vec<Ix>> {
        let mut out = self.contents_list(holder)?;
        out.extend(self.sub_contents_list(holder)?);
        Ok(out)
    }

    /// Inserts a thing (and its composite parts and lock) into a
    /// holder and refreshes the `sub_contains` chain.
    pub fn add_thing(&mut self, holder: &Holder, t: &Ix) -> Result<()> {
        self.ensure_holder(holder)?;
        if !self.things.contains_key(t) {
            return Err(EngineError::UnknownIx(t.clone()));
        }
        self.attach(holder, t);
        for follower in self.followers_of(t) {
            self.attach(holder, &follower);
        }
        self.refresh_sub_chain(holder);
        Ok(())
    }

    /// Removes a thing (and its composite parts and lock) from its
    /// holder. Idempotent: removing a detached thing is a no-op.
    pub fn remove_thing(&mut self, t: &Ix) -> Result<()> {
        let Some(holder) = self.thing(t)?.location.clone() else {
            return Ok(());
        };
        self.detach(&holder, t);
        for follower in self.followers_of(t) {
            self.detach(&holder, &follower);
        }
        self.refresh_sub_chain(&holder);
        Ok(())
    }

    /// Moves a thing between holders, maintaining both chains.
    pub fn move_to(&mut self, t: &Ix, holder: &Holder) -> Result<()> {
        self.remove_thing(t)?;
        self.add_thing(holder, t)
    }

    /// Composite children and lock object that follow a thing when it
    /// moves.
    fn followers_of(&self, t: &Ix) -> Vec<Ix> {
        let Some(thing) = self.things.get(t) else {
            return Vec::new();
        };
        let mut followers = thing.children.clone();
        if let Some(lock) = &thing.lock_obj {
            followers.push(lock.clone());
        }
        // Parts can themselves have parts.
        let mut i = 0;
        while i < followers.len() {
            if let Some(part) = self.things.get(&followers[i]) {
                followers.extend(part.children.iter().cloned());
            }
            i += 1;
        }
        followers
    }

    /// Raw single-thing insertion, without composite recursion or
    /// cache refresh.
    fn attach(&mut self, holder: &Holder, t: &Ix) {
        // Never double-insert.
        let already = match holder {
            Holder::Room(r) => self.rooms[r].contains.contains(t),
            Holder::Thing(h) => self.things[h].contains.contains(t),
        };
        if !already {
            match holder {
                Holder::Room(r) => {
                    if let Some(room) = self.rooms.get_mut(r) {
                        room.contains.push(t.clone());
                    }
                }
                Holder::Thing(h) => {
                    if let Some(thing) = self.things.get_mut(h) {
                        thing.contains.push(t.clone());
                    }
                }
            }
        }
        if let Some(thing) = self.things.get_mut(t) {
            thing.location = Some(holder.clone());
        }
    }

    fn detach(&mut self, holder: &Holder, t: &Ix) {
        match holder {
            Holder::Room(r) => {
                if let Some(room) = self.rooms.get_mut(r) {
                    room.contains.retain(|i| i != t);
                }
            }
            Holder::Thing(h) => {
                if let Some(thing) = self.things.get_mut(h) {
                    thing.contains.retain(|i| i != t);
                }
            }
        }
        if let Some(thing) = self.things.get_mut(t) {
            thing.location = None;
        }
    }

    fn ensure_holder(&self, holder: &Holder) -> Result<()> {
        match holder {
            Holder::Room(r) if self.rooms.contains_key(r) => Ok(()),
            Holder::Thing(t) if self.things.contains_key(t) => Ok(()),
            Holder::Room(ix) | Holder::Thing(ix) => Err(EngineError::UnknownIx(ix.clone())),
        }
    }

    /// Recomputes the descendant cache for a holder and every
    /// ancestor up to (and including) its room.
    fn refresh_sub_chain(&mut self, holder: &Holder) {
        let mut current = Some(holder.clone());
        while let Some(h) = current {
            let descendants = self.collect_descendants(&h);
            match &h {
                Holder::Room(r) => {
                    if let Some(room) = self.rooms.get_mut(r) {
                        room.sub_contains = descendants;
                    }
                    current = None;
                }
                Holder::Thing(t) => {
                    let parent = self.things.get(t).and_then(|x| x.location.clone());
                    if let Some(thing) = self.things.get_mut(t) {
                        thing.sub_contains = descendants;
                    }
                    current = parent;
                }
            }
        }
    }

    fn collect_descendants(&self, holder: &Holder) -> Vec<Ix> {
        let direct = match holder {
            Holder::Room(r) => self.rooms.get(r).map(|x| x.contains.clone()),
            Holder::Thing(t) => self.things.get(t).map(|x| x.contains.clone()),
        }
        .unwrap_or_default();

        let mut out = Vec::new();
        for child in direct {
            // Direct children of a room are not "sub" contents; for
            // things, descendants start one level down. Both caches
            // store strictly transitive descendants.
            let nested = self.collect_descendants(&Holder::Thing(child.clone()));
            out.push(child);
            out.extend(nested);
        }
        // A room's (or thing's) sub_contains excludes its direct row.
        let direct = match holder {
            Holder::Room(r) => self.rooms.get(r).map(|x| x.contains.as_slice()),
            Holder::Thing(t) => self.things.get(t).map(|x| x.contains.as_slice()),
        }
        .unwrap_or(&[]);
        out.retain(|i| !direct.contains(i));
        out
    }

    /// Walks the location chain until a room.
    pub fn outermost_room(&self, t: &Ix) -> Result<Option<Ix>> {
        let mut current = self.thing(t)?.location.clone();
        while let Some(holder) = current {
            match holder {
                Holder::Room(r) => return Ok(Some(r)),
                Holder::Thing(h) => current = self.thing(&h)?.location.clone(),
            }
        }
        Ok(None)
    }

    /// The room a holder ultimately sits in.
    pub fn room_of_holder(&self, holder: &Holder) -> Result<Option<Ix>> {
        match holder {
            Holder::Room(r) => Ok(Some(r.clone())),
            Holder::Thing(t) => self.outermost_room(t),
        }
    }

    /// True if the thing is somewhere in the player's possession.
    pub fn in_inventory(&self, t: &Ix) -> Result<bool> {
        let player = self.player()?.clone();
        let mut current = self.thing(t)?.location.clone();
        while let Some(holder) = current {
            match holder {
                Holder::Room(_) => return Ok(false),
                Holder::Thing(h) => {
                    if h == player {
                        return Ok(true);
                    }
                    current = self.thing(&h)?.location.clone();
                }
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Visibility and darkness
    // =========================================================================

    /// Contents reachable by sight from outside: direct contents,
    /// recursing only into things whose interior is visible.
    pub fn visible_contents(&self, holder: &Holder) -> Result<Vec<Ix>> {
        let mut out = Vec::new();
        for child in self.contents_list(holder)? {
            out.push(child.clone());
            let thing = self.thing(&child)?;
            if thing.interior_visible() {
                out.extend(self.visible_contents(&Holder::Thing(child))?);
            }
        }
        Ok(out)
    }

    /// True iff the room can be seen in: either it is not dark, or a
    /// lit light source is reachable in the room or the player's
    /// inventory.
    pub fn resolve_darkness(&self, room: &Ix) -> Result<bool> {
        if !self.room(room)?.dark {
            return Ok(true);
        }
        let mut candidates = self.visible_contents(&Holder::Room(room.clone()))?;
        if let Ok(player) = self.player() {
            candidates.extend(self.visible_contents(&Holder::Thing(player.clone()))?);
        }
        for ix in candidates {
            let thing = self.thing(&ix)?;
            if thing.is_lit {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Fit checks and liquids
    // =========================================================================

    /// Total size of a container's direct contents.
    pub fn size_used(&self, c: &Ix) -> Result<i64> {
        let mut used = 0;
        for child in &self.thing(c)?.contains {
            used += self.thing(child)?.size;
        }
        Ok(used)
    }

    /// Whether an item fits: the sum of contained sizes plus the
    /// item's may not exceed the container's size. A container holds
    /// at most one liquid, and a liquid is the sole body of its
    /// container.
    pub fn can_fit(&self, c: &Ix, item: &Ix) -> Result<bool> {
        let container = self.thing(c)?;
        let thing = self.thing(item)?;
        if thing.kind == ThingKind::Liquid {
            if !container.holds_liquid {
                return Ok(false);
            }
            if self.contains_liquid(c)?.is_some() {
                return Ok(false);
            }
            return Ok(thing.size <= container.size);
        }
        if self.contains_liquid(c)?.is_some() {
            // A liquid fills its container for fit purposes.
            return Ok(false);
        }
        Ok(self.size_used(c)? + thing.size <= container.size)
    }

    /// The liquid directly inside a container, if any.
    pub fn contains_liquid(&self, c: &Ix) -> Result<Option<Ix>> {
        for child in &self.thing(c)?.contains {
            if self.thing(child)?.kind == ThingKind::Liquid {
                return Ok(Some(child.clone()));
            }
        }
        Ok(None)
    }

    /// Remaining liquid capacity of a container.
    pub fn liquid_room_left(&self, c: &Ix) -> Result<i64> {
        let capacity = self.thing(c)?.size;
        match self.contains_liquid(c)? {
            Some(liquid) => Ok(capacity - self.thing(&liquid)?.size),
            None => Ok(capacity),
        }
    }

    // =========================================================================
    // Knowledge
    // =========================================================================

    /// Marks an entity as encountered by the player.
    pub fn make_known(&mut self, t: &Ix) -> Result<()> {
        let known_ix = {
            let thing = self.thing_mut(t)?;
            thing.known = true;
            thing.known_ix.clone()
        };
        let player = self.player()?.clone();
        let p = self.thing_mut(&player)?;
        if !p.knows_about.contains(&known_ix) {
            p.knows_about.push(known_ix);
        }
        Ok(())
    }

    /// Marks everything visible from the room as known. Runs when a
    /// lit room is described.
    pub fn make_room_known(&mut self, room: &Ix) -> Result<()> {
        self.room_mut(room)?.known = true;
        for ix in self.visible_contents(&Holder::Room(room.clone()))? {
            self.make_known(&ix)?;
        }
        Ok(())
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Extracts the mutable state of the world for saving.
    pub fn capture(&self) -> WorldState {
        let mut objects = BTreeMap::new();
        for (ix, thing) in &self.things {
            let mut attrs = BTreeMap::new();
            attrs.insert("known".to_string(), Value::Bool(thing.known));
            attrs.insert("is_open".to_string(), Value::Bool(thing.is_open));
            attrs.insert("is_locked".to_string(), Value::Bool(thing.is_locked));
            attrs.insert("is_lit".to_string(), Value::Bool(thing.is_lit));
            attrs.insert("revealed".to_string(), Value::Bool(thing.revealed));
            attrs.insert(
                "light_turns".to_string(),
                thing.light_turns.map_or(Value::Nil, Value::Int),
            );
            attrs.insert(
                "position".to_string(),
                Value::String(thing.position.participle().to_string()),
            );
            attrs.insert(
                "wearing".to_string(),
                Value::List(thing.wearing.iter().cloned().map(Value::Ref).collect()),
            );
            attrs.insert(
                "knows_about".to_string(),
                Value::List(thing.knows_about.iter().cloned().map(Value::Ref).collect()),
            );
            if let Some(actor) = &thing.actor {
                attrs.insert("said_hi".to_string(), Value::Bool(actor.said_hi));
                let mut stock = BTreeMap::new();
                for (key, sale) in &actor.for_sale {
                    if let crate::topic::Stock::Limited(n) = sale.stock {
                        stock.insert(key.to_string(), Value::Int(i64::from(n)));
                    }
                }
                attrs.insert("stock".to_string(), Value::Map(stock));
            }
            objects.insert(ix.to_string(), attrs);
        }
        for (ix, room) in &self.rooms {
            let mut attrs = BTreeMap::new();
            attrs.insert("known".to_string(), Value::Bool(room.known));
            objects.insert(ix.to_string(), attrs);
        }
        for (ix, connector) in &self.connectors {
            let mut attrs = BTreeMap::new();
            attrs.insert("is_open".to_string(), Value::Bool(connector.is_open));
            objects.insert(ix.to_string(), attrs);
        }

        let locations = self
            .room_order
            .iter()
            .map(|room| PlacementNode {
                ix: room.clone(),
                children: self.placement_children(&self.rooms[room].contains),
            })
            .collect();

        WorldState { objects, locations }
    }

    fn placement_children(&self, direct: &[Ix]) -> Vec<PlacementNode> {
        direct
            .iter()
            .map(|child| PlacementNode {
                ix: child.clone(),
                children: self
                    .things
                    .get(child)
                    .map(|t| self.placement_children(&t.contains))
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Validates a captured state against this world.
    ///
    /// Every index and reference must resolve; a save from a
    /// different game (or a different creation order) is rejected
    /// before any mutation happens.
    pub fn validate(&self, state: &WorldState) -> Result<()> {
        let resolves = |raw: &str| {
            let ix = Ix::from_raw(raw);
            self.things.contains_key(&ix)
                || self.rooms.contains_key(&ix)
                || self.connectors.contains_key(&ix)
        };
        for (raw, attrs) in &state.objects {
            if !resolves(raw) {
                return Err(EngineError::Save(format!("unknown index {raw} in save")));
            }
            for value in attrs.values() {
                let mut refs = Vec::new();
                value.collect_refs(&mut refs);
                for r in refs {
                    if !resolves(r.as_str()) {
                        return Err(EngineError::Save(format!(
                            "dangling reference {r} in save"
                        )));
                    }
                }
            }
        }
        let mut stack: Vec<&PlacementNode> = state.locations.iter().collect();
        while let Some(node) = stack.pop() {
            if !resolves(node.ix.as_str()) {
                return Err(EngineError::Save(format!(
                    "unknown index {} in location tree",
                    node.ix
                )));
            }
            stack.extend(node.children.iter());
        }
        Ok(())
    }

    /// Restores a previously captured state.
    ///
    /// Validates first; on success, detaches every thing and rebuilds
    /// containment by depth-first placement from the saved trees, then
    /// applies saved attributes.
    pub fn restore(&mut self, state: &WorldState) -> Result<()> {
        self.validate(state)?;

        // Detach everything.
        for thing in self.things.values_mut() {
            thing.location = None;
            thing.contains.clear();
            thing.sub_contains.clear();
        }
        for room in self.rooms.values_mut() {
            room.contains.clear();
            room.sub_contains.clear();
        }

        // Rebuild placement depth-first.
        for node in &state.locations {
            let holder = Holder::Room(node.ix.clone());
            for child in &node.children {
                self.restore_node(&holder, child);
            }
            self.refresh_sub_chain(&holder);
        }

        // Apply attributes.
        for (raw, attrs) in &state.objects {
            let ix = Ix::from_raw(raw.clone());
            if let Some(thing) = self.things.get_mut(&ix) {
                apply_thing_attrs(thing, attrs);
            } else if let Some(room) = self.rooms.get_mut(&ix) {
                if let Some(Value::Bool(known)) = attrs.get("known") {
                    room.known = *known;
                }
            } else if let Some(connector) = self.connectors.get_mut(&ix) {
                if let Some(Value::Bool(open)) = attrs.get("is_open") {
                    connector.is_open = *open;
                }
            }
        }
        Ok(())
    }

    fn restore_node(&mut self, holder: &Holder, node: &PlacementNode) {
        self.attach(holder, &node.ix);
        let inner = Holder::Thing(node.ix.clone());
        for child in &node.children {
            self.restore_node(&inner, child);
        }
    }
}

fn apply_thing_attrs(thing: &mut Thing, attrs: &BTreeMap<String, Value>) {
    if let Some(Value::Bool(b)) = attrs.get("known") {
        thing.known = *b;
    }
    if let Some(Value::Bool(b)) = attrs.get("is_open") {
        thing.is_open = *b;
    }
    if let Some(Value::Bool(b)) = attrs.get("is_locked") {
        thing.is_locked = *b;
    }
    if let Some(Value::Bool(b)) = attrs.get("is_lit") {
        thing.is_lit = *b;
    }
    if let Some(Value::Bool(b)) = attrs.get("revealed") {
        thing.revealed = *b;
    }
    match attrs.get("light_turns") {
        Some(Value::Int(n)) => thing.light_turns = Some(*n),
        Some(Value::Nil) => thing.light_turns = None,
        _ => {}
    }
    if let Some(Value::String(p)) = attrs.get("position") {
        thing.position = match p.as_str() {
            "sitting" => Posture::Sitting,
            "lying" => Posture::Lying,
            _ => Posture::Standing,
        };
    }
    if let Some(Value::List(items)) = attrs.get("wearing") {
        thing.wearing = items
            .iter()
            .filter_map(|v| match v {
                Value::Ref(ix) => Some(ix.clone()),
                _ => None,
            })
            .collect();
    }
    if let Some(Value::List(items)) = attrs.get("knows_about") {
        thing.knows_about = items
            .iter()
            .filter_map(|v| match v {
                Value::Ref(ix) => Some(ix.clone()),
                _ => None,
            })
            .collect();
    }
    if let Some(actor) = &mut thing.actor {
        if let Some(Value::Bool(b)) = attrs.get("said_hi") {
            actor.said_hi = *b;
        }
        if let Some(Value::Map(stock)) = attrs.get("stock") {
            for (key, value) in stock {
                if let (Some(sale), Value::Int(n)) =
                    (actor.for_sale.get_mut(&Ix::from_raw(key.clone())), value)
                {
                    sale.stock = crate::topic::Stock::Limited(
                        u32::try_from(*n).unwrap_or_default(),
                    );
                }
            }
        }
    }
}

/// The mutable state of a world, as captured for a save file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Mutable attributes per entity, keyed by index string.
    pub objects: BTreeMap<String, BTreeMap<String, Value>>,
    /// Containment rebuilt by depth-first placement, one tree per
    /// room in creation order.
    pub locations: Vec<PlacementNode>,
}

/// One node of the saved containment tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacementNode {
    /// The placed entity.
    pub ix: Ix,
    /// Its direct contents.
    pub children: Vec<PlacementNode>,
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// However things are shuffled between rooms and a fixed
        /// chest, each lives in exactly one place and the transitive
        /// caches agree with the direct chains.
        #[test]
        fn placement_stays_exclusive(moves in proptest::collection::vec((0usize..3, 0usize..3), 1..40)) {
            let mut world = World::new();
            let left = world.create_room("Left", "One side.");
            let right = world.create_room("Right", "The other side.");
            let chest = world.create_thing(ThingKind::Container, "chest");
            world.add_thing(&Holder::Room(left.clone()), &chest).unwrap();

            let mut things = Vec::new();
            for name in ["coin", "cup", "comb"] {
                let t = world.create_thing(ThingKind::Thing, name);
                world.add_thing(&Holder::Room(left.clone()), &t).unwrap();
                things.push(t);
            }

            for (which, dest) in moves {
                let holder = match dest {
                    0 => Holder::Room(left.clone()),
                    1 => Holder::Room(right.clone()),
                    _ => Holder::Thing(chest.clone()),
                };
                world.move_to(&things[which], &holder).unwrap();
            }

            for t in &things {
                let mut holders = 0;
                for room in [&left, &right] {
                    if world.room(room).unwrap().contents().contains(t) {
                        holders += 1;
                    }
                }
                if world.thing(&chest).unwrap().contents().contains(t) {
                    holders += 1;
                }
                prop_assert_eq!(holders, 1);

                let location = world.thing(t).unwrap().location.clone().unwrap();
                let in_left = world.all_contents_list(&Holder::Room(left.clone())).unwrap().contains(t);
                let in_right = world.all_contents_list(&Holder::Room(right.clone())).unwrap().contains(t);
                prop_assert!(in_left != in_right);
                if location == Holder::Thing(chest.clone()) {
                    prop_assert!(in_left);
                }
            }
        }

        /// Darkness resolution depends only on lit reachable sources.
        #[test]
        fn darkness_matches_the_lit_set(lit in proptest::collection::vec(any::<bool>(), 3)) {
            let mut world = World::new();
            let cave = world.create_room("Cave", "A wet cave.");
            world.room_mut(&cave).unwrap().dark = true;
            world.create_player(&cave).unwrap();
            let player = world.player().unwrap().clone();

            for (i, on) in lit.iter().enumerate() {
                let lamp = world.create_thing(ThingKind::LightSource, format!("lamp{i}"));
                world.thing_mut(&lamp).unwrap().is_lit = *on;
                let holder = if i % 2 == 0 {
                    Holder::Room(cave.clone())
                } else {
                    Holder::Thing(player.clone())
                };
                world.add_thing(&holder, &lamp).unwrap();
            }

            let can_see = world.resolve_darkness(&cave).unwrap();
            prop_assert_eq!(can_see, lit.iter().any(|on| *on));
        }
    }
}
