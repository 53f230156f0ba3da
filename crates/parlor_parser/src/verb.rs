//! Verb records and the verb registry.
//!
//! A verb record is an immutable declaration: keyword, synonyms,
//! ordered syntax templates with `<dobj>`/`<iobj>` placeholders, and
//! per-slot scope and type constraints. The function that executes the
//! verb lives in the engine's action table, keyed by [`VerbId`]; the
//! parser only ever consults the declarations.

use std::collections::HashMap;

use parlor_foundation::{Direction, EngineError, Result, VerbId};
use parlor_world::{ContainKind, Thing, ThingKind};

/// One token of a syntax template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateTok {
    /// A literal word that must appear in the input.
    Literal(String),
    /// The direct-object slot.
    Dobj,
    /// The indirect-object slot.
    Iobj,
}

/// Where a verb slot looks for its object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// The outermost room's visible contents, minus the player's
    /// inventory; darkness hides all unless lit.
    Room,
    /// `Room` plus the player's inventory.
    Near,
    /// The player's contents; a room object triggers an implicit take.
    Inv,
    /// `Inv`, but tolerates room objects without complaint.
    InvFlex,
    /// `Room`, but tolerates held objects with an implicit drop.
    RoomFlex,
    /// Only items the player is wearing.
    Wearing,
    /// Anything the player knows about, deduplicated by `known_ix`.
    Knows,
    /// One of the twelve direction words.
    Direction,
    /// An arbitrary token sequence, returned verbatim.
    Text,
}

impl Scope {
    /// True for the scopes that resolve to an inventory item.
    #[must_use]
    pub fn wants_held(self) -> bool {
        matches!(self, Scope::Inv | Scope::InvFlex)
    }
}

/// Capability-based class constraint on a verb slot.
///
/// Checks consult capabilities rather than the creation tag wherever a
/// capability exists, so a `Surface` that also holds liquid passes
/// `LiquidContainer`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeConstraint {
    /// Holds things inside.
    Container,
    /// Holds things on top.
    Surface,
    /// Holds things underneath.
    UnderSpace,
    /// Is a liquid.
    Liquid,
    /// Can hold a liquid.
    LiquidContainer,
    /// Can be lit.
    LightSource,
    /// Is a person or creature.
    Actor,
    /// Can be worn.
    Clothing,
    /// Carries readable text.
    Readable,
    /// Opens locks.
    Key,
    /// A lock.
    Lock,
    /// A connector entrance (door face, ladder end, ...).
    Entrance,
}

impl TypeConstraint {
    /// Whether a thing satisfies this constraint.
    #[must_use]
    pub fn matches(self, thing: &Thing) -> bool {
        match self {
            TypeConstraint::Container => thing.contain_kind == Some(ContainKind::In),
            TypeConstraint::Surface => thing.contain_kind == Some(ContainKind::On),
            TypeConstraint::UnderSpace => thing.contain_kind == Some(ContainKind::Under),
            TypeConstraint::Liquid => thing.kind == ThingKind::Liquid,
            TypeConstraint::LiquidContainer => thing.holds_liquid,
            TypeConstraint::LightSource => thing.kind == ThingKind::LightSource,
            TypeConstraint::Actor => thing.is_actor(),
            TypeConstraint::Clothing => thing.wearable,
            TypeConstraint::Readable => thing.read_text.is_some(),
            TypeConstraint::Key => thing.kind == ThingKind::Key,
            TypeConstraint::Lock => thing.kind == ThingKind::Lock,
            TypeConstraint::Entrance => thing.connector.is_some(),
        }
    }

    /// Noun used in mismatch messages ("That's not a container.").
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            TypeConstraint::Container => "container",
            TypeConstraint::Surface => "surface",
            TypeConstraint::UnderSpace => "space to put things under",
            TypeConstraint::Liquid => "liquid",
            TypeConstraint::LiquidContainer => "vessel",
            TypeConstraint::LightSource => "light source",
            TypeConstraint::Actor => "person",
            TypeConstraint::Clothing => "clothing",
            TypeConstraint::Readable => "thing you can read",
            TypeConstraint::Key => "key",
            TypeConstraint::Lock => "lock",
            TypeConstraint::Entrance => "way through",
        }
    }
}

/// An immutable verb declaration.
#[derive(Clone, Debug)]
pub struct VerbRecord {
    /// Registry identifier; assigned at registration.
    pub id: VerbId,
    /// Primary keyword.
    pub word: String,
    /// Synonym keywords.
    pub synonyms: Vec<String>,
    /// Ordered syntax templates; matching is first-fit.
    pub templates: Vec<Vec<TemplateTok>>,
    /// Whether the verb takes a direct object.
    pub has_dobj: bool,
    /// Whether the verb takes an indirect object.
    pub has_iobj: bool,
    /// Scope for the direct object.
    pub dscope: Scope,
    /// Scope for the indirect object.
    pub iscope: Scope,
    /// Class constraint on the direct object.
    pub dtype: Option<TypeConstraint>,
    /// Class constraint on the indirect object.
    pub itype: Option<TypeConstraint>,
    /// Required facing of the direct object, if any.
    pub ddirection: Option<Direction>,
    /// Far-away direct objects are acceptable.
    pub far_dobj: bool,
    /// Far-away indirect objects are acceptable.
    pub far_iobj: bool,
    /// Prepositions this verb's forms consume.
    pub preposition: Vec<String>,
    /// Quantifier keywords this verb's forms consume.
    pub keywords: Vec<String>,
    /// The parser may interpose a take before this verb.
    pub allow_implicit_take: bool,
    /// One-line usage shown by `verb help`.
    pub help: String,
}

impl VerbRecord {
    /// Starts a record for the given keyword. Defaults: no objects,
    /// `Near` scopes, implicit take allowed.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            id: VerbId(u32::MAX),
            word: word.into(),
            synonyms: Vec::new(),
            templates: Vec::new(),
            has_dobj: false,
            has_iobj: false,
            dscope: Scope::Near,
            iscope: Scope::Near,
            dtype: None,
            itype: None,
            ddirection: None,
            far_dobj: false,
            far_iobj: false,
            preposition: Vec::new(),
            keywords: Vec::new(),
            allow_implicit_take: true,
            help: String::new(),
        }
    }

    /// Adds synonym keywords.
    #[must_use]
    pub fn with_synonyms(mut self, synonyms: &[&str]) -> Self {
        self.synonyms = synonyms.iter().map(ToString::to_string).collect();
        self
    }

    /// Adds one syntax template from `"word"` / `"<dobj>"` /
    /// `"<iobj>"` tokens. Placeholder occurrences set `has_dobj` /
    /// `has_iobj`.
    #[must_use]
    pub fn with_template(mut self, tokens: &[&str]) -> Self {
        let template = tokens
            .iter()
            .map(|t| match *t {
                "<dobj>" => {
                    self.has_dobj = true;
                    TemplateTok::Dobj
                }
                "<iobj>" => {
                    self.has_iobj = true;
                    TemplateTok::Iobj
                }
                literal => TemplateTok::Literal(literal.to_string()),
            })
            .collect();
        self.templates.push(template);
        self
    }

    /// Sets the direct-object scope.
    #[must_use]
    pub fn with_dscope(mut self, scope: Scope) -> Self {
        self.dscope = scope;
        self
    }

    /// Sets the indirect-object scope.
    #[must_use]
    pub fn with_iscope(mut self, scope: Scope) -> Self {
        self.iscope = scope;
        self
    }

    /// Constrains the direct object's class.
    #[must_use]
    pub fn with_dtype(mut self, constraint: TypeConstraint) -> Self {
        self.dtype = Some(constraint);
        self
    }

    /// Constrains the indirect object's class.
    #[must_use]
    pub fn with_itype(mut self, constraint: TypeConstraint) -> Self {
        self.itype = Some(constraint);
        self
    }

    /// Declares the prepositions this verb's forms consume.
    #[must_use]
    pub fn with_preposition(mut self, words: &[&str]) -> Self {
        self.preposition = words.iter().map(ToString::to_string).collect();
        self
    }

    /// Declares quantifier keywords this verb's forms consume.
    #[must_use]
    pub fn with_keywords(mut self, words: &[&str]) -> Self {
        self.keywords = words.iter().map(ToString::to_string).collect();
        self
    }

    /// Permits far-away direct objects.
    #[must_use]
    pub fn with_far_dobj(mut self) -> Self {
        self.far_dobj = true;
        self
    }

    /// Forbids the implicit take.
    #[must_use]
    pub fn without_implicit_take(mut self) -> Self {
        self.allow_implicit_take = false;
        self
    }

    /// Sets the `verb help` line.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Every keyword this verb answers to.
    #[must_use]
    pub fn all_words(&self) -> Vec<&str> {
        let mut words = vec![self.word.as_str()];
        words.extend(self.synonyms.iter().map(String::as_str));
        words
    }
}

/// Registry of verb declarations with a leading-word index.
#[derive(Clone, Debug, Default)]
pub struct VerbRegistry {
    records: Vec<VerbRecord>,
    /// word -> candidate verbs for that leading token.
    verb_dict: HashMap<String, Vec<VerbId>>,
}

impl VerbRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record, assigning its id.
    ///
    /// # Errors
    ///
    /// Rejects records with no templates, or templates with
    /// placeholders that contradict the declared slots.
    pub fn register(&mut self, mut record: VerbRecord) -> Result<VerbId> {
        if record.templates.is_empty() {
            return Err(EngineError::VerbDefinition(format!(
                "verb \"{}\" declares no syntax templates",
                record.word
            )));
        }
        for template in &record.templates {
            if template.is_empty() {
                return Err(EngineError::VerbDefinition(format!(
                    "verb \"{}\" has an empty template",
                    record.word
                )));
            }
        }
        let id = VerbId(u32::try_from(self.records.len()).map_err(|_| {
            EngineError::VerbDefinition("verb registry overflow".to_string())
        })?);
        record.id = id;
        for word in record.all_words() {
            self.verb_dict
                .entry(word.to_string())
                .or_default()
                .push(id);
        }
        self.records.push(record);
        Ok(id)
    }

    /// The record for a verb id.
    #[must_use]
    pub fn record(&self, id: VerbId) -> &VerbRecord {
        &self.records[id.0 as usize]
    }

    /// Candidate verbs for a leading token.
    #[must_use]
    pub fn candidates(&self, word: &str) -> &[VerbId] {
        self.verb_dict.get(word).map_or(&[], Vec::as_slice)
    }

    /// All records, in registration order.
    #[must_use]
    pub fn records(&self) -> &[VerbRecord] {
        &self.records
    }

    /// Finds a verb by its primary keyword.
    #[must_use]
    pub fn by_word(&self, word: &str) -> Option<&VerbRecord> {
        self.records.iter().find(|r| r.word == word)
    }
}
