//! Conversation topics and commerce tables for actors.

use std::collections::HashMap;

use parlor_foundation::Ix;

/// A prewritten conversational response.
#[derive(Clone, Debug, PartialEq)]
pub struct Topic {
    /// The text the actor utters.
    pub text: String,
}

impl Topic {
    /// Creates a topic with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Remaining stock for an item an actor sells.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stock {
    /// A fixed number remain.
    Limited(u32),
    /// The actor never runs out; each purchase awards a fresh copy.
    Infinite,
}

/// One entry in an actor's `for_sale` table.
#[derive(Clone, Debug)]
pub struct SaleItem {
    /// The item sold (held offstage until purchased).
    pub item: Ix,
    /// `known_ix` of the accepted currency.
    pub currency: Ix,
    /// Units of currency per purchase.
    pub price: i64,
    /// Remaining stock.
    pub stock: Stock,
}

/// One entry in an actor's `will_buy` table.
#[derive(Clone, Debug)]
pub struct BuyItem {
    /// `known_ix` of the item the actor wants.
    pub item: Ix,
    /// `known_ix` of the currency paid out.
    pub currency: Ix,
    /// Units of currency paid per item.
    pub price: i64,
    /// How many the actor will still buy; `None` means unlimited.
    pub wants: Option<u32>,
}

/// Conversation and commerce state carried by actors.
///
/// Topic maps are keyed by the `known_ix` of the thing asked or told
/// about, so mechanically-distinct copies share responses.
#[derive(Clone, Debug, Default)]
pub struct ActorData {
    /// Responses to "ask ACTOR about X".
    pub ask_topics: HashMap<Ix, Topic>,
    /// Responses to "tell ACTOR about X".
    pub tell_topics: HashMap<Ix, Topic>,
    /// Responses to "give X to ACTOR".
    pub give_topics: HashMap<Ix, Topic>,
    /// Responses to "show X to ACTOR".
    pub show_topics: HashMap<Ix, Topic>,

    /// Fallback when no topic is registered.
    pub default_topic: Option<String>,
    /// Appended to every conversational response.
    pub sticky_topic: Option<Topic>,
    /// Fires on the first interaction with this actor.
    pub hi_topic: Option<Topic>,
    /// Fires when conversation is re-entered after the first.
    pub return_hi_topic: Option<Topic>,
    /// When set, pre-empts every other response.
    pub hermit_topic: Option<Topic>,
    /// Whether the greeting has fired.
    pub said_hi: bool,

    /// Items this actor sells, keyed by the item's `known_ix`.
    pub for_sale: HashMap<Ix, SaleItem>,
    /// Items this actor buys, keyed by the item's `known_ix`.
    pub will_buy: HashMap<Ix, BuyItem>,
}

impl ActorData {
    /// Looks up the topic map for one of the four conversational verbs.
    #[must_use]
    pub fn topics(&self, verb: ConversationKind) -> &HashMap<Ix, Topic> {
        match verb {
            ConversationKind::Ask => &self.ask_topics,
            ConversationKind::Tell => &self.tell_topics,
            ConversationKind::Give => &self.give_topics,
            ConversationKind::Show => &self.show_topics,
        }
    }

    /// Mutable variant of [`ActorData::topics`].
    pub fn topics_mut(&mut self, verb: ConversationKind) -> &mut HashMap<Ix, Topic> {
        match verb {
            ConversationKind::Ask => &mut self.ask_topics,
            ConversationKind::Tell => &mut self.tell_topics,
            ConversationKind::Give => &mut self.give_topics,
            ConversationKind::Show => &mut self.show_topics,
        }
    }
}

/// Which conversational verb a topic lookup serves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConversationKind {
    /// `ask ACTOR about X`
    Ask,
    /// `tell ACTOR about X`
    Tell,
    /// `give X to ACTOR`
    Give,
    /// `show X to ACTOR`
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_route_by_verb() {
        let mut data = ActorData::default();
        let opal = Ix::from_raw("thing5");
        data.ask_topics
            .insert(opal.clone(), Topic::new("She shrugs."));

        assert!(data.topics(ConversationKind::Ask).contains_key(&opal));
        assert!(!data.topics(ConversationKind::Tell).contains_key(&opal));
    }

    #[test]
    fn stock_variants() {
        assert_eq!(Stock::Limited(3), Stock::Limited(3));
        assert_ne!(Stock::Limited(3), Stock::Infinite);
    }
}
